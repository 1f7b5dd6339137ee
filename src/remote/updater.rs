//! Periodic, cancellable position-update task.
//!
//! The frame loop publishes the latest request and drains finished
//! responses without ever waiting. Failed calls are logged and dropped, so
//! the caller keeps its last-known-good enemies; the next tick retries.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::error::{GameError, GameResult};
use crate::remote::{PositionRequest, PositionResponse, PositionService};

pub struct PositionUpdater {
    request_tx: watch::Sender<PositionRequest>,
    response_rx: mpsc::UnboundedReceiver<PositionResponse>,
    in_flight: Arc<AtomicBool>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PositionUpdater {
    pub fn spawn<S: PositionService>(
        rt: &Handle,
        service: S,
        period: Duration,
        initial: PositionRequest,
    ) -> Self {
        let (request_tx, request_rx) = watch::channel(initial);
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let in_flight = Arc::new(AtomicBool::new(false));

        let task = rt.spawn(update_loop(
            Arc::new(service),
            period,
            request_rx,
            response_tx,
            shutdown_rx,
            Arc::clone(&in_flight),
        ));
        info!(?period, "Position updater started");

        Self {
            request_tx,
            response_rx,
            in_flight,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Replaces the request sent on the next tick.
    pub fn publish(&self, request: PositionRequest) {
        self.request_tx.send_replace(request);
    }

    /// Newest finished response, if any arrived since the last poll.
    pub fn poll(&mut self) -> Option<PositionResponse> {
        let mut latest = None;
        while let Ok(resp) = self.response_rx.try_recv() {
            latest = Some(resp);
        }
        latest
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stops the repeating task. Safe to call more than once.
    ///
    /// A service call already running on the blocking pool cannot be
    /// aborted; its result is discarded.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Position updater stopped");
        }
        self.in_flight.store(false, Ordering::Relaxed);
    }
}

impl Drop for PositionUpdater {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn update_loop<S: PositionService>(
    service: Arc<S>,
    period: Duration,
    request_rx: watch::Receiver<PositionRequest>,
    response_tx: mpsc::UnboundedSender<PositionResponse>,
    mut shutdown_rx: oneshot::Receiver<()>,
    in_flight: Arc<AtomicBool>,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                debug!("Position updater received shutdown");
                break;
            }
            _ = ticker.tick() => {
                let request = request_rx.borrow().clone();
                in_flight.store(true, Ordering::Relaxed);
                let outcome = call_service(Arc::clone(&service), request).await;
                in_flight.store(false, Ordering::Relaxed);

                match outcome {
                    Ok(resp) => {
                        if response_tx.send(resp).is_err() {
                            debug!("Response receiver dropped, stopping updater");
                            break;
                        }
                    }
                    Err(e) => warn!("Error updating enemy positions: {}", e),
                }
            }
        }
    }
}

/// Runs one blocking service call, checks the response shape and stamps it
/// with the request's generation.
pub async fn call_service<S: PositionService>(
    service: Arc<S>,
    request: PositionRequest,
) -> GameResult<PositionResponse> {
    let expected = request.enemies.len();
    let generation = request.generation;
    let joined = tokio::task::spawn_blocking(move || service.update_enemy_positions(&request)).await;
    let mut resp = match joined {
        Ok(result) => result?,
        Err(e) => {
            error!("Position service call panicked or was cancelled: {}", e);
            return Err(GameError::Service(e.to_string()));
        }
    };
    if resp.enemies.len() != expected {
        return Err(GameError::EnemyCountMismatch { expected, got: resp.enemies.len() });
    }
    resp.generation = generation;
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::enemy::Point;
    use std::sync::atomic::AtomicUsize;

    fn request() -> PositionRequest {
        PositionRequest { generation: 0, player: Point::new(1.0, 2.0), enemies: vec![Point::new(300.0, 300.0)] }
    }

    #[tokio::test]
    async fn mocked_service_result_is_returned() {
        let svc = |_: &PositionRequest| -> GameResult<PositionResponse> { Ok(PositionResponse { generation: 0, enemies: vec![Point::new(10.0, 20.0)] }) };
        let resp = call_service(Arc::new(svc), request()).await.unwrap();
        assert_eq!(resp.enemies, vec![Point::new(10.0, 20.0)]);
    }

    #[tokio::test]
    async fn response_carries_request_generation() {
        let svc = |req: &PositionRequest| -> GameResult<PositionResponse> {
            Ok(PositionResponse { generation: 0, enemies: req.enemies.clone() })
        };
        let mut req = request();
        req.generation = 7;
        let resp = call_service(Arc::new(svc), req).await.unwrap();
        assert_eq!(resp.generation, 7);
    }

    #[tokio::test]
    async fn wrong_count_is_rejected() {
        let svc = |_: &PositionRequest| -> GameResult<PositionResponse> { Ok(PositionResponse { generation: 0, enemies: vec![] }) };
        let err = call_service(Arc::new(svc), request()).await.unwrap_err();
        assert_eq!(err, GameError::EnemyCountMismatch { expected: 1, got: 0 });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn repeating_task_delivers_and_stops() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let svc = move |req: &PositionRequest| -> GameResult<PositionResponse> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(PositionResponse { generation: 0, enemies: req.enemies.iter().map(|e| Point::new(e.x + 1.0, e.y)).collect() })
        };
        let mut updater = PositionUpdater::spawn(&Handle::current(), svc, Duration::from_millis(5), request());

        let mut got = None;
        for _ in 0..200 {
            time::sleep(Duration::from_millis(5)).await;
            if let Some(resp) = updater.poll() {
                got = Some(resp);
                break;
            }
        }
        assert_eq!(got.unwrap().enemies, vec![Point::new(301.0, 300.0)]);

        updater.shutdown();
        time::sleep(Duration::from_millis(20)).await;
        assert!(!updater.is_running());
        let after = calls.load(Ordering::SeqCst);
        time::sleep(Duration::from_millis(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn failures_produce_no_responses() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let svc = move |_: &PositionRequest| -> GameResult<PositionResponse> {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(GameError::Service("unreachable".into()))
        };
        let mut updater = PositionUpdater::spawn(&Handle::current(), svc, Duration::from_millis(5), request());
        for _ in 0..100 {
            if calls.load(Ordering::SeqCst) >= 3 {
                break;
            }
            time::sleep(Duration::from_millis(5)).await;
        }
        assert!(calls.load(Ordering::SeqCst) >= 3);
        assert!(updater.poll().is_none());
        assert!(updater.is_running());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn shutdown_clears_in_flight_during_blocking_call() {
        let svc = |req: &PositionRequest| -> GameResult<PositionResponse> {
            std::thread::sleep(Duration::from_millis(200));
            Ok(PositionResponse { generation: 0, enemies: req.enemies.clone() })
        };
        let mut updater = PositionUpdater::spawn(&Handle::current(), svc, Duration::from_millis(5), request());
        for _ in 0..100 {
            if updater.in_flight() {
                break;
            }
            time::sleep(Duration::from_millis(2)).await;
        }
        assert!(updater.in_flight());

        updater.shutdown();
        assert!(!updater.in_flight());
        time::sleep(Duration::from_millis(20)).await;
        assert!(!updater.in_flight());
    }
}
