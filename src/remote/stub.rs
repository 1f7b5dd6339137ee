//! Local stand-in for the remote service: every enemy drifts toward the
//! player with a little jitter.
use rand::Rng;

use crate::core::enemy::Point;
use crate::error::GameResult;
use crate::remote::{PositionRequest, PositionResponse, PositionService};

pub struct WanderService {
    pub step: f32,
    pub jitter: f32,
}

impl Default for WanderService {
    fn default() -> Self {
        Self { step: 8.0, jitter: 4.0 }
    }
}

impl PositionService for WanderService {
    fn update_enemy_positions(&self, request: &PositionRequest) -> GameResult<PositionResponse> {
        let mut rng = rand::thread_rng();
        let p = request.player;
        let enemies = request
            .enemies
            .iter()
            .map(|e| {
                let dx = p.x - e.x;
                let dy = p.y - e.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let (ux, uy) = if dist > f32::EPSILON { (dx / dist, dy / dist) } else { (0.0, 0.0) };
                let step = self.step.min(dist);
                let jx = if self.jitter > 0.0 { rng.gen_range(-self.jitter..=self.jitter) } else { 0.0 };
                let jy = if self.jitter > 0.0 { rng.gen_range(-self.jitter..=self.jitter) } else { 0.0 };
                Point::new(e.x + ux * step + jx, e.y + uy * step + jy)
            })
            .collect();
        Ok(PositionResponse { generation: request.generation, enemies })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_one_to_one_in_order() {
        let svc = WanderService { step: 10.0, jitter: 0.0 };
        let req = PositionRequest {
            generation: 0,
            player: Point::new(0.0, 0.0),
            enemies: vec![Point::new(100.0, 0.0), Point::new(0.0, 50.0)],
        };
        let resp = svc.update_enemy_positions(&req).unwrap();
        assert_eq!(resp.enemies, vec![Point::new(90.0, 0.0), Point::new(0.0, 40.0)]);
    }

    #[test]
    fn never_overshoots_the_player() {
        let svc = WanderService { step: 10.0, jitter: 0.0 };
        let req = PositionRequest { generation: 0, player: Point::new(0.0, 0.0), enemies: vec![Point::new(3.0, 4.0)] };
        let resp = svc.update_enemy_positions(&req).unwrap();
        assert!(resp.enemies[0].x.abs() < 1e-5 && resp.enemies[0].y.abs() < 1e-5);
    }
}
