//! Enemy position-update collaborator.
//!
//! The service itself is opaque: it receives the player position and the
//! current enemy positions and answers with replacement positions, one per
//! enemy in the same order. Requests carry a generation number that the
//! updater stamps onto the matching response, so a caller whose enemy set
//! changed meanwhile can recognise the answer as stale.
use serde::{Deserialize, Serialize};

use crate::core::enemy::Point;
use crate::error::GameResult;

pub mod stub;
pub mod updater;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionRequest {
    #[serde(default)]
    pub generation: u64,
    pub player: Point,
    pub enemies: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionResponse {
    #[serde(default)]
    pub generation: u64,
    pub enemies: Vec<Point>,
}

/// A blocking call to the position service. Runs off the frame thread.
pub trait PositionService: Send + Sync + 'static {
    fn update_enemy_positions(&self, request: &PositionRequest) -> GameResult<PositionResponse>;
}

impl<F> PositionService for F
where
    F: Fn(&PositionRequest) -> GameResult<PositionResponse> + Send + Sync + 'static,
{
    fn update_enemy_positions(&self, request: &PositionRequest) -> GameResult<PositionResponse> {
        self(request)
    }
}
