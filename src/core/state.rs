//! Explicit owned game state for the raycaster demo.
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::enemy::{Enemy, Point};
use crate::core::maze::Maze;
use crate::core::player::Player;
use crate::core::process_events::Action;
use crate::error::{GameError, GameResult};
use crate::remote::PositionRequest;

/// Mutable session state. Only the frame loop touches it.
pub struct GameState {
    pub maze: Maze,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub tile_size: f32,
    pub move_speed: f32,
    pub rotate_speed: f32,
}

impl GameState {
    pub fn new(maze: Maze, cfg: &GameConfig) -> Self {
        let t = cfg.tile_size;
        let (px, py) = cfg.player_start;
        let enemies = cfg
            .enemy_starts
            .iter()
            .map(|&(ex, ey)| Enemy::new(ex * t, ey * t))
            .collect();
        Self {
            maze,
            player: Player::new(px * t, py * t, 0.0, cfg.start_health, cfg.start_ammo),
            enemies,
            tile_size: t,
            move_speed: cfg.move_speed,
            rotate_speed: cfg.rotate_speed,
        }
    }

    /// Applies one input action. Returns true when a shot was fired.
    pub fn apply(&mut self, action: Action) -> bool {
        let maze = &self.maze;
        let tile = self.tile_size;
        match action {
            Action::Forward => {
                self.player.advance(self.move_speed, |x, y| maze.is_wall_at(x, y, tile));
            }
            Action::Backward => {
                self.player.advance(-self.move_speed, |x, y| maze.is_wall_at(x, y, tile));
            }
            Action::TurnLeft => self.player.rotate(-self.rotate_speed),
            Action::TurnRight => self.player.rotate(self.rotate_speed),
            Action::Fire => {
                let fired = self.player.try_fire();
                debug!(fired, ammo = self.player.ammo, "Fire");
                return fired;
            }
        }
        false
    }

    pub fn enemy_points(&self) -> Vec<Point> {
        self.enemies.iter().map(|e| e.pos.into()).collect()
    }

    /// The enemy set never changes size here, so every request shares
    /// generation 0.
    pub fn position_request(&self) -> PositionRequest {
        PositionRequest {
            generation: 0,
            player: self.player.pos.into(),
            enemies: self.enemy_points(),
        }
    }

    /// Replaces the enemy collection wholesale. A response with a different
    /// count is rejected and the current enemies are kept.
    pub fn replace_enemies(&mut self, positions: Vec<Point>) -> GameResult<()> {
        if positions.len() != self.enemies.len() {
            return Err(GameError::EnemyCountMismatch {
                expected: self.enemies.len(),
                got: positions.len(),
            });
        }
        self.enemies = positions.into_iter().map(Enemy::from).collect();
        info!(count = self.enemies.len(), "Enemy positions replaced");
        Ok(())
    }
}
