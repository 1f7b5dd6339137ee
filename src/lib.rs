//! Raycasting maze walker and top-down shooter demos.
//!
//! Modules:
//! - `core`: Map, entities, input and owned game state
//! - `render`: Framebuffer, textures, ray caster and billboards
//! - `remote`: Enemy position-update collaborator and its periodic task
//! - `shooter`: Top-down shooter state and collisions
//! - `audio_manager`: Optional shot sound

pub mod audio_manager;
pub mod config;
pub mod core;
pub mod error;
pub mod remote;
pub mod render;
pub mod shooter;

pub use crate::config::GameConfig;
pub use crate::error::{GameError, GameResult};
