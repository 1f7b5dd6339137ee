//! Core game types and logic (map, entities, input, state).
//!
//! Re-exports:
//! - `maze`: Grid map loading and lookup
//! - `player`: Player data and movement
//! - `enemy`: Enemy positions and their wire form
//! - `process_events`: Keyboard to `Action` mapping
//! - `state`: Owned session state for the raycaster

pub mod enemy;
pub mod maze;
pub mod player;
pub mod process_events;
pub mod state;
