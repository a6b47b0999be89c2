//! Game simulation glue
//!
//! Gameplay rules that sit on top of the physics engine:
//! - Seeded maze generation per game
//! - Arrow keys nudge the ball
//! - Ball touching the goal wins and collapses the maze
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Game, GameEvent, GamePhase, RngState};
pub use tick::{TickInput, key_to_direction, tick};
