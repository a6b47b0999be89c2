//! Maze Roll - A perfect-maze ball rolling game
//!
//! Core modules:
//! - `maze`: Deterministic perfect-maze generation (randomized depth-first traversal)
//! - `layout`: Maze-to-world mapping (wall, goal and ball placement)
//! - `physics`: Interface to the external physics engine
//! - `sim`: Game glue (input nudges, win detection, collapse)
//! - `settings`: Player-facing configuration

pub mod error;
pub mod layout;
pub mod maze;
pub mod physics;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use maze::{Cell, Direction, Maze, MazeGenerator, generate};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (world units = canvas pixels)
    pub const ARENA_WIDTH: f32 = 600.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Default grid size
    pub const DEFAULT_ROWS: usize = 6;
    pub const DEFAULT_COLUMNS: usize = 6;

    /// Wall and border thickness
    pub const WALL_THICKNESS: f32 = 2.0;

    /// Goal side length as a fraction of the cell
    pub const GOAL_SIZE_FRACTION: f32 = 0.5;
    /// Ball radius as a fraction of the smaller cell side
    pub const BALL_RADIUS_FRACTION: f32 = 0.25;

    /// Velocity added per key press
    pub const NUDGE_SPEED: f32 = 3.0;
    /// Downward gravity switched on when the ball reaches the goal
    pub const WIN_GRAVITY: f32 = 1.0;
}
