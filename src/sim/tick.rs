//! Per-frame input handling
//!
//! The physics engine steps itself; each frame the game only applies the
//! queued key presses and inspects the contacts that started since the last
//! frame.

use super::state::{Game, GameEvent};
use crate::layout::BodyLabel;
use crate::maze::Direction;
use crate::physics::PhysicsWorld;

/// Everything that happened since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Arrow key presses, in order
    pub nudges: Vec<Direction>,
    /// Label pairs of contacts that started this frame
    pub collisions: Vec<(BodyLabel, BodyLabel)>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.nudges.is_empty() && self.collisions.is_empty()
    }

    /// Drain for the next frame
    pub fn take(&mut self) -> TickInput {
        std::mem::take(self)
    }
}

/// Apply one frame of input
pub fn tick<W: PhysicsWorld>(game: &mut Game<W>, input: &TickInput) -> Option<GameEvent> {
    for &dir in &input.nudges {
        game.nudge(dir);
    }
    game.on_collision_start(&input.collisions)
}

/// Map a `KeyboardEvent.key` value to a nudge direction
pub fn key_to_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => Some(Direction::Up),
        "ArrowRight" => Some(Direction::Right),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        _ => None,
    }
}
