//! Game state
//!
//! Owns the maze, its layout and the physics world built from it. The maze
//! is frozen once generated; only the world and the phase change afterwards.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{BodyLabel, Layout, Scene};
use crate::maze::{Direction, Maze, MazeGenerator};
use crate::physics::{PhysicsWorld, SceneHandles, populate};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball rolling, walls pinned
    Playing,
    /// Goal reached, maze collapsing
    Won,
}

/// Transitions reported back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Won,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// One maze run
pub struct Game<W: PhysicsWorld> {
    /// Seed the maze was generated from
    pub seed: u64,
    pub maze: Maze,
    pub layout: Layout,
    pub phase: GamePhase,
    nudge_speed: f32,
    win_gravity: f32,
    world: W,
    handles: SceneHandles<W::Handle>,
}

impl<W: PhysicsWorld> Game<W> {
    /// Generate a maze and build it into `world`
    pub fn new(settings: &Settings, mut world: W, seed: u64) -> Result<Self> {
        settings.validate()?;

        let (maze, layout) = build_maze(settings, seed)?;
        let handles = build_world(&mut world, &maze, &layout);
        log::info!(
            "Maze {}x{} ready (seed {}), {} walls",
            maze.rows(),
            maze.columns(),
            seed,
            handles.walls.len()
        );

        Ok(Self {
            seed,
            maze,
            layout,
            phase: GamePhase::Playing,
            nudge_speed: settings.nudge_speed,
            win_gravity: settings.win_gravity,
            world,
            handles,
        })
    }

    /// Throw the current maze away and start over with a new one
    pub fn restart(&mut self, settings: &Settings, seed: u64) -> Result<()> {
        settings.validate()?;

        let (maze, layout) = build_maze(settings, seed)?;
        self.world.clear();
        self.handles = build_world(&mut self.world, &maze, &layout);
        self.maze = maze;
        self.layout = layout;
        self.seed = seed;
        self.phase = GamePhase::Playing;
        self.nudge_speed = settings.nudge_speed;
        self.win_gravity = settings.win_gravity;
        log::info!("Game restarted with seed: {}", seed);
        Ok(())
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn ball(&self) -> W::Handle {
        self.handles.ball
    }

    pub fn walls(&self) -> &[W::Handle] {
        &self.handles.walls
    }

    /// Add a velocity kick to the ball. Screen y grows downward, so up is -y.
    pub fn nudge(&mut self, dir: Direction) {
        let (dr, dc) = dir.offset();
        let kick = Vec2::new(dc as f32, dr as f32) * self.nudge_speed;
        let ball = self.handles.ball;
        let vel = self.world.velocity(ball);
        self.world.set_velocity(ball, vel + kick);
    }

    /// Feed the label pairs of newly started contacts. Returns `Some(Won)` on
    /// the first ball-goal contact; later ones are ignored.
    pub fn on_collision_start(&mut self, pairs: &[(BodyLabel, BodyLabel)]) -> Option<GameEvent> {
        if self.phase == GamePhase::Won {
            return None;
        }
        let hit_goal = pairs.iter().any(|&pair| {
            matches!(
                pair,
                (BodyLabel::Ball, BodyLabel::Goal) | (BodyLabel::Goal, BodyLabel::Ball)
            )
        });
        if !hit_goal {
            return None;
        }

        self.collapse();
        Some(GameEvent::Won)
    }

    /// Win effect: gravity on, every maze wall released
    fn collapse(&mut self) {
        self.phase = GamePhase::Won;
        self.world.set_gravity(Vec2::new(0.0, self.win_gravity));
        for &wall in &self.handles.walls {
            self.world.set_static(wall, false);
        }
        log::info!("Goal reached, releasing {} walls", self.handles.walls.len());
    }
}

fn build_maze(settings: &Settings, seed: u64) -> Result<(Maze, Layout)> {
    let mut rng = RngState::new(seed).to_rng();
    let maze = MazeGenerator::new(settings.rows, settings.columns)?.generate(&mut rng);
    let layout = Layout::for_maze(&maze, settings.width, settings.height)?;
    Ok((maze, layout))
}

fn build_world<W: PhysicsWorld>(world: &mut W, maze: &Maze, layout: &Layout) -> SceneHandles<W::Handle> {
    world.set_gravity(Vec2::ZERO);
    populate(world, &Scene::build(maze, layout))
}
