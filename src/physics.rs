//! Physics engine interface
//!
//! Rigid-body dynamics, rendering and collision detection live in an external
//! engine. The game only needs to create bodies, push the ball around, flip
//! gravity and unpin walls, so that is all this trait asks for.

use std::fmt;

use glam::Vec2;

use crate::layout::{BodyLabel, BodySpec, Scene, WorldRect};

/// The subset of a 2D physics world the game drives
pub trait PhysicsWorld {
    type Handle: Copy + Eq + fmt::Debug;

    fn add_rect(&mut self, rect: &WorldRect, label: BodyLabel, is_static: bool) -> Self::Handle;

    /// Dynamic circle
    fn add_circle(&mut self, center: Vec2, radius: f32, label: BodyLabel) -> Self::Handle;

    fn velocity(&self, body: Self::Handle) -> Vec2;

    fn set_velocity(&mut self, body: Self::Handle, velocity: Vec2);

    fn set_gravity(&mut self, gravity: Vec2);

    fn set_static(&mut self, body: Self::Handle, is_static: bool);

    /// Remove every body
    fn clear(&mut self);
}

/// Handles to the bodies game logic touches after creation
#[derive(Debug, Clone)]
pub struct SceneHandles<H> {
    pub walls: Vec<H>,
    pub ball: H,
}

/// Create every body of `scene` in `world`, in [`Scene::bodies`] order
pub fn populate<W: PhysicsWorld>(world: &mut W, scene: &Scene) -> SceneHandles<W::Handle> {
    let mut walls = Vec::with_capacity(scene.walls.len());
    let mut ball = None;

    for body in scene.bodies() {
        match body {
            BodySpec::Rect {
                rect,
                label,
                is_static,
            } => {
                let handle = world.add_rect(&rect, label, is_static);
                if label == BodyLabel::Wall {
                    walls.push(handle);
                }
            }
            BodySpec::Circle {
                center,
                radius,
                label,
            } => {
                ball = Some(world.add_circle(center, radius, label));
            }
        }
    }

    // Scene::bodies always ends with the ball
    let ball = match ball {
        Some(ball) => ball,
        None => world.add_circle(scene.ball_center, scene.ball_radius, BodyLabel::Ball),
    };
    SceneHandles { walls, ball }
}
