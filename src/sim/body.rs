//! Point-mass physics for the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Position, velocity and gravity for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// Top-left corner (pixels)
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Downward acceleration (pixels/s²)
    pub gravity_y: f32,
}

impl PhysicsBody {
    pub fn new(pos: Vec2, size: Vec2, gravity_y: f32) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            gravity_y,
        }
    }

    /// Semi-implicit Euler step: velocity first, then position
    pub fn integrate(&mut self, dt: f32) {
        self.vel.y += self.gravity_y * dt;
        self.pos += self.vel * dt;
    }

    /// Overwrite vertical velocity with an upward impulse. Flaps never stack.
    pub fn flap(&mut self, magnitude: f32) {
        self.vel.y = -magnitude.abs();
    }

    /// Zero the velocity (physics pause on game over)
    pub fn freeze(&mut self) {
        self.vel = Vec2::ZERO;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
