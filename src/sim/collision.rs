//! Axis-aligned collision tests
//!
//! Screen coordinates: x grows right, y grows down, rectangles are anchored
//! at their top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;
use super::obstacles::{ObstaclePool, Role};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }
}

/// Playfield dimensions, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

/// Which obstacle the player hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleHit {
    pub pair: usize,
    pub role: Role,
}

/// World-boundary loss: touching the floor or the ceiling
pub fn out_of_bounds(body: &PhysicsBody, world: &WorldBounds) -> bool {
    let bounds = body.bounds();
    bounds.bottom() >= world.height || bounds.top() <= 0.0
}

/// Rectangle intersection. Edges that merely touch do not overlap.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    !(a.right() <= b.left()
        || a.bottom() <= b.top()
        || a.left() >= b.right()
        || a.top() >= b.bottom())
}

/// First obstacle (pair order, upper before lower) the player overlaps
pub fn first_hit(player: &PhysicsBody, pool: &ObstaclePool) -> Option<ObstacleHit> {
    let bounds = player.bounds();
    pool.pairs().iter().enumerate().find_map(|(pair, p)| {
        [&p.upper, &p.lower]
            .into_iter()
            .find(|o| overlaps(&bounds, &o.bounds()))
            .map(|o| ObstacleHit { pair, role: o.role })
    })
}
