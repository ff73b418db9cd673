//! Obstacle pool: fixed Upper/Lower pipe pairs that scroll left and are
//! recycled to the right edge of the field once they leave the screen.
//!
//! Pairs are created once and never reallocated. Each slot owns exactly one
//! Upper and one Lower obstacle, so pairing never depends on scan order.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::{Range, Tuning};

/// Which half of a pair an obstacle is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Hangs from the ceiling; `pos.y` is its bottom edge
    Upper,
    /// Stands on the floor; `pos.y` is its top edge
    Lower,
}

impl Role {
    fn slot(self) -> usize {
        match self {
            Role::Upper => 0,
            Role::Lower => 1,
        }
    }
}

/// A single pipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge, and the gap-facing edge on y
    pub pos: Vec2,
    pub size: Vec2,
    pub role: Role,
    /// Pixels per second, shared by the whole pool
    pub velocity_x: f32,
}

impl Obstacle {
    fn new(role: Role, size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            role,
            velocity_x: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        let min = match self.role {
            Role::Upper => Vec2::new(self.pos.x, self.pos.y - self.size.y),
            Role::Lower => self.pos,
        };
        Aabb::new(min, self.size)
    }

    /// Fully scrolled past the left edge
    pub fn is_expired(&self) -> bool {
        self.bounds().right() <= 0.0
    }
}

/// One Upper + one Lower sharing an x-coordinate and a vertical gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub upper: Obstacle,
    pub lower: Obstacle,
}

impl ObstaclePair {
    pub fn x(&self) -> f32 {
        self.upper.pos.x
    }

    /// Opening between the two pipe ends
    pub fn gap(&self) -> f32 {
        self.lower.pos.y - self.upper.pos.y
    }

    /// Vertical centre of the opening
    pub fn gap_center(&self) -> f32 {
        self.upper.pos.y + self.gap() / 2.0
    }

    pub fn members(&self) -> [&Obstacle; 2] {
        [&self.upper, &self.lower]
    }
}

/// Geometry the pool needs from the tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Layout {
    pipe_size: Vec2,
    vertical_gap: Range,
    horizontal_gap: Range,
    margin: f32,
    world_height: f32,
}

/// Result of recycling one pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recycled {
    pub pair: usize,
    pub x: f32,
    pub gap: f32,
}

/// Fixed-size pool of obstacle pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    pairs: Vec<ObstaclePair>,
    layout: Layout,
}

impl ObstaclePool {
    /// Build and lay out `tuning.pipe_pairs` pairs left to right, then start
    /// them scrolling. Expects validated tuning.
    pub fn new<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        let layout = Layout {
            pipe_size: Vec2::new(tuning.pipe_width, tuning.pipe_height),
            vertical_gap: tuning.pipe_vertical_gap,
            horizontal_gap: tuning.pipe_horizontal_gap,
            margin: tuning.pipe_vertical_margin,
            world_height: tuning.world_height,
        };

        let mut pool = Self {
            pairs: Vec::with_capacity(tuning.pipe_pairs),
            layout,
        };

        for index in 0..tuning.pipe_pairs {
            pool.pairs.push(ObstaclePair {
                upper: Obstacle::new(Role::Upper, pool.layout.pipe_size),
                lower: Obstacle::new(Role::Lower, pool.layout.pipe_size),
            });
            pool.reposition(index, rng);
        }

        pool.set_velocity_x(-tuning.pipe_scroll_speed.abs());
        pool
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    /// Mutable access to the slots; the slice length (pool size) is fixed
    pub fn pairs_mut(&mut self) -> &mut [ObstaclePair] {
        &mut self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.pairs.iter().flat_map(|p| p.members())
    }

    /// Apply one scroll velocity to every obstacle (0 freezes the field)
    pub fn set_velocity_x(&mut self, velocity_x: f32) {
        for pair in &mut self.pairs {
            pair.upper.velocity_x = velocity_x;
            pair.lower.velocity_x = velocity_x;
        }
    }

    /// Move every obstacle by its velocity
    pub fn advance(&mut self, dt: f32) {
        for pair in &mut self.pairs {
            pair.upper.pos.x += pair.upper.velocity_x * dt;
            pair.lower.pos.x += pair.lower.velocity_x * dt;
        }
    }

    /// Largest obstacle x in the field, never less than 0
    pub fn rightmost_x(&self) -> f32 {
        self.iter_obstacles().fold(0.0, |acc, o| acc.max(o.pos.x))
    }

    /// Recycle every pair whose two members have both scrolled off the left
    /// edge. Expired members are buffered per slot; a slot is repositioned
    /// only once its Upper and Lower are both in the buffer.
    pub fn recycle_expired<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Recycled> {
        let expired: Vec<(usize, Role)> = self
            .pairs
            .iter()
            .enumerate()
            .flat_map(|(index, pair)| {
                pair.members()
                    .into_iter()
                    .filter(|o| o.is_expired())
                    .map(move |o| (index, o.role))
            })
            .collect();

        let mut buffered = vec![[false; 2]; self.pairs.len()];
        let mut recycled = Vec::new();
        for (index, role) in expired {
            buffered[index][role.slot()] = true;
            if buffered[index] == [true, true] {
                self.reposition(index, rng);
                let pair = &self.pairs[index];
                log::debug!(
                    "Recycled pair {} to x={:.1} (gap {:.1})",
                    index,
                    pair.x(),
                    pair.gap()
                );
                recycled.push(Recycled {
                    pair: index,
                    x: pair.x(),
                    gap: pair.gap(),
                });
            }
        }
        recycled
    }

    /// Move a pair to the right of the field with fresh random geometry
    pub fn reposition<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        let Layout {
            vertical_gap,
            horizontal_gap,
            margin,
            world_height,
            ..
        } = self.layout;

        let x = self.rightmost_x() + rng.random_range(horizontal_gap.min..=horizontal_gap.max);
        let gap = rng.random_range(vertical_gap.min..=vertical_gap.max);
        let top = rng.random_range(margin..=(world_height - margin - gap).max(margin));

        let pair = &mut self.pairs[index];
        pair.upper.pos = Vec2::new(x, top);
        pair.lower.pos = Vec2::new(x, top + gap);
    }
}
