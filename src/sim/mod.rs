//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time step supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (by pair index, upper before lower)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod obstacles;
pub mod score;
pub mod state;
pub mod tick;

pub use body::PhysicsBody;
pub use collision::{Aabb, ObstacleHit, WorldBounds, first_hit, out_of_bounds, overlaps};
pub use obstacles::{Obstacle, ObstaclePair, ObstaclePool, Recycled, Role};
pub use score::ScoreTracker;
pub use state::{GameEvent, GamePhase, LossCause, Session};
pub use tick::tick;
