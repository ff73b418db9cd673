//! Flap Runner - A side-scrolling flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, obstacle recycling, scoring)
//! - `controller`: Per-frame game loop, run state machine and restart timer
//! - `persistence`: Best-score key/value stores
//! - `tuning`: Data-driven game balance

pub mod controller;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use controller::{Command, GameLoop};
pub use persistence::{BEST_SCORE_KEY, BestScoreStore, MemoryStore, StoreError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player spawn position (top-left corner)
    pub const PLAYER_START_X: f32 = 80.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Downward acceleration on the player (pixels/s²)
    pub const PLAYER_GRAVITY: f32 = 400.0;
    /// Upward speed set by a flap (pixels/s)
    pub const FLAP_VELOCITY: f32 = 250.0;

    /// Number of Upper/Lower pipe pairs kept in the field
    pub const PIPE_PAIRS: usize = 4;
    /// Pipe sprite size
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_HEIGHT: f32 = 480.0;
    /// Leftward scroll speed of every pipe (pixels/s)
    pub const PIPE_SCROLL_SPEED: f32 = 200.0;
    /// Gap between upper and lower pipe of a pair
    pub const PIPE_VERTICAL_GAP_RANGE: (f32, f32) = (150.0, 250.0);
    /// Horizontal distance from the rightmost pipe to a recycled pair
    pub const PIPE_HORIZONTAL_GAP_RANGE: (f32, f32) = (450.0, 500.0);
    /// Minimum distance between a pipe end and the top/bottom of the world
    pub const PIPE_VERTICAL_MARGIN: f32 = 20.0;

    /// Delay between game over and the automatic restart (ms)
    pub const RESTART_DELAY_MS: f32 = 1000.0;
    /// Longest frame delta the simulation will integrate in one update (ms)
    pub const MAX_FRAME_MS: f32 = 100.0;
}
