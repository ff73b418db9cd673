//! Data-driven game balance
//!
//! Every knob the simulation reads lives in [`Tuning`]. Values are checked once
//! by [`Tuning::validate`] before a game loop is built; nothing downstream
//! re-checks them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// A `[min, max]` range sampled uniformly (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }
}

impl From<(f32, f32)> for Range {
    fn from((min, max): (f32, f32)) -> Self {
        Self { min, max }
    }
}

/// Invalid tuning. Fatal: the game refuses to start.
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("world size must be positive, got {width}x{height}")]
    WorldSize { width: f32, height: f32 },
    #[error("{what} must be positive and finite, got {value}")]
    NotPositive { what: &'static str, value: f32 },
    #[error("pool needs at least one obstacle pair")]
    EmptyPool,
    #[error("{what} range is invalid: [{min}, {max}]")]
    BadRange {
        what: &'static str,
        min: f32,
        max: f32,
    },
    #[error("largest vertical gap {gap} plus margins {margin}x2 does not fit in world height {height}")]
    GapDoesNotFit { gap: f32, margin: f32, height: f32 },
    #[error("pipe height {height} leaves a way around the pipes; needs at least {needed}")]
    PipeTooShort { height: f32, needed: f32 },
    #[error("player start ({x}, {y}) is outside the world")]
    PlayerOutsideWorld { x: f32, y: f32 },
    #[error("failed to parse tuning: {0}")]
    Parse(String),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Player ===
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity_y: f32,
    /// Upward speed a flap sets (pixels/s, sign ignored)
    pub flap_velocity: f32,

    // === Obstacles ===
    /// Number of Upper/Lower pairs in the pool
    pub pipe_pairs: usize,
    pub pipe_width: f32,
    pub pipe_height: f32,
    /// Leftward scroll speed (pixels/s, sign ignored)
    pub pipe_scroll_speed: f32,
    pub pipe_vertical_gap: Range,
    pub pipe_horizontal_gap: Range,
    pub pipe_vertical_margin: f32,

    // === Loop ===
    pub restart_delay_ms: f32,
    pub max_frame_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            player_start_x: PLAYER_START_X,
            player_start_y: PLAYER_START_Y,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity_y: PLAYER_GRAVITY,
            flap_velocity: FLAP_VELOCITY,

            pipe_pairs: PIPE_PAIRS,
            pipe_width: PIPE_WIDTH,
            pipe_height: PIPE_HEIGHT,
            pipe_scroll_speed: PIPE_SCROLL_SPEED,
            pipe_vertical_gap: PIPE_VERTICAL_GAP_RANGE.into(),
            pipe_horizontal_gap: PIPE_HORIZONTAL_GAP_RANGE.into(),
            pipe_vertical_margin: PIPE_VERTICAL_MARGIN,

            restart_delay_ms: RESTART_DELAY_MS,
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

fn positive(what: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { what, value })
    }
}

fn range(what: &'static str, r: Range) -> Result<(), TuningError> {
    if r.is_valid() {
        Ok(())
    } else {
        Err(TuningError::BadRange {
            what,
            min: r.min,
            max: r.max,
        })
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the configuration invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.world_width.is_finite()
            && self.world_height.is_finite()
            && self.world_width > 0.0
            && self.world_height > 0.0)
        {
            return Err(TuningError::WorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }

        positive("player width", self.player_width)?;
        positive("player height", self.player_height)?;
        positive("gravity", self.gravity_y)?;
        positive("flap velocity", self.flap_velocity.abs())?;
        positive("pipe width", self.pipe_width)?;
        positive("pipe height", self.pipe_height)?;
        positive("pipe scroll speed", self.pipe_scroll_speed.abs())?;
        positive("restart delay", self.restart_delay_ms)?;
        positive("max frame time", self.max_frame_ms)?;

        if self.pipe_pairs == 0 {
            return Err(TuningError::EmptyPool);
        }

        range("vertical gap", self.pipe_vertical_gap)?;
        range("horizontal gap", self.pipe_horizontal_gap)?;
        if self.pipe_vertical_gap.min <= 0.0 {
            return Err(TuningError::BadRange {
                what: "vertical gap",
                min: self.pipe_vertical_gap.min,
                max: self.pipe_vertical_gap.max,
            });
        }
        if !(self.pipe_vertical_margin.is_finite() && self.pipe_vertical_margin >= 0.0) {
            return Err(TuningError::NotPositive {
                what: "pipe vertical margin",
                value: self.pipe_vertical_margin,
            });
        }

        let margin = self.pipe_vertical_margin;
        if self.pipe_vertical_gap.max + 2.0 * margin > self.world_height {
            return Err(TuningError::GapDoesNotFit {
                gap: self.pipe_vertical_gap.max,
                margin,
                height: self.world_height,
            });
        }

        // Deepest opening edge is height - margin - min gap from either side;
        // a shorter pipe would leave a passage between it and the wall
        let needed = self.world_height - margin - self.pipe_vertical_gap.min;
        if self.pipe_height < needed {
            return Err(TuningError::PipeTooShort {
                height: self.pipe_height,
                needed,
            });
        }

        let (x, y) = (self.player_start_x, self.player_start_y);
        if !(x >= 0.0
            && x + self.player_width <= self.world_width
            && y > 0.0
            && y + self.player_height < self.world_height)
        {
            return Err(TuningError::PlayerOutsideWorld { x, y });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_empty_pool_rejected() {
        let tuning = Tuning {
            pipe_pairs: 0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::EmptyPool));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let tuning = Tuning {
            pipe_horizontal_gap: Range::new(300.0, 200.0),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::BadRange {
                what: "horizontal gap",
                ..
            })
        ));
    }

    #[test]
    fn test_gap_must_fit_world() {
        let tuning = Tuning {
            world_height: 300.0,
            player_start_y: 100.0,
            pipe_vertical_gap: Range::new(100.0, 280.0),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_pipes_must_reach_the_walls() {
        let tuning = Tuning {
            pipe_height: 320.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::PipeTooShort {
                height: 320.0,
                needed: 430.0
            })
        );

        let tuning = Tuning {
            pipe_height: 430.0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn test_from_json_partial() {
        let tuning = Tuning::from_json(r#"{ "pipe_pairs": 2, "gravity_y": 600.0 }"#).unwrap();
        assert_eq!(tuning.pipe_pairs, 2);
        assert_eq!(tuning.gravity_y, 600.0);
        assert_eq!(tuning.world_height, WORLD_HEIGHT);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
        assert_eq!(
            Tuning::from_json(r#"{ "pipe_pairs": 0 }"#),
            Err(TuningError::EmptyPool)
        );
    }
}
