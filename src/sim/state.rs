//! Session state and core simulation types
//!
//! A [`Session`] owns everything one run mutates. Restarting builds a new one.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;
use super::collision::{ObstacleHit, WorldBounds};
use super::obstacles::ObstaclePool;
use super::score::ScoreTracker;
use crate::persistence::BestScoreStore;
use crate::tuning::Tuning;

/// Run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Suspended by the player; nothing moves
    Paused,
    /// Lost; waiting for the restart timer
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Touched the floor or the ceiling
    OutOfBounds,
    Collision(ObstacleHit),
}

/// Notifications for the render/audio layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    PairRecycled { pair: usize, x: f32, gap: f32 },
    ScoreChanged { current: u32, best: u32 },
    GameOver { cause: LossCause, score: u32, best: u32 },
    Paused,
    Resumed,
    Restarted { seed: u64 },
}

/// One run: player, obstacles, score and RNG
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    pub world: WorldBounds,
    pub player: PhysicsBody,
    pub pool: ObstaclePool,
    pub score: ScoreTracker,
    pub phase: GamePhase,
    /// Simulation steps taken while running
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    flap_velocity: f32,
}

impl Session {
    /// Fresh run from validated tuning. The best score is read from `store`.
    pub fn new(tuning: &Tuning, seed: u64, store: &dyn BestScoreStore) -> Self {
        Self::with_score(tuning, seed, ScoreTracker::load(store))
    }

    /// The run that replaces this one: new seed from this run's RNG, score
    /// back to 0, best carried over
    pub fn restart(&mut self, tuning: &Tuning, store: &dyn BestScoreStore) -> Self {
        let seed = self.next_seed();
        Self::with_score(tuning, seed, self.score.carry_over(store))
    }

    fn with_score(tuning: &Tuning, seed: u64, score: ScoreTracker) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = ObstaclePool::new(tuning, &mut rng);
        let player = PhysicsBody::new(
            Vec2::new(tuning.player_start_x, tuning.player_start_y),
            Vec2::new(tuning.player_width, tuning.player_height),
            tuning.gravity_y,
        );

        Self {
            seed,
            world: WorldBounds {
                width: tuning.world_width,
                height: tuning.world_height,
            },
            player,
            pool,
            score,
            phase: GamePhase::Running,
            time_ticks: 0,
            rng,
            flap_velocity: tuning.flap_velocity,
        }
    }

    /// Flap the player. Ignored unless running.
    pub fn flap(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.player.flap(self.flap_velocity);
        true
    }

    /// Enter `Over`: freeze all motion and save the best score
    pub fn game_over(&mut self, cause: LossCause, store: &mut dyn BestScoreStore) -> GameEvent {
        self.phase = GamePhase::Over;
        self.player.freeze();
        self.pool.set_velocity_x(0.0);
        self.score.persist_best_if_needed(store);

        log::info!(
            "Game over ({:?}) after {} ticks, score {} (best {})",
            cause,
            self.time_ticks,
            self.score.current,
            self.score.best
        );

        GameEvent::GameOver {
            cause,
            score: self.score.current,
            best: self.score.best,
        }
    }

    /// Seed for the run that replaces this one
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}
