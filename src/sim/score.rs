//! Current score and persisted best score

use serde::{Deserialize, Serialize};

use crate::persistence::{BEST_SCORE_KEY, BestScoreStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub current: u32,
    /// Highest score seen this session (never decreases)
    pub best: u32,
}

impl ScoreTracker {
    /// Start a session with the stored best. An unreadable store counts as
    /// no best score.
    pub fn load(store: &dyn BestScoreStore) -> Self {
        let best = match store.get(BEST_SCORE_KEY) {
            Ok(best) => best.unwrap_or(0),
            Err(e) => {
                log::warn!("Could not read best score, starting from 0: {}", e);
                0
            }
        };
        Self { current: 0, best }
    }

    /// One pair cleared
    pub fn increment(&mut self, store: &mut dyn BestScoreStore) {
        self.current += 1;
        self.best = self.best.max(self.current);
        self.persist_best_if_needed(store);
    }

    /// Write the current score as the stored best if it beats it. The highest
    /// value always wins: a failed read falls back to this tracker's best, so
    /// a score below it is never written over a better one.
    pub fn persist_best_if_needed(&mut self, store: &mut dyn BestScoreStore) {
        let stored = match store.get(BEST_SCORE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                None
            }
        };

        let should_write = match stored {
            Some(stored) => self.current > stored,
            None => self.current >= self.best,
        };
        if !should_write {
            return;
        }

        if let Err(e) = store.set(BEST_SCORE_KEY, self.current) {
            log::warn!("Could not save best score {}: {}", self.current, e);
        }
    }

    /// Back to zero for a new run; best is untouched
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Tracker for the next run. Keeps the higher of this tracker's best and
    /// the stored one, so a store that lost writes cannot lower it.
    pub fn carry_over(&self, store: &dyn BestScoreStore) -> Self {
        let stored = Self::load(store);
        let mut next = *self;
        next.reset();
        next.best = next.best.max(stored.best);
        next
    }
}
