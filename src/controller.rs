//! Frame-driven game loop
//!
//! [`GameLoop`] is what the host (render loop, input wiring) talks to. It owns
//! the current [`Session`] and the best-score store, turns input commands into
//! session changes, steps the simulation once per frame, and rebuilds the
//! session when the post-loss restart timer runs out.

use serde::{Deserialize, Serialize};

use crate::persistence::BestScoreStore;
use crate::sim::{GameEvent, GamePhase, Session, tick};
use crate::tuning::{Tuning, TuningError};

/// Discrete input from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Flap,
    Pause,
    Resume,
}

/// Pending one-shot restart
#[derive(Debug, Clone, Copy)]
struct RestartTimer {
    remaining_ms: f32,
}

pub struct GameLoop {
    tuning: Tuning,
    store: Box<dyn BestScoreStore>,
    session: Session,
    restart: Option<RestartTimer>,
    events: Vec<GameEvent>,
}

impl GameLoop {
    /// Validate the tuning and start the first session
    pub fn new(
        tuning: Tuning,
        store: Box<dyn BestScoreStore>,
        seed: u64,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        let session = Session::new(&tuning, seed, store.as_ref());
        log::info!(
            "Session started (seed {}, {} pipe pairs, best {})",
            seed,
            tuning.pipe_pairs,
            session.score.best
        );

        Ok(Self {
            tuning,
            store,
            session,
            restart: None,
            events: Vec::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Milliseconds left before the pending restart, if any
    pub fn restart_pending(&self) -> Option<f32> {
        self.restart.map(|t| t.remaining_ms)
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Flap => self.on_flap(),
            Command::Pause => self.on_pause(),
            Command::Resume => self.on_resume(),
        }
    }

    pub fn on_flap(&mut self) {
        if self.session.flap() {
            self.events.push(GameEvent::Flapped);
        }
    }

    pub fn on_pause(&mut self) {
        if self.session.phase == GamePhase::Running {
            self.session.phase = GamePhase::Paused;
            self.events.push(GameEvent::Paused);
            log::info!("Paused");
        }
    }

    pub fn on_resume(&mut self) {
        if self.session.phase == GamePhase::Paused {
            self.session.phase = GamePhase::Running;
            self.events.push(GameEvent::Resumed);
            log::info!("Resumed");
        }
    }

    /// Per-frame entry point. `delta_ms` is the frame time and is the only
    /// clock the simulation integrates with; it is clamped to
    /// `[0, max_frame_ms]`. The host timestamp is accepted for scheduler
    /// compatibility and not used.
    pub fn update(&mut self, _time_ms: f64, delta_ms: f32) {
        let delta_ms = if delta_ms.is_finite() {
            delta_ms.clamp(0.0, self.tuning.max_frame_ms)
        } else {
            0.0
        };

        match self.session.phase {
            GamePhase::Paused => {}
            GamePhase::Running => {
                tick(
                    &mut self.session,
                    self.store.as_mut(),
                    delta_ms / 1000.0,
                    &mut self.events,
                );
                if self.session.phase == GamePhase::Over {
                    self.schedule_restart();
                }
            }
            GamePhase::Over => self.run_restart_timer(delta_ms),
        }
    }

    /// Arm the restart timer. A second call while one is pending does nothing.
    fn schedule_restart(&mut self) {
        if self.restart.is_some() {
            return;
        }
        log::debug!("Restart in {} ms", self.tuning.restart_delay_ms);
        self.restart = Some(RestartTimer {
            remaining_ms: self.tuning.restart_delay_ms,
        });
    }

    fn run_restart_timer(&mut self, delta_ms: f32) {
        let Some(timer) = self.restart.as_mut() else {
            // Over without a timer only happens if the session was ended
            // outside `update`; arm one so the game still comes back.
            self.schedule_restart();
            return;
        };

        timer.remaining_ms -= delta_ms;
        if timer.remaining_ms <= 0.0 {
            self.restart = None;
            self.restart_session();
        }
    }

    /// Replace the session with a fresh one (new layout, score 0, best kept)
    fn restart_session(&mut self) {
        self.session = self.session.restart(&self.tuning, self.store.as_ref());
        let seed = self.session.seed;
        self.events.push(GameEvent::Restarted { seed });
        log::info!(
            "Restarted (seed {}, best {})",
            seed,
            self.session.score.best
        );
    }
}
