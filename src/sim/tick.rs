//! Simulation step
//!
//! Order within a step is fixed: integrate, boundary loss, obstacle loss,
//! then recycle and score. A step that ends the run never recycles or scores.

use super::collision::{first_hit, out_of_bounds};
use super::state::{GameEvent, GamePhase, LossCause, Session};
use crate::persistence::BestScoreStore;

/// Advance a running session by `dt` seconds. No-op unless `Running`.
pub fn tick(
    session: &mut Session,
    store: &mut dyn BestScoreStore,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    if session.phase != GamePhase::Running {
        return;
    }

    session.time_ticks += 1;
    session.player.integrate(dt);
    session.pool.advance(dt);

    if out_of_bounds(&session.player, &session.world) {
        events.push(session.game_over(LossCause::OutOfBounds, store));
        return;
    }

    if let Some(hit) = first_hit(&session.player, &session.pool) {
        events.push(session.game_over(LossCause::Collision(hit), store));
        return;
    }

    for recycled in session.pool.recycle_expired(&mut session.rng) {
        events.push(GameEvent::PairRecycled {
            pair: recycled.pair,
            x: recycled.x,
            gap: recycled.gap,
        });
        session.score.increment(store);
        events.push(GameEvent::ScoreChanged {
            current: session.score.current,
            best: session.score.best,
        });
    }
}
