use std::cell::RefCell;
use std::rc::Rc;

use flap_runner::persistence::{BEST_SCORE_KEY, BestScoreStore, MemoryStore, StoreError};
use flap_runner::sim::*;
use flap_runner::tuning::Range;
use flap_runner::{GameLoop, Tuning};
use glam::Vec2;

const FRAME_MS: f32 = 1000.0 / 60.0;
const DT: f32 = FRAME_MS / 1000.0;

/// Store the test keeps a handle to after giving it to the game loop
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<MemoryStore>>);

impl BestScoreStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.0.borrow_mut().set(key, value)
    }
}

fn expire(pair: &mut ObstaclePair) {
    let x = -pair.upper.size.x;
    pair.upper.pos.x = x;
    pair.lower.pos.x = x;
}

#[test]
fn test_player_below_floor_is_over() {
    let world = WorldBounds {
        width: 800.0,
        height: 600.0,
    };
    let body = PhysicsBody::new(Vec2::new(80.0, 601.0), Vec2::new(34.0, 20.0), 400.0);
    assert!(out_of_bounds(&body, &world));

    let mut store = MemoryStore::new();
    let mut session = Session::new(&Tuning::default(), 1, &store);
    session.player = body;
    let mut events = Vec::new();
    tick(&mut session, &mut store, DT, &mut events);
    assert_eq!(session.phase, GamePhase::Over);
}

#[test]
fn test_two_pair_pool_recycles_first_pair() {
    let tuning = Tuning {
        pipe_pairs: 2,
        pipe_vertical_gap: Range::new(100.0, 150.0),
        pipe_horizontal_gap: Range::new(200.0, 300.0),
        ..Default::default()
    };
    let mut store = MemoryStore::new();
    let mut session = Session::new(&tuning, 2024, &store);
    expire(&mut session.pool.pairs_mut()[0]);

    let second_before = session.pool.pairs()[1].clone();
    let mut events = Vec::new();
    tick(&mut session, &mut store, DT, &mut events);

    assert_eq!(session.phase, GamePhase::Running);
    assert_eq!(session.score.current, 1);

    // Anchored on the only on-screen pair, which moved one frame left
    let anchor = second_before.x() - tuning.pipe_scroll_speed * DT;
    let first = &session.pool.pairs()[0];
    let offset = first.x() - anchor;
    assert!(
        (200.0 - 1e-3..=300.0 + 1e-3).contains(&offset),
        "offset {offset}"
    );
    let gap = first.gap();
    assert!((100.0 - 1e-3..=150.0 + 1e-3).contains(&gap), "gap {gap}");

    // Pair 2 untouched apart from scrolling
    let second = &session.pool.pairs()[1];
    assert_eq!(second.gap(), second_before.gap());
    assert!((second.x() - anchor).abs() < 1e-3);
}

#[test]
fn test_empty_store_gets_score_at_loss() {
    let shared = SharedStore::default();
    let mut store = shared.clone();
    let mut session = Session::new(&Tuning::default(), 5, &store);
    let mut events = Vec::new();

    for i in 0..5 {
        let n = session.pool.len();
        expire(&mut session.pool.pairs_mut()[i % n]);
        tick(&mut session, &mut store, DT, &mut events);
    }
    assert_eq!(session.score.current, 5);

    session.player.pos.y = 700.0;
    tick(&mut session, &mut store, DT, &mut events);
    assert_eq!(session.phase, GamePhase::Over);
    assert_eq!(shared.0.borrow().get(BEST_SCORE_KEY).unwrap(), Some(5));
    assert!(matches!(
        events.last(),
        Some(GameEvent::GameOver {
            score: 5,
            best: 5,
            ..
        })
    ));
}

#[test]
fn test_pause_mid_fall_freezes_player() {
    let mut game = GameLoop::new(Tuning::default(), Box::new(MemoryStore::new()), 11).unwrap();
    for i in 0..20 {
        game.update(i as f64 * FRAME_MS as f64, FRAME_MS);
    }
    assert!(game.session().player.vel.y > 0.0);

    game.on_pause();
    let frozen = game.session().player.clone();
    for i in 20..200 {
        game.update(i as f64 * FRAME_MS as f64, FRAME_MS);
    }
    assert_eq!(game.session().player, frozen);
    assert_eq!(game.phase(), GamePhase::Paused);

    game.on_resume();
    game.update(200.0 * FRAME_MS as f64, FRAME_MS);
    assert!(game.session().player.pos.y > frozen.pos.y);
}

#[test]
fn test_best_survives_restart_through_store() {
    let shared = SharedStore::default();
    shared.0.borrow_mut().set(BEST_SCORE_KEY, 3).unwrap();
    let mut game = GameLoop::new(Tuning::default(), Box::new(shared.clone()), 9).unwrap();
    assert_eq!(game.session().score.best, 3);

    // Fall to the floor and wait out the restart delay
    let mut frame = 0;
    while game.phase() == GamePhase::Running {
        game.update(frame as f64 * FRAME_MS as f64, FRAME_MS);
        frame += 1;
    }
    while game.phase() == GamePhase::Over {
        game.update(frame as f64 * FRAME_MS as f64, FRAME_MS);
        frame += 1;
    }

    assert_eq!(game.session().score.current, 0);
    assert_eq!(game.session().score.best, 3);
    assert_eq!(shared.0.borrow().get(BEST_SCORE_KEY).unwrap(), Some(3));
}

/// Store that can neither be read nor written
struct FailingStore;

impl BestScoreStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<u32>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: u32) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

/// Flap when sinking below the centre of the next opening
fn steer(game: &mut GameLoop) {
    let session = game.session();
    let player = session.player.bounds();
    let target = session
        .pool
        .pairs()
        .iter()
        .filter(|p| p.upper.bounds().right() > player.left())
        .min_by(|a, b| a.x().total_cmp(&b.x()))
        .map(|p| p.gap_center() + 15.0)
        .unwrap_or(300.0);
    if session.player.vel.y >= 0.0 && player.bottom() > target {
        game.on_flap();
    }
}

/// Play `seconds` with the autopilot; best must never drop and must end up
/// at the highest score reached
fn autopilot_best_is_monotonic(mut game: GameLoop, seconds: u32) {
    let mut highest = game.session().score.best;
    let mut last_best = highest;
    for frame in 0..60 * seconds {
        steer(&mut game);
        game.update(frame as f64 * FRAME_MS as f64, FRAME_MS);

        for event in game.drain_events() {
            if let GameEvent::ScoreChanged { current, .. } = event {
                highest = highest.max(current);
            }
        }
        let best = game.session().score.best;
        assert!(
            best >= last_best,
            "best went from {last_best} to {best} at frame {frame}"
        );
        last_best = best;
    }
    assert_eq!(game.session().score.best, highest);
}

#[test]
fn test_best_tracks_highest_score_across_runs() {
    let game = GameLoop::new(Tuning::default(), Box::new(MemoryStore::new()), 77).unwrap();
    autopilot_best_is_monotonic(game, 30);
}

#[test]
fn test_best_holds_across_restarts_with_failing_store() {
    for seed in [3, 77, 2024] {
        let game = GameLoop::new(Tuning::default(), Box::new(FailingStore), seed).unwrap();
        autopilot_best_is_monotonic(game, 40);
    }
}

#[test]
fn test_best_holds_when_stored_best_drops() {
    let shared = SharedStore::default();
    shared.0.borrow_mut().set(BEST_SCORE_KEY, 3).unwrap();
    let mut game = GameLoop::new(Tuning::default(), Box::new(shared.clone()), 9).unwrap();

    let mut frame = 0;
    while game.phase() == GamePhase::Running {
        game.update(frame as f64 * FRAME_MS as f64, FRAME_MS);
        frame += 1;
    }

    // Someone else rewrites the store while the restart is pending
    shared.0.borrow_mut().set(BEST_SCORE_KEY, 1).unwrap();
    while game.phase() == GamePhase::Over {
        game.update(frame as f64 * FRAME_MS as f64, FRAME_MS);
        frame += 1;
    }

    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!(game.session().score.current, 0);
    assert_eq!(game.session().score.best, 3);
}
