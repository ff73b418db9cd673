//! Flap Runner entry point
//!
//! Native builds run a headless session at 60 Hz with a simple autopilot and
//! log what happens. Usage: `flap-runner [tuning.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use flap_runner::persistence::FileStore;
    use flap_runner::{GameLoop, Tuning};

    env_logger::init();
    log::info!("Flap Runner (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                eprintln!("Bad tuning file {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => Tuning::default(),
    };
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    let scores = std::env::temp_dir().join("flap-runner-scores.json");
    let store = FileStore::new(scores);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut game = match GameLoop::new(tuning, Box::new(store), seed) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid tuning: {}", e);
            std::process::exit(2);
        }
    };

    const FRAME_MS: f32 = 1000.0 / 60.0;
    let mut runs = 0u32;
    let mut top = 0u32;
    for frame in 0..seconds * 60 {
        if autopilot_wants_flap(game.session()) {
            game.on_flap();
        }
        game.update(frame as f64 * FRAME_MS as f64, FRAME_MS);

        for event in game.drain_events() {
            match event {
                flap_runner::sim::GameEvent::GameOver { score, .. } => {
                    runs += 1;
                    top = top.max(score);
                }
                flap_runner::sim::GameEvent::Flapped => {}
                other => log::debug!("{:?}", other),
            }
        }
    }

    println!(
        "Simulated {}s: {} finished runs, top score {}, best ever {}",
        seconds,
        runs,
        top,
        game.session().score.best
    );
}

/// Flap when sinking below the centre of the next opening
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_wants_flap(session: &flap_runner::sim::Session) -> bool {
    let player = session.player.bounds();
    let target = session
        .pool
        .pairs()
        .iter()
        .filter(|p| p.upper.bounds().right() > player.left())
        .min_by(|a, b| a.x().total_cmp(&b.x()))
        .map(|p| p.gap_center() + 15.0)
        .unwrap_or(session.world.height / 2.0);

    session.player.vel.y >= 0.0 && player.bottom() > target
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `GameLoop` directly; nothing to do here
}
