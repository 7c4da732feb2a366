//! Slime Arena headless entry point
//!
//! Stands in for a display loop: steps the simulation at 60 Hz with a simple
//! aim-and-fire bot and prints the final snapshot as JSON.
//!
//! Usage: `slime-arena [tuning.json]`
//! Environment: `ARENA_SEED` (u64), `ARENA_FRAMES` (tick count), `RUST_LOG`.

use std::env;
use std::process::ExitCode;

use slime_arena::Tuning;
use slime_arena::consts::REFERENCE_FRAME_MS;
use slime_arena::sim::{Arena, GameState, MoveIntent, Snapshot, TickInput, survival_ms, tick};

const DEFAULT_SEED: u64 = 0x5EED;
const DEFAULT_FRAMES: u64 = 60 * 60;

fn main() -> ExitCode {
    env_logger::init();

    let tuning = match env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let seed = env_or("ARENA_SEED", DEFAULT_SEED);
    let frames = env_or("ARENA_FRAMES", DEFAULT_FRAMES);

    let mut state = GameState::new(seed, tuning, Arena::default(), 0.0);
    let mut now = 0.0;
    for _ in 0..frames {
        now += REFERENCE_FRAME_MS;
        let input = autopilot(&state, now);
        tick(&mut state, &input);
        if state.is_terminal() {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks ({:.1}s): score {}, health {}/{}",
        state.time_ticks,
        survival_ms(&state, now) / 1000.0,
        state.score,
        state.player.health,
        state.player.max_health
    );

    match serde_json::to_string_pretty(&Snapshot::capture(&state)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("failed to encode snapshot: {err}");
            ExitCode::FAILURE
        }
    }
}

fn env_or(key: &str, default: u64) -> u64 {
    parse_or(key, env::var(key).ok().as_deref(), default)
}

/// Parse `raw`, warning and falling back to `default` on a malformed value
fn parse_or(key: &str, raw: Option<&str>, default: u64) -> u64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Ignoring {key}={raw:?} ({err}); using {default}");
            default
        }
    }
}

/// Advance on the nearest enemy along its dominant axis, firing as it goes,
/// and back off without firing once it gets close.
fn autopilot(state: &GameState, now_ms: f64) -> TickInput {
    let me = state.player.center();
    let nearest = state
        .enemies
        .iter()
        .map(|e| e.center() - me)
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));

    let mut movement = MoveIntent::default();
    let mut fire = false;
    if let Some(offset) = nearest {
        let toward = offset.length() > 220.0;
        fire = toward;
        if offset.x.abs() > offset.y.abs() {
            movement.right = (offset.x > 0.0) == toward;
            movement.left = !movement.right;
        } else {
            movement.down = (offset.y > 0.0) == toward;
            movement.up = !movement.down;
        }
    }

    TickInput {
        now_ms,
        movement,
        fire,
    }
}
