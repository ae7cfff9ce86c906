//! Headless demo driver
//!
//! Runs the simulation with a simple scripted defender so the core can be
//! exercised (and profiled) without a frontend. Usage:
//!
//! ```text
//! castle-archer [seed] [seconds]
//! ```

use std::path::Path;

use glam::Vec2;

use castle_archer::consts::{MAX_SUBSTEPS, SIM_DT};
use castle_archer::highscores::HighScore;
use castle_archer::sim::{GamePhase, GameState, TickInput, tick};
use castle_archer::tuning::Tuning;

const HIGH_SCORE_FILE: &str = "highscore.json";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120);

    let mut state = GameState::new(seed, Tuning::default());
    log::info!("simulating seed {seed} for up to {seconds}s");

    // Leave the title screen.
    tick(
        &mut state,
        &TickInput {
            restart: true,
            ..TickInput::default()
        },
        SIM_DT,
    );

    // Fixed-timestep accumulator over synthetic 20 fps frames, the same
    // catch-up scheme a rendering frontend would run.
    const FRAME_DT: f32 = 1.0 / 20.0;
    let total_frames = seconds * 20;
    let mut accumulator = 0.0f32;
    'frames: for _ in 0..total_frames {
        accumulator += FRAME_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = scripted_input(&state);
            if input.quit {
                break 'frames;
            }
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
        // Whatever couldn't be caught up this frame is dropped.
        if accumulator >= SIM_DT {
            accumulator = 0.0;
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let score = state.score;
    log::info!(
        "finished: phase {:?}, wave {}, score {}, {} ticks",
        state.phase,
        state.waves.wave,
        score,
        state.time_ticks
    );

    let path = Path::new(HIGH_SCORE_FILE);
    let mut best = HighScore::load(path);
    if best.record(score) {
        log::info!("new high score: {score}");
        if let Err(err) = best.save(path) {
            log::warn!("could not save {}: {err}", path.display());
        }
    } else {
        log::info!("best remains {}", best.high_score);
    }
}

/// A blunt but serviceable defender: shoot the nearest enemy, lean on the
/// ballista for heavies, and wander toward any loose power-up.
fn scripted_input(state: &GameState) -> TickInput {
    let player = &state.player;

    let nearest = state
        .enemies
        .iter()
        .min_by(|a, b| {
            let da = (a.pos - player.pos).length_squared();
            let db = (b.pos - player.pos).length_squared();
            da.total_cmp(&db)
        });

    let aim_target = nearest
        .map(|e| e.pos + Vec2::new(0.0, 26.0))
        .unwrap_or(player.pos + Vec2::new(400.0, -50.0));

    let alt_fire = nearest.is_some_and(|e| e.kind.is_heavy() || e.pos.x < state.tuning.width * 0.6);

    let move_intent = state
        .powerups
        .iter()
        .filter(|pu| pu.alive)
        .min_by(|a, b| {
            let da = (a.pos - player.pos).length_squared();
            let db = (b.pos - player.pos).length_squared();
            da.total_cmp(&db)
        })
        .map(|pu| {
            let dx = pu.pos.x - player.pos.x;
            if dx.abs() > 4.0 {
                Vec2::new(dx.signum(), 0.0)
            } else {
                Vec2::ZERO
            }
        })
        .unwrap_or(Vec2::ZERO);

    TickInput {
        move_intent,
        sprint_held: move_intent != Vec2::ZERO && player.stamina > 30.0,
        fire: true,
        alt_fire,
        aim_target,
        pause: false,
        restart: false,
        quit: false,
    }
}
