//! Fixed-timestep simulation tick
//!
//! [`tick`] is the only mutation entry point for a [`GameState`]. Stages run
//! in a fixed order every tick; given the same seed, tuning, and input
//! sequence, two runs are bit-identical.

use glam::Vec2;

use super::ballistics::{in_horizontal_bounds, integrate};
use super::combat;
use super::spawner;
use super::state::{GamePhase, GameState};

/// Player intent for one tick. Button fields are edge-triggered: the caller
/// sets them only on the tick the press happened.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Raw movement intent; normalized before use
    pub move_intent: Vec2,
    pub sprint_held: bool,
    /// Fire the bow (held is fine; the cooldown gates it)
    pub fire: bool,
    /// Fire the ballista
    pub alt_fire: bool,
    /// World-space point the player is aiming at
    pub aim_target: Vec2,
    pub pause: bool,
    pub restart: bool,
    /// Consumed by the outer loop; the simulation ignores it
    pub quit: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            move_intent: Vec2::ZERO,
            sprint_held: false,
            fire: false,
            alt_fire: false,
            aim_target: Vec2::X,
            pause: false,
            restart: false,
            quit: false,
        }
    }
}

/// Advance the simulation by `dt` seconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Events describe the latest tick only.
    state.events.clear();

    let dt = dt.clamp(0.0, state.tuning.max_frame_dt);

    // Phase transitions happen before any gameplay so a pause press freezes
    // this very tick.
    match state.phase {
        GamePhase::Title => {
            if input.restart {
                state.reset();
                state.phase = GamePhase::Playing;
                log::info!("run started, seed {}", state.seed);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset();
                state.phase = GamePhase::Playing;
                log::info!("run restarted, seed {}", state.seed);
            }
            return;
        }
        GamePhase::Paused => {
            if input.restart {
                state.reset();
                state.phase = GamePhase::Playing;
            } else if input.pause {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {
            if input.restart {
                state.reset();
                state.phase = GamePhase::Playing;
                return;
            }
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }
        }
    }

    // Player movement, aim, and bow.
    state.player.update(
        dt,
        input.move_intent,
        input.sprint_held,
        input.aim_target,
        &state.tuning,
    );
    if input.fire {
        state.player.try_fire(&mut state.arrows, &state.tuning);
    }

    // Ballista.
    state.ballista.update(dt);
    if input.alt_fire {
        state
            .ballista
            .fire(input.aim_target, &mut state.arrows, &state.tuning);
    }

    spawner::try_spawn(state, dt);

    // Projectile flight.
    for p in state
        .arrows
        .iter_mut()
        .chain(state.enemy_arrows.iter_mut())
    {
        integrate(p, dt, state.tuning.ground_y);
    }

    // Enemy movement; melee pressure accumulates and lands as one sum.
    let mut wall_dps = 0.0;
    {
        let GameState {
            tuning,
            player,
            castle,
            enemy_arrows,
            enemies,
            ..
        } = &mut *state;
        for e in enemies.iter_mut() {
            wall_dps += e.update(dt, castle, player.pos.x, enemy_arrows, tuning);
        }
    }
    if wall_dps > 0.0 {
        state.castle.damage(wall_dps * dt);
        state
            .trigger_shake(state.tuning.shake_time, state.tuning.shake_intensity);
    }

    // Power-up fall, magnet, and expiry.
    {
        let player_center = state.player.bounds(&state.tuning).center();
        let GameState {
            tuning, powerups, ..
        } = &mut *state;
        for pu in powerups.iter_mut() {
            pu.update(dt, player_center, tuning);
        }
    }

    combat::resolve(state);

    // Purge everything marked dead or out of the play band.
    let width = state.tuning.width;
    let margin = state.tuning.bounds_margin;
    state
        .arrows
        .retain(|p| p.alive && in_horizontal_bounds(p.pos.x, width, margin));
    state
        .enemy_arrows
        .retain(|p| p.alive && in_horizontal_bounds(p.pos.x, width, margin));
    state.enemies.retain(|e| e.hp > 0 && e.pos.x > -margin);
    state.powerups.retain(|pu| pu.alive);

    spawner::advance_wave_if_ready(state);

    if state.castle.hp <= 0.0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "castle fell on wave {}, final score {}",
            state.waves.wave,
            state.score
        );
    }

    state.shake_timer = (state.shake_timer - dt).max(0.0);
    if state.shake_timer == 0.0 {
        state.shake_intensity = 0.0;
    }

    state.time_ticks += 1;
}
