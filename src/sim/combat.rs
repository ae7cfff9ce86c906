//! Combat resolution
//!
//! One pass per tick, after movement and projectile integration. Scans are in
//! spawn order and each projectile spends itself on its first hit, so the
//! outcome of a tick is a pure function of state. Nothing is removed here;
//! the purge at the end of the tick collects everything marked dead.

use glam::Vec2;
use rand::Rng;

use super::state::{FeedbackEvent, GameState, PowerUp, PowerUpKind};

/// Resolve all projectile hits, pickups, and their consequences for one tick.
pub fn resolve(state: &mut GameState) {
    let GameState {
        rng,
        tuning,
        score,
        player,
        castle,
        arrows,
        enemy_arrows,
        enemies,
        powerups,
        waves,
        events,
        shake_timer,
        shake_intensity,
        ..
    } = state;

    // Drop rolls are deferred until after all scans so mid-pass spawns can't
    // shift the collections being iterated.
    let mut drop_sites: Vec<Vec2> = Vec::new();

    // Friendly arrows and bolts against enemies. First overlap wins the
    // projectile; remaining enemies are untouched by it.
    for arrow in arrows.iter_mut() {
        if !arrow.alive {
            continue;
        }
        let hit_box = arrow.bounds();
        for enemy in enemies.iter_mut() {
            if enemy.hp <= 0 || !hit_box.intersects(&enemy.bounds(tuning)) {
                continue;
            }
            arrow.alive = false;
            enemy.hp -= arrow.damage;
            *score += tuning.hit_score;
            events.push(FeedbackEvent::Hit { pos: arrow.pos });
            if enemy.hp <= 0 {
                let heavy = enemy.kind.is_heavy();
                *score += tuning.kill_score;
                if heavy {
                    *score += tuning.brute_kill_bonus;
                }
                waves.kills_this_wave += 1;
                events.push(FeedbackEvent::Kill {
                    pos: enemy.pos,
                    heavy,
                });
                drop_sites.push(enemy.pos);
            } else {
                events.push(FeedbackEvent::Damage {
                    pos: enemy.pos,
                    amount: arrow.damage,
                });
            }
            break;
        }
    }

    // Enemy arrows against the player, then the castle. A single arrow can
    // only spend itself once.
    let castle_box = castle.bounds.inflate(8.0, 8.0);
    for arrow in enemy_arrows.iter_mut() {
        if !arrow.alive {
            continue;
        }
        let hit_box = arrow.bounds();
        if hit_box.intersects(&player.hurtbox(tuning)) {
            arrow.alive = false;
            player.hp -= arrow.damage;
            events.push(FeedbackEvent::Damage {
                pos: player.pos,
                amount: arrow.damage,
            });
            if player.hp <= 0 {
                // The archer always gets back up; the castle pays for it.
                player.hp = tuning.player_max_hp;
                castle.damage(tuning.respawn_tax);
                *shake_timer = shake_timer.max(tuning.shake_time);
                *shake_intensity = shake_intensity.max(tuning.shake_intensity);
                log::info!("player downed, castle pays {} hp", tuning.respawn_tax);
            }
            continue;
        }
        if hit_box.intersects(&castle_box) {
            arrow.alive = false;
            castle.damage(arrow.damage as f32 * tuning.castle_ranged_fraction);
            events.push(FeedbackEvent::CastleHit { pos: arrow.pos });
            *shake_timer = shake_timer.max(tuning.shake_time);
            *shake_intensity = shake_intensity.max(tuning.shake_intensity);
        }
    }

    // Pickups.
    let pickup_box = player.pickup_box(tuning);
    for pu in powerups.iter_mut() {
        if !pu.alive || !pickup_box.contains_point(pu.pos) {
            continue;
        }
        pu.alive = false;
        let effect = pu.apply(player, castle, tuning);
        if effect.kind == PowerUpKind::Coin {
            *score += tuning.coin_score;
        }
        events.push(FeedbackEvent::Pickup {
            pos: pu.pos,
            effect,
        });
    }

    // Deferred drop rolls, in kill order so replays match.
    for site in drop_sites {
        if rng.random::<f32>() >= tuning.drop_chance {
            continue;
        }
        let kind = roll_drop_kind(rng.random::<f32>());
        powerups.push(PowerUp::new(
            kind,
            Vec2::new(site.x, site.y - 10.0),
            tuning,
        ));
    }
}

/// Map a uniform roll in [0, 1) onto the drop table.
fn roll_drop_kind(roll: f32) -> PowerUpKind {
    if roll < 0.30 {
        PowerUpKind::RepairCastle
    } else if roll < 0.60 {
        PowerUpKind::StaminaVial
    } else if roll < 0.75 {
        PowerUpKind::TripleShot
    } else {
        PowerUpKind::Coin
    }
}
