//! Per-actor update behavior
//!
//! Each update either moves the actor or produces a combat effect (a queued
//! projectile, or a melee dps contribution the caller applies to the castle).
//! Actors never mutate collections they don't own.

use glam::Vec2;

use super::ballistics::{aim_direction, rotate};
use super::state::{
    Ballista, Castle, Enemy, EnemyKind, PickupEffect, Player, PowerUp, PowerUpKind, Projectile,
    ProjectileOwner, ProjectileVisual,
};
use crate::tuning::Tuning;

impl Player {
    /// Movement, stamina, cooldowns, and live aim for one tick.
    ///
    /// The move intent is normalized before scaling so diagonal movement is
    /// not faster. Sprint only engages while stamina is positive; it drains
    /// stamina only while actually moving.
    pub fn update(
        &mut self,
        dt: f32,
        move_intent: Vec2,
        sprint_held: bool,
        aim_target: Vec2,
        tuning: &Tuning,
    ) {
        let moving = move_intent.length_squared() > 0.0;
        let sprinting = sprint_held && self.stamina > 0.0;
        let speed = if sprinting {
            tuning.player_sprint_speed
        } else {
            tuning.player_speed
        };

        if moving {
            let dir = move_intent.normalize();
            self.pos += dir * speed * dt;
        }
        self.pos.x = self.pos.x.clamp(20.0, tuning.width - 20.0);
        self.pos.y = self
            .pos
            .y
            .clamp(tuning.ground_y - 60.0, tuning.ground_y - 50.0);

        if sprinting && moving {
            self.stamina =
                (self.stamina - tuning.stamina_drain * dt).clamp(0.0, tuning.stamina_max);
        } else {
            self.stamina =
                (self.stamina + tuning.stamina_regen * dt).clamp(0.0, tuning.stamina_max);
        }

        self.fire_timer = (self.fire_timer - dt).max(0.0);
        self.triple_shot_timer = (self.triple_shot_timer - dt).max(0.0);
        self.aim_dir = aim_direction(self.hand(tuning), aim_target);
    }

    /// Fire if the cooldown has elapsed; otherwise do nothing at all.
    /// During the triple-shot buff, three arrows leave at a small spread.
    pub fn try_fire(&mut self, arrows: &mut Vec<Projectile>, tuning: &Tuning) {
        if self.fire_timer > 0.0 {
            return;
        }
        let origin = self.hand(tuning);
        let spreads: &[f32] = if self.triple_shot_timer > 0.0 {
            &[-1.0, 0.0, 1.0]
        } else {
            &[0.0]
        };
        for &s in spreads {
            let dir = rotate(self.aim_dir, s * tuning.triple_shot_spread);
            arrows.push(Projectile {
                owner: ProjectileOwner::Player,
                pos: origin,
                vel: dir * tuning.arrow_speed,
                gravity: tuning.arrow_gravity,
                damage: tuning.arrow_damage,
                radius: 2.0,
                visual: ProjectileVisual::Arrow,
                alive: true,
            });
        }
        self.fire_timer = tuning.fire_cooldown;
    }
}

impl Enemy {
    /// Advance one tick. Returns the melee dps this enemy contributes against
    /// the castle this frame; the caller multiplies by dt and applies it.
    pub fn update(
        &mut self,
        dt: f32,
        castle: &Castle,
        player_x: f32,
        enemy_arrows: &mut Vec<Projectile>,
        tuning: &Tuning,
    ) -> f32 {
        match self.kind {
            EnemyKind::Archer => {
                // Hold at the standoff distance, then volley at the player.
                let desired_x = castle.bounds.center_x() + self.standoff;
                if self.pos.x > desired_x {
                    self.pos.x -= self.speed * dt;
                }
                self.shoot_timer -= dt;
                if self.shoot_timer <= 0.0 {
                    self.shoot_timer = self.cadence;
                    let origin = self.pos + Vec2::new(-22.0, 15.0);
                    let target = Vec2::new(player_x, tuning.ground_y - 54.0);
                    let dir = aim_direction(origin, target);
                    enemy_arrows.push(Projectile {
                        owner: ProjectileOwner::Enemy,
                        pos: origin,
                        vel: Vec2::new(
                            dir.x * tuning.enemy_arrow_speed,
                            // Flattened vertical launch gives the lobbed arc
                            dir.y * tuning.enemy_arrow_speed * tuning.enemy_arrow_vy_scale,
                        ),
                        gravity: tuning.enemy_arrow_gravity,
                        damage: tuning.enemy_arrow_damage,
                        radius: 2.0,
                        visual: ProjectileVisual::EnemyArrow,
                        alive: true,
                    });
                }
                0.0
            }
            EnemyKind::Swordsman | EnemyKind::Brute => {
                let wall_x = castle.wall_x(tuning.wall_clearance);
                if self.pos.x > wall_x {
                    self.pos.x -= self.speed * dt;
                    0.0
                } else {
                    self.melee_dps
                }
            }
        }
    }
}

impl Ballista {
    pub fn update(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
    }

    /// Loose a heavy, flat-flying bolt toward the aim point, cooldown gated.
    pub fn fire(&mut self, aim_target: Vec2, arrows: &mut Vec<Projectile>, tuning: &Tuning) {
        if self.timer > 0.0 {
            return;
        }
        let dir = aim_direction(self.pos, aim_target);
        arrows.push(Projectile {
            owner: ProjectileOwner::Turret,
            pos: self.pos,
            vel: dir * tuning.bolt_speed,
            gravity: tuning.arrow_gravity * tuning.bolt_gravity_scale,
            damage: tuning.bolt_damage,
            radius: 3.0,
            visual: ProjectileVisual::Bolt,
            alive: true,
        });
        self.timer = self.cooldown;
    }
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            kind,
            pos,
            vy: 0.0,
            ttl: tuning.powerup_ttl,
            alive: true,
        }
    }

    /// Drop to the ground, count down TTL, and drift toward a nearby player
    /// (the pickup magnet). Expiry clears the alive flag.
    pub fn update(&mut self, dt: f32, player_center: Vec2, tuning: &Tuning) {
        self.vy += 1200.0 * dt;
        self.pos.y += self.vy * dt;
        let rest_y = tuning.ground_y - 6.0;
        if self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.vy = 0.0;
        }

        if tuning.magnet_radius > 0.0 {
            let to_player = player_center - self.pos;
            let dist = to_player.length();
            if dist > 1.0 && dist < tuning.magnet_radius {
                self.pos += to_player / dist * tuning.magnet_pull_speed * dt;
            }
        }

        self.ttl -= dt;
        if self.ttl <= 0.0 {
            self.alive = false;
        }
    }

    /// Apply the effect. Exactly one of: castle heal, stamina refill,
    /// triple-shot start/extend, score bonus (added by the caller from the
    /// returned effect). Returns a tagged description for feedback emission.
    pub fn apply(&self, player: &mut Player, castle: &mut Castle, tuning: &Tuning) -> PickupEffect {
        match self.kind {
            PowerUpKind::RepairCastle => {
                castle.heal(tuning.repair_amount);
                PickupEffect {
                    kind: self.kind,
                    magnitude: tuning.repair_amount,
                    label: "+CASTLE",
                }
            }
            PowerUpKind::StaminaVial => {
                player.stamina = tuning.stamina_max;
                PickupEffect {
                    kind: self.kind,
                    magnitude: tuning.stamina_max,
                    label: "+STA",
                }
            }
            PowerUpKind::TripleShot => {
                player.triple_shot_timer = tuning.triple_shot_duration;
                PickupEffect {
                    kind: self.kind,
                    magnitude: tuning.triple_shot_duration,
                    label: "TRIPLE",
                }
            }
            PowerUpKind::Coin => PickupEffect {
                kind: self.kind,
                magnitude: tuning.coin_score as f32,
                label: "+COIN",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Rect;

    const DT: f32 = 1.0 / 60.0;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    fn player(t: &Tuning) -> Player {
        Player::new(Vec2::new(300.0, t.ground_y - 56.0), t)
    }

    #[test]
    fn diagonal_movement_is_not_faster() {
        let t = tuning();
        let mut straight = player(&t);
        let mut diagonal = player(&t);
        let aim = Vec2::new(500.0, 300.0);
        straight.update(DT, Vec2::new(1.0, 0.0), false, aim, &t);
        diagonal.update(DT, Vec2::new(1.0, 1.0), false, aim, &t);
        let a = (straight.pos - Vec2::new(300.0, t.ground_y - 56.0)).length();
        let b = (diagonal.pos - Vec2::new(300.0, t.ground_y - 56.0)).length();
        assert!((a - b).abs() < 0.5);
    }

    #[test]
    fn sprint_drains_then_regen_clamps() {
        let t = tuning();
        let mut p = player(&t);
        let aim = Vec2::new(500.0, 300.0);
        for _ in 0..600 {
            p.update(DT, Vec2::X, true, aim, &t);
            assert!((0.0..=t.stamina_max).contains(&p.stamina));
        }
        assert_eq!(p.stamina, 0.0);
        for _ in 0..6000 {
            p.update(DT, Vec2::ZERO, false, aim, &t);
        }
        assert_eq!(p.stamina, t.stamina_max);
    }

    #[test]
    fn sprint_without_movement_regens() {
        let t = tuning();
        let mut p = player(&t);
        p.stamina = 50.0;
        p.update(DT, Vec2::ZERO, true, Vec2::X, &t);
        assert!(p.stamina > 50.0);
    }

    #[test]
    fn fire_on_cooldown_is_a_noop() {
        let t = tuning();
        let mut p = player(&t);
        let mut arrows = Vec::new();
        p.try_fire(&mut arrows, &t);
        assert_eq!(arrows.len(), 1);
        let timer_before = p.fire_timer;
        p.try_fire(&mut arrows, &t);
        assert_eq!(arrows.len(), 1);
        assert_eq!(p.fire_timer, timer_before);
    }

    #[test]
    fn triple_shot_emits_three_arrows() {
        let t = tuning();
        let mut p = player(&t);
        p.triple_shot_timer = 5.0;
        let mut arrows = Vec::new();
        p.try_fire(&mut arrows, &t);
        assert_eq!(arrows.len(), 3);
        // Spread arrows straddle the center one
        let mid = arrows[1].vel.normalize();
        assert!((mid - p.aim_dir).length() < 1e-5);
        assert_ne!(arrows[0].vel, arrows[2].vel);
    }

    #[test]
    fn archer_holds_at_standoff() {
        let t = tuning();
        let castle = Castle::new(Rect::new(440.0, 0.0, 200.0, 140.0), &t);
        let desired_x = castle.bounds.center_x() + t.archer_standoff;
        let mut e = Enemy {
            kind: EnemyKind::Archer,
            pos: Vec2::new(desired_x - 5.0, 100.0),
            hp: 90,
            max_hp: 90,
            speed: t.archer_speed,
            melee_dps: 0.0,
            standoff: t.archer_standoff,
            shoot_timer: 10.0,
            cadence: t.archer_cadence,
        };
        let mut arrows = Vec::new();
        let before = e.pos.x;
        let dps = e.update(DT, &castle, 100.0, &mut arrows, &t);
        assert_eq!(e.pos.x, before);
        assert_eq!(dps, 0.0);
    }

    #[test]
    fn archer_fires_lobbed_arrow_on_cadence() {
        let t = tuning();
        let castle = Castle::new(Rect::new(440.0, 0.0, 200.0, 140.0), &t);
        let mut e = Enemy {
            kind: EnemyKind::Archer,
            pos: Vec2::new(1500.0, t.ground_y - 56.0),
            hp: 90,
            max_hp: 90,
            speed: 0.0,
            melee_dps: 0.0,
            standoff: t.archer_standoff,
            shoot_timer: 0.01,
            cadence: t.archer_cadence,
        };
        let mut arrows = Vec::new();
        e.update(DT, &castle, 100.0, &mut arrows, &t);
        assert_eq!(arrows.len(), 1);
        assert_eq!(e.shoot_timer, t.archer_cadence);
        let shot = &arrows[0];
        assert_eq!(shot.owner, ProjectileOwner::Enemy);
        // Vertical component is scaled down relative to a straight shot
        let dir = aim_direction(e.pos + Vec2::new(-22.0, 15.0), Vec2::new(100.0, t.ground_y - 54.0));
        assert!(shot.vel.y.abs() < (dir.y * t.enemy_arrow_speed).abs() + 1e-3);
    }

    #[test]
    fn melee_returns_dps_only_at_the_wall() {
        let t = tuning();
        let castle = Castle::new(Rect::new(440.0, 0.0, 200.0, 140.0), &t);
        let wall_x = castle.wall_x(t.wall_clearance);
        let mut e = Enemy {
            kind: EnemyKind::Swordsman,
            pos: Vec2::new(wall_x + 100.0, 100.0),
            hp: 90,
            max_hp: 90,
            speed: t.swordsman_speed,
            melee_dps: t.swordsman_dps,
            standoff: 0.0,
            shoot_timer: 0.0,
            cadence: 0.0,
        };
        let mut arrows = Vec::new();
        assert_eq!(e.update(DT, &castle, 0.0, &mut arrows, &t), 0.0);
        e.pos.x = wall_x;
        assert_eq!(e.update(DT, &castle, 0.0, &mut arrows, &t), t.swordsman_dps);
        assert!(arrows.is_empty());
    }

    #[test]
    fn ballista_respects_cooldown() {
        let t = tuning();
        let mut b = Ballista::new(Vec2::new(540.0, 500.0), &t);
        let mut arrows = Vec::new();
        b.fire(Vec2::new(1000.0, 400.0), &mut arrows, &t);
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].visual, ProjectileVisual::Bolt);
        b.fire(Vec2::new(1000.0, 400.0), &mut arrows, &t);
        assert_eq!(arrows.len(), 1);
        b.update(t.bolt_cooldown + 0.01);
        b.fire(Vec2::new(1000.0, 400.0), &mut arrows, &t);
        assert_eq!(arrows.len(), 2);
    }

    #[test]
    fn powerup_expires_after_ttl() {
        let t = tuning();
        let mut pu = PowerUp::new(PowerUpKind::Coin, Vec2::new(500.0, t.ground_y - 6.0), &t);
        let far_player = Vec2::new(-1000.0, 0.0);
        let ticks = (t.powerup_ttl / DT).ceil() as u32 + 1;
        for _ in 0..ticks {
            pu.update(DT, far_player, &t);
        }
        assert!(!pu.alive);
    }

    #[test]
    fn magnet_pulls_nearby_powerups() {
        let t = tuning();
        let rest = Vec2::new(500.0, t.ground_y - 6.0);
        let mut pu = PowerUp::new(PowerUpKind::StaminaVial, rest, &t);
        let player_center = rest + Vec2::new(t.magnet_radius - 10.0, 0.0);
        let before = (player_center - pu.pos).length();
        pu.update(DT, player_center, &t);
        assert!((player_center - pu.pos).length() < before);
    }

    #[test]
    fn apply_effects_are_tagged() {
        let t = tuning();
        let mut p = player(&t);
        p.stamina = 0.0;
        let mut castle = Castle::new(Rect::new(440.0, 0.0, 200.0, 140.0), &t);
        castle.hp = 100.0;

        let heal = PowerUp::new(PowerUpKind::RepairCastle, Vec2::ZERO, &t);
        let fx = heal.apply(&mut p, &mut castle, &t);
        assert_eq!(castle.hp, 100.0 + t.repair_amount);
        assert_eq!(fx.kind, PowerUpKind::RepairCastle);

        let vial = PowerUp::new(PowerUpKind::StaminaVial, Vec2::ZERO, &t);
        vial.apply(&mut p, &mut castle, &t);
        assert_eq!(p.stamina, t.stamina_max);

        let triple = PowerUp::new(PowerUpKind::TripleShot, Vec2::ZERO, &t);
        triple.apply(&mut p, &mut castle, &t);
        assert_eq!(p.triple_shot_timer, t.triple_shot_duration);
    }
}
