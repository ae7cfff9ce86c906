//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`], built once and passed into the
//! simulation at construction. The struct round-trips through serde so balance
//! patches can be loaded from JSON without touching code. The *values* here are
//! not a contract; the rule shapes in `sim` are.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Complete balance table for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // --- Playfield ---
    /// Horizontal play width in world units
    pub width: f32,
    /// Y of the ground plane; projectiles crossing it are culled
    pub ground_y: f32,
    /// Entities beyond `[-margin, width + margin]` are purged
    pub bounds_margin: f32,
    /// Hard cap on frame delta before it reaches physics
    pub max_frame_dt: f32,

    // --- Player ---
    pub player_speed: f32,
    pub player_sprint_speed: f32,
    pub player_max_hp: i32,
    pub stamina_max: f32,
    /// Stamina drained per second while sprinting and moving
    pub stamina_drain: f32,
    /// Stamina regained per second otherwise
    pub stamina_regen: f32,
    pub fire_cooldown: f32,
    /// Body box shared by the player and humanoid enemies
    pub body_width: f32,
    pub body_height: f32,
    /// Arrow spawn point relative to the player position
    pub hand_offset: Vec2,

    // --- Bow ---
    pub arrow_speed: f32,
    pub arrow_damage: i32,
    pub arrow_gravity: f32,
    /// Angular offset of the two extra triple-shot arrows, radians
    pub triple_shot_spread: f32,
    pub triple_shot_duration: f32,

    // --- Ballista ---
    pub bolt_speed: f32,
    pub bolt_damage: i32,
    pub bolt_cooldown: f32,
    /// Bolts fly flatter than arrows
    pub bolt_gravity_scale: f32,

    // --- Enemies ---
    pub swordsman_hp: i32,
    pub swordsman_speed: f32,
    pub swordsman_dps: f32,
    pub archer_hp: i32,
    pub archer_speed: f32,
    /// Distance from the castle center an archer holds at
    pub archer_standoff: f32,
    /// Seconds between archer shots
    pub archer_cadence: f32,
    pub enemy_arrow_speed: f32,
    pub enemy_arrow_gravity: f32,
    pub enemy_arrow_damage: i32,
    /// Vertical velocity scale-down that produces the lobbed arc
    pub enemy_arrow_vy_scale: f32,
    pub brute_hp: i32,
    pub brute_speed: f32,
    pub brute_dps: f32,
    /// Per-wave compounding max-HP multiplier step
    pub enemy_hp_ramp: f32,

    // --- Castle ---
    pub castle_max_hp: f32,
    /// Melee enemies stop this far inside the castle's left edge
    pub wall_clearance: f32,
    /// Fraction of a ranged projectile's damage applied to the castle
    pub castle_ranged_fraction: f32,
    /// Health restored on wave advance (the only mid-run heal)
    pub wave_heal: f32,
    /// Castle health forfeited when the player is respawned
    pub respawn_tax: f32,

    // --- Waves & spawning ---
    pub spawn_interval_base: f32,
    /// Multiplied into the interval each wave advance
    pub spawn_acceleration: f32,
    pub spawn_interval_floor: f32,
    /// Kill threshold per wave index: wave * this
    pub kills_per_wave: u32,
    pub archer_chance_base: f32,
    pub archer_chance_per_wave: f32,
    pub archer_chance_max: f32,
    pub brute_chance_base: f32,
    pub brute_chance_per_wave: f32,
    pub brute_chance_max: f32,

    // --- Power-ups ---
    pub drop_chance: f32,
    pub powerup_ttl: f32,
    /// Power-ups inside this radius drift toward the player
    pub magnet_radius: f32,
    pub magnet_pull_speed: f32,
    pub repair_amount: f32,
    pub coin_score: u64,

    // --- Scoring ---
    pub hit_score: u64,
    pub kill_score: u64,
    pub brute_kill_bonus: u64,

    // --- Feedback ---
    pub shake_time: f32,
    pub shake_intensity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: 1920.0,
            // 65% down a 1080-unit tall reference playfield
            ground_y: 702.0,
            bounds_margin: 60.0,
            max_frame_dt: 1.0 / 20.0,

            player_speed: 320.0,
            player_sprint_speed: 500.0,
            player_max_hp: 100,
            stamina_max: 100.0,
            stamina_drain: 35.0,
            stamina_regen: 22.0,
            fire_cooldown: 0.22,
            body_width: 20.0,
            body_height: 52.0,
            hand_offset: Vec2::new(10.0, 15.0),

            arrow_speed: 1000.0,
            arrow_damage: 22,
            arrow_gravity: 900.0,
            triple_shot_spread: 0.10,
            triple_shot_duration: 8.0,

            bolt_speed: 1300.0,
            bolt_damage: 50,
            bolt_cooldown: 1.1,
            bolt_gravity_scale: 0.6,

            swordsman_hp: 90,
            swordsman_speed: 140.0,
            swordsman_dps: 15.0,
            archer_hp: 90,
            archer_speed: 110.0,
            archer_standoff: 420.0,
            archer_cadence: 1.7,
            enemy_arrow_speed: 820.0,
            enemy_arrow_gravity: 700.0,
            enemy_arrow_damage: 16,
            enemy_arrow_vy_scale: 0.78,
            brute_hp: 200,
            brute_speed: 90.0,
            brute_dps: 28.0,
            enemy_hp_ramp: 0.08,

            castle_max_hp: 600.0,
            wall_clearance: 24.0,
            castle_ranged_fraction: 0.5,
            wave_heal: 60.0,
            respawn_tax: 60.0,

            spawn_interval_base: 1.0,
            spawn_acceleration: 0.92,
            spawn_interval_floor: 0.25,
            kills_per_wave: 12,
            archer_chance_base: 0.30,
            archer_chance_per_wave: 0.05,
            archer_chance_max: 0.85,
            brute_chance_base: 0.10,
            brute_chance_per_wave: 0.03,
            brute_chance_max: 0.40,

            drop_chance: 0.22,
            powerup_ttl: 14.0,
            magnet_radius: 64.0,
            magnet_pull_speed: 260.0,
            repair_amount: 60.0,
            coin_score: 30,

            hit_score: 5,
            kill_score: 20,
            brute_kill_bonus: 10,

            shake_time: 0.22,
            shake_intensity: 8.0,
        }
    }
}

impl Tuning {
    /// Max-HP multiplier applied to enemies spawned during `wave` (1-based).
    pub fn hp_multiplier(&self, wave: u32) -> f32 {
        1.0 + self.enemy_hp_ramp * wave.saturating_sub(1) as f32
    }

    /// Chance that a spawn round also produces an archer.
    pub fn archer_chance(&self, wave: u32) -> f32 {
        (self.archer_chance_base + self.archer_chance_per_wave * wave.saturating_sub(1) as f32)
            .clamp(self.archer_chance_base, self.archer_chance_max)
    }

    /// Chance that a spawn round also produces a brute.
    pub fn brute_chance(&self, wave: u32) -> f32 {
        (self.brute_chance_base + self.brute_chance_per_wave * wave.saturating_sub(1) as f32)
            .clamp(self.brute_chance_base, self.brute_chance_max)
    }
}
