//! Game state and core simulation types
//!
//! Everything the tick function mutates lives here. Collections keep spawn
//! order; combat scans them in that order so scoring is deterministic.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the title screen for a start input
    Title,
    /// Active gameplay
    Playing,
    /// Simulation halted, overlay shown by the renderer
    Paused,
    /// Castle fell; run ended
    GameOver,
}

/// Axis-aligned box, used for hurtboxes and the castle region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Grow (positive) or shrink (negative) symmetrically about the center.
    pub fn inflate(&self, dw: f32, dh: f32) -> Self {
        Self {
            x: self.x - dw / 2.0,
            y: self.y - dh / 2.0,
            w: (self.w + dw).max(0.0),
            h: (self.h + dh).max(0.0),
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Who fired a projectile. Player and turret shots share a collection and are
/// never tested against friendly actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Turret,
    Enemy,
}

/// Cosmetic tag the renderer maps to a sprite/color. No gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileVisual {
    Arrow,
    Bolt,
    EnemyArrow,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Downward acceleration applied to `vel.y` each tick
    pub gravity: f32,
    pub damage: i32,
    pub radius: f32,
    pub visual: ProjectileVisual,
    pub alive: bool,
}

impl Projectile {
    /// Bounding box used for the AABB hit tests.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

/// The defending archer.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub hp: i32,
    pub stamina: f32,
    /// Recomputed toward the aim target every tick, never cached
    pub aim_dir: Vec2,
    /// Seconds until the bow may fire again
    pub fire_timer: f32,
    /// Remaining triple-shot buff time
    pub triple_shot_timer: f32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            hp: tuning.player_max_hp,
            stamina: tuning.stamina_max,
            aim_dir: Vec2::X,
            fire_timer: 0.0,
            triple_shot_timer: 0.0,
        }
    }

    /// Visual bounding box (the hurtbox used in combat is an inset of this).
    pub fn bounds(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            self.pos.x - tuning.body_width / 2.0,
            self.pos.y,
            tuning.body_width,
            tuning.body_height,
        )
    }

    /// Intentionally smaller than the visual box so near misses feel fair.
    pub fn hurtbox(&self, tuning: &Tuning) -> Rect {
        self.bounds(tuning).inflate(-6.0, -10.0)
    }

    /// Generous box for power-up collection.
    pub fn pickup_box(&self, tuning: &Tuning) -> Rect {
        self.bounds(tuning).inflate(20.0, 12.0)
    }

    /// Where arrows leave the bow.
    pub fn hand(&self, tuning: &Tuning) -> Vec2 {
        self.pos + tuning.hand_offset
    }
}

/// Closed set of enemy archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Swordsman,
    Archer,
    Brute,
}

impl EnemyKind {
    pub fn is_heavy(&self) -> bool {
        matches!(self, EnemyKind::Brute)
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub speed: f32,
    /// Damage per second once adjacent to the castle wall (0 for archers)
    pub melee_dps: f32,
    /// Archer-only: distance from the castle center to hold at
    pub standoff: f32,
    /// Archer-only: seconds until the next shot
    pub shoot_timer: f32,
    pub cadence: f32,
}

impl Enemy {
    /// Spawn an enemy of `kind` with wave-scaled max HP. The archer's first
    /// shot timer is jittered so simultaneous spawns don't volley in sync.
    pub fn spawn(kind: EnemyKind, pos: Vec2, wave: u32, tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let mult = tuning.hp_multiplier(wave);
        let (base_hp, speed, melee_dps) = match kind {
            EnemyKind::Swordsman => {
                (tuning.swordsman_hp, tuning.swordsman_speed, tuning.swordsman_dps)
            }
            EnemyKind::Archer => (tuning.archer_hp, tuning.archer_speed, 0.0),
            EnemyKind::Brute => (tuning.brute_hp, tuning.brute_speed, tuning.brute_dps),
        };
        let max_hp = (base_hp as f32 * mult) as i32;
        let shoot_timer = if kind == EnemyKind::Archer {
            rng.random_range(0.1..tuning.archer_cadence)
        } else {
            0.0
        };
        Self {
            kind,
            pos,
            hp: max_hp,
            max_hp,
            speed,
            melee_dps,
            standoff: tuning.archer_standoff,
            shoot_timer,
            cadence: tuning.archer_cadence,
        }
    }

    pub fn bounds(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            self.pos.x - tuning.body_width / 2.0,
            self.pos.y,
            tuning.body_width,
            tuning.body_height,
        )
    }

    pub fn health_frac(&self) -> f32 {
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

/// Castle-mounted turret. Fixed position, cannot be targeted or damaged.
#[derive(Debug, Clone)]
pub struct Ballista {
    pub pos: Vec2,
    pub timer: f32,
    pub cooldown: f32,
}

impl Ballista {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            timer: 0.0,
            cooldown: tuning.bolt_cooldown,
        }
    }
}

/// The defended structure; its health is the loss condition.
#[derive(Debug, Clone)]
pub struct Castle {
    pub bounds: Rect,
    pub hp: f32,
    pub max_hp: f32,
}

impl Castle {
    pub fn new(bounds: Rect, tuning: &Tuning) -> Self {
        Self {
            bounds,
            hp: tuning.castle_max_hp,
            max_hp: tuning.castle_max_hp,
        }
    }

    /// Heal by `amount`, capped at max.
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Damage by `amount`, floored at 0. Every damage source goes through
    /// here so observers never see a negative health value.
    pub fn damage(&mut self, amount: f32) {
        self.hp = (self.hp - amount).max(0.0);
    }

    /// Melee enemies stop and batter the wall at this x.
    pub fn wall_x(&self, clearance: f32) -> f32 {
        self.bounds.left() + clearance
    }

    pub fn health_frac(&self) -> f32 {
        (self.hp / self.max_hp).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Restores a chunk of castle health
    RepairCastle,
    /// Refills player stamina
    StaminaVial,
    /// Starts/extends the triple-shot buff
    TripleShot,
    /// Flat score bonus
    Coin,
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Fall speed while dropping to the ground
    pub vy: f32,
    pub ttl: f32,
    pub alive: bool,
}

/// What a consumed power-up did, for feedback emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupEffect {
    pub kind: PowerUpKind,
    pub magnitude: f32,
    pub label: &'static str,
}

/// Wave scheduler state.
#[derive(Debug, Clone)]
pub struct WaveState {
    /// 1-based wave number
    pub wave: u32,
    pub kills_this_wave: u32,
    pub spawn_interval: f32,
    pub spawn_timer: f32,
}

impl WaveState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            wave: 1,
            kills_this_wave: 0,
            spawn_interval: tuning.spawn_interval_base,
            spawn_timer: 0.0,
        }
    }

    /// Kills required before this wave advances.
    pub fn kill_target(&self, tuning: &Tuning) -> u32 {
        self.wave * tuning.kills_per_wave
    }
}

/// One cosmetic event per gameplay beat. The renderer/FX/audio collaborators
/// consume these; nothing in the simulation depends on them.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackEvent {
    /// A projectile struck something
    Hit { pos: Vec2 },
    /// An enemy died
    Kill { pos: Vec2, heavy: bool },
    /// Damage number to float above a surviving target
    Damage { pos: Vec2, amount: i32 },
    /// A power-up was consumed
    Pickup { pos: Vec2, effect: PickupEffect },
    /// The castle took a projectile hit
    CastleHit { pos: Vec2 },
}

/// What to draw, in the renderer's terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawKind {
    Player,
    Enemy(EnemyKind),
    Ballista,
    Castle,
    Projectile(ProjectileVisual),
    PowerUp(PowerUpKind),
}

/// A settled-snapshot drawable entity.
#[derive(Debug, Clone, Copy)]
pub struct Drawable {
    pub kind: DrawKind,
    pub pos: Vec2,
    /// Facing/aim for oriented sprites; `Vec2::X` where it doesn't apply
    pub aim: Vec2,
    pub health_frac: Option<f32>,
}

/// Complete simulation state, owned by the top-level loop and mutated only by
/// [`crate::sim::tick`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub time_ticks: u64,

    pub player: Player,
    pub ballista: Ballista,
    pub castle: Castle,
    /// Player- and turret-origin projectiles
    pub arrows: Vec<Projectile>,
    /// Enemy-origin projectiles
    pub enemy_arrows: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<PowerUp>,
    pub waves: WaveState,

    /// Cosmetic events emitted during the latest tick
    pub events: Vec<FeedbackEvent>,
    pub shake_timer: f32,
    pub shake_intensity: f32,
}

impl GameState {
    /// Create a run at the title screen with the given seed and balance.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let ground = tuning.ground_y;
        let castle_bounds = Rect::new(440.0, ground - 140.0, 200.0, 140.0);
        let ballista_pos = Vec2::new(castle_bounds.center_x(), castle_bounds.top() + 28.0);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title,
            score: 0,
            time_ticks: 0,
            player: Player::new(Vec2::new(120.0, ground - 56.0), &tuning),
            ballista: Ballista::new(ballista_pos, &tuning),
            castle: Castle::new(castle_bounds, &tuning),
            arrows: Vec::new(),
            enemy_arrows: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            waves: WaveState::new(&tuning),
            events: Vec::new(),
            shake_timer: 0.0,
            shake_intensity: 0.0,
            tuning,
        }
    }

    /// Full reset to run-start defaults. Reseeds the RNG so a restarted run
    /// with the same seed replays identically.
    pub fn reset(&mut self) {
        let seed = self.seed;
        let tuning = self.tuning.clone();
        let phase = self.phase;
        *self = GameState::new(seed, tuning);
        self.phase = phase;
    }

    /// Merge in a shake request, keeping the strongest pending one.
    pub fn trigger_shake(&mut self, time: f32, intensity: f32) {
        self.shake_timer = self.shake_timer.max(time);
        self.shake_intensity = self.shake_intensity.max(intensity);
    }

    /// Render snapshot of the settled tick.
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut out = Vec::with_capacity(
            4 + self.enemies.len()
                + self.arrows.len()
                + self.enemy_arrows.len()
                + self.powerups.len(),
        );
        out.push(Drawable {
            kind: DrawKind::Castle,
            pos: self.castle.bounds.center(),
            aim: Vec2::X,
            health_frac: Some(self.castle.health_frac()),
        });
        out.push(Drawable {
            kind: DrawKind::Ballista,
            pos: self.ballista.pos,
            aim: Vec2::X,
            health_frac: None,
        });
        out.push(Drawable {
            kind: DrawKind::Player,
            pos: self.player.pos,
            aim: self.player.aim_dir,
            health_frac: Some(
                (self.player.hp as f32 / self.tuning.player_max_hp as f32).clamp(0.0, 1.0),
            ),
        });
        for e in &self.enemies {
            out.push(Drawable {
                kind: DrawKind::Enemy(e.kind),
                pos: e.pos,
                aim: Vec2::NEG_X,
                health_frac: Some(e.health_frac()),
            });
        }
        for p in self.arrows.iter().chain(self.enemy_arrows.iter()) {
            out.push(Drawable {
                kind: DrawKind::Projectile(p.visual),
                pos: p.pos,
                aim: p.vel.normalize_or_zero(),
                health_frac: None,
            });
        }
        for pu in &self.powerups {
            out.push(Drawable {
                kind: DrawKind::PowerUp(pu.kind),
                pos: pu.pos,
                aim: Vec2::X,
                health_frac: None,
            });
        }
        out
    }
}
