//! Property tests: the simulation never leaves its numeric envelope no matter
//! what the player mashes.

use glam::Vec2;
use proptest::prelude::*;

use castle_archer::consts::SIM_DT;
use castle_archer::sim::ballistics::aim_direction;
use castle_archer::sim::{GamePhase, GameState, TickInput, tick};
use castle_archer::tuning::Tuning;

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (
        -1.0f32..=1.0,
        -1.0f32..=1.0,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0.0f32..2000.0,
        0.0f32..1100.0,
        // Pause presses are rare but must be harmless
        prop::bool::weighted(0.02),
    )
        .prop_map(|(mx, my, sprint, fire, alt, ax, ay, pause)| TickInput {
            move_intent: Vec2::new(mx, my),
            sprint_held: sprint,
            fire,
            alt_fire: alt,
            aim_target: Vec2::new(ax, ay),
            pause,
            restart: false,
            quit: false,
        })
}

fn started(seed: u64) -> GameState {
    let mut s = GameState::new(seed, Tuning::default());
    tick(
        &mut s,
        &TickInput {
            restart: true,
            ..TickInput::default()
        },
        SIM_DT,
    );
    s
}

proptest! {
    #[test]
    fn state_stays_in_envelope(seed in 0u64..1000, inputs in prop::collection::vec(input_strategy(), 1..400)) {
        let mut s = started(seed);
        let t = s.tuning.clone();
        let mut last_score = s.score;
        for input in &inputs {
            tick(&mut s, input, SIM_DT);

            prop_assert!(s.player.pos.x.is_finite() && s.player.pos.y.is_finite());
            prop_assert!((20.0..=t.width - 20.0).contains(&s.player.pos.x));
            prop_assert!((0.0..=t.stamina_max).contains(&s.player.stamina));
            prop_assert!((1..=t.player_max_hp).contains(&s.player.hp));
            prop_assert!((0.0..=s.castle.max_hp).contains(&s.castle.hp));
            prop_assert!(s.score >= last_score);
            last_score = s.score;

            for p in s.arrows.iter().chain(s.enemy_arrows.iter()) {
                prop_assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
            }
            for e in &s.enemies {
                prop_assert!(e.hp > 0);
                prop_assert!(e.pos.x.is_finite());
            }
            if s.phase == GamePhase::GameOver {
                prop_assert!(s.castle.hp == 0.0);
                break;
            }
        }
    }

    #[test]
    fn clamped_dt_matches_cap(seed in 0u64..100, dt in 0.0f32..10.0) {
        let mut a = started(seed);
        let mut b = started(seed);
        let cap = a.tuning.max_frame_dt;
        let input = TickInput::default();
        tick(&mut a, &input, dt);
        tick(&mut b, &input, dt.min(cap));
        prop_assert_eq!(a.player.stamina, b.player.stamina);
        prop_assert_eq!(a.waves.spawn_timer, b.waves.spawn_timer);
        prop_assert_eq!(a.castle.hp, b.castle.hp);
    }

    #[test]
    fn aim_direction_is_always_finite_and_unit(
        ox in -1e6f32..1e6, oy in -1e6f32..1e6,
        tx in -1e6f32..1e6, ty in -1e6f32..1e6,
    ) {
        let d = aim_direction(Vec2::new(ox, oy), Vec2::new(tx, ty));
        prop_assert!(d.x.is_finite() && d.y.is_finite());
        prop_assert!((d.length() - 1.0).abs() < 1e-3);
    }
}
