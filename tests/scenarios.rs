// Session-level scenarios driven through the public API.

use fish_catch::platform::{InputProvider, Key, KeyState};
use fish_catch::sim::{FishKind, GamePhase, LossReason, SpawnPattern, Tier};
use fish_catch::{Settings, Simulation};
use glam::Vec2;
use proptest::prelude::*;

fn settings() -> Settings {
    Settings {
        seed: Some(77),
        ..Settings::default()
    }
}

/// Fresh session with no fish on screen
fn empty_sim(settings: Settings) -> Simulation {
    let mut sim = Simulation::new(settings).unwrap();
    let (fishery, registry) = sim.fishery_and_registry();
    fishery.clear(registry);
    sim
}

/// Spawn a single motionless fish at `pos`
fn drop_fish(sim: &mut Simulation, kind: FishKind, pos: Vec2) {
    let (fishery, registry) = sim.fishery_and_registry();
    let pattern = SpawnPattern::parse(&kind.symbol().to_string()).unwrap();
    fishery.spawn(&pattern, registry);
    let fish = fishery.fish_mut().last_mut().unwrap();
    fish.body.pos = pos;
    fish.speed = 0.0;
}

/// Spawn a benign fish exactly covering the net
fn drop_on_net(sim: &mut Simulation) {
    let net = sim.net().body.clone();
    drop_fish(sim, FishKind::Benign, net.pos);
    sim.fishery_mut().fish_mut().last_mut().unwrap().body.size = net.size;
}

#[test]
fn pattern_columns_and_rows() {
    let mut sim = empty_sim(Settings {
        width: 600.0,
        ..settings()
    });
    let pattern = SpawnPattern::parse("--G--\n--R--").unwrap();
    assert_eq!(pattern.cols(), 5);

    let (fishery, registry) = sim.fishery_and_registry();
    fishery.spawn(&pattern, registry);
    let fish = fishery.fish();
    assert_eq!(fish.len(), 2);
    assert_eq!(fish[0].kind, FishKind::Benign);
    assert_eq!(fish[1].kind, FishKind::Hostile);
    // Column 3 of 5 with spacing 600 / 6
    assert_eq!(fish[0].body.pos.x, 300.0);
    assert_eq!(fish[1].body.pos.x, 300.0);
    // Consecutive spawn rows, one row step apart
    let step = sim.settings().fish_spacing_y;
    let fish = sim.fishery().fish();
    assert!((fish[1].body.pos.y - fish[0].body.pos.y - step).abs() < 1e-4);
}

#[test]
fn catching_overlapping_benign_fish_scores() {
    let mut sim = empty_sim(settings());
    drop_on_net(&mut sim);

    sim.tick(0.0, &KeyState::default()).unwrap();
    assert_eq!(sim.score(), 1);
    assert_eq!(sim.missed(), 0);
    assert_eq!(sim.hud().score_text(), "Score: 1");
    assert_eq!(sim.phase(), GamePhase::Playing);
}

#[test]
fn caught_fish_is_removed_next_tick() {
    let mut sim = empty_sim(settings());
    drop_on_net(&mut sim);
    let id = sim.fishery().fish()[0].id();
    let keys = KeyState::default();

    sim.tick(0.0, &keys).unwrap();
    assert!(sim.registry().contains(id));
    sim.tick(0.0, &keys).unwrap();
    assert!(!sim.registry().contains(id));
    assert_eq!(sim.score(), 1);
}

#[test]
fn benign_fish_leaving_screen_is_missed() {
    let mut sim = empty_sim(settings());
    let height = sim.settings().height;
    drop_fish(&mut sim, FishKind::Benign, Vec2::new(0.0, height - 1.0));
    sim.fishery_mut().fish_mut()[0].speed = 5.0;

    sim.tick(1.0, &KeyState::default()).unwrap();
    assert_eq!(sim.missed(), 1);
    assert_eq!(sim.score(), 0);
    assert_eq!(sim.hud().missed_text(), "Missed: 1 / 3");
}

#[test]
fn hostile_fish_leaving_screen_is_not_missed() {
    let mut sim = empty_sim(settings());
    let height = sim.settings().height;
    drop_fish(&mut sim, FishKind::Hostile, Vec2::new(0.0, height + 1.0));

    sim.tick(0.0, &KeyState::default()).unwrap();
    assert_eq!(sim.missed(), 0);
}

#[test]
fn missing_threshold_ends_session() {
    let mut sim = empty_sim(settings());
    let below = Vec2::new(0.0, sim.settings().height + 1.0);
    for _ in 0..3 {
        drop_fish(&mut sim, FishKind::Benign, below);
    }

    sim.tick(0.0, &KeyState::default()).unwrap();
    assert_eq!(sim.phase(), GamePhase::Lost(LossReason::MissedTooMany));
    assert_eq!(
        sim.hud().message.as_deref(),
        Some("You lose! You missed too many benign fish.")
    );

    // Nothing is processed afterwards
    drop_on_net(&mut sim);
    sim.tick(1.0, &KeyState::default()).unwrap();
    assert_eq!(sim.score(), 0);
    assert_eq!(sim.missed(), 3);
    assert_eq!(sim.fishery().difficulty().increases_applied, 0);
}

#[test]
fn catching_hostile_fish_ends_session() {
    let mut sim = empty_sim(settings());
    let net = sim.net().body.clone();
    drop_fish(&mut sim, FishKind::Hostile, net.pos);

    sim.tick(0.0, &KeyState::default()).unwrap();
    assert_eq!(sim.phase(), GamePhase::Lost(LossReason::CaughtHostile));
}

#[test]
fn score_threshold_unlocks_next_tier_once() {
    let mut sim = empty_sim(settings());
    let keys = KeyState::default();
    let easy_only = sim.fishery().pool_size();

    for catch in 1..=19 {
        drop_on_net(&mut sim);
        sim.tick(0.0, &keys).unwrap();
        assert_eq!(sim.score(), catch);
        let unlocked: Vec<Tier> = sim.fishery().unlocked_tiers().collect();
        if catch < 10 {
            assert_eq!(unlocked, vec![Tier::Easy]);
            assert_eq!(sim.fishery().pool_size(), easy_only);
        } else {
            assert_eq!(unlocked, vec![Tier::Easy, Tier::Medium]);
        }
    }
    assert_eq!(sim.fishery().difficulty().increases_applied, 1);
    assert!(sim.fishery().difficulty().divisor < sim.settings().v_unit_divisor);
}

#[test]
fn invalid_settings_rejected_at_startup() {
    let result = Simulation::new(Settings {
        width: 0.0,
        ..settings()
    });
    assert!(result.is_err());
}

#[test]
fn key_state_drives_net() {
    let mut sim = empty_sim(settings());
    let mut keys = KeyState::default();
    keys.set_code("ArrowRight", true);
    assert!(keys.is_pressed(Key::Right));

    let start = sim.net().body.pos.x;
    sim.tick(2.0, &keys).unwrap();
    assert!(sim.net().body.pos.x > start);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn session_invariants_hold(
        seed in any::<u64>(),
        frames in proptest::collection::vec((0.0f32..4.0, any::<bool>(), any::<bool>()), 1..300),
    ) {
        let settings = Settings { seed: Some(seed), ..Settings::default() };
        let max = settings.max_difficulty_increases;
        let mut sim = Simulation::new(settings).unwrap();
        let mut previous_divisor = sim.fishery().difficulty().divisor;
        let mut previous_score = 0;

        for (dt, left, right) in frames {
            let mut keys = KeyState::default();
            if left { keys.press(Key::Left); }
            if right { keys.press(Key::Right); }
            sim.tick(dt, &keys).unwrap();

            let difficulty = sim.fishery().difficulty();
            prop_assert!(difficulty.increases_applied <= max);
            prop_assert!(difficulty.divisor <= previous_divisor);
            prop_assert!(difficulty.divisor >= sim.settings().min_v_unit_divisor);
            prop_assert!(sim.score() >= previous_score);
            prop_assert!(sim.missed() <= sim.settings().game_over_threshold);
            // Registry mirrors the live population plus the net
            prop_assert_eq!(sim.registry().len(), sim.fishery().active_count() + 1);

            let net = &sim.net().body;
            prop_assert!(net.pos.x >= 0.0 && net.pos.x + net.size.x <= sim.settings().width + 1e-3);

            previous_divisor = difficulty.divisor;
            previous_score = sim.score();
        }
    }
}
