// Integration tests (native) for the `dragon-roost` crate.
// These drive `GameSession` the way the page does, without wasm-specific functionality.

use std::collections::HashMap;

use dragon_roost::{
    CurrencyKind, FrameLoop, GameConfig, GameError, GameSession, GachaConfig, NotifyLevel, Position, Rarity,
    RarityTable, RarityWeights, WorldConfig, WorldVariant,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn session() -> GameSession {
    GameSession::with_seed(GameConfig::default(), 2024).unwrap()
}

#[test]
fn summon_refused_when_short_of_crystals() {
    let config = GameConfig {
        gacha: GachaConfig { starting_standard: 40, ..GachaConfig::default() },
        ..GameConfig::default()
    };
    let mut s = GameSession::with_seed(config, 1).unwrap();
    let err = s.summon(false).unwrap_err();
    assert!(matches!(err, GameError::InsufficientFunds { currency: CurrencyKind::Standard, .. }));
    assert!(err.is_recoverable());
    assert_eq!(s.wallet().standard, 40);
    assert!(s.collection().is_empty());
    let notes = s.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotifyLevel::Error);
}

#[test]
fn summon_charges_exact_cost_and_appends_one() {
    let mut s = session();
    for n in 1..=10u64 {
        let before = s.wallet();
        s.summon(n % 2 == 0).unwrap();
        let after = s.wallet();
        if n % 2 == 0 {
            assert_eq!(after.premium, before.premium - 10);
            assert_eq!(after.standard, before.standard);
        } else {
            assert_eq!(after.standard, before.standard - 50);
            assert_eq!(after.premium, before.premium);
        }
        assert_eq!(s.collection().len() as u64, n);
    }
}

#[test]
fn premium_runs_dry_after_ten_summons() {
    let mut s = session();
    for _ in 0..10 {
        s.summon(true).unwrap();
    }
    assert_eq!(s.wallet().premium, 0);
    assert!(s.summon(true).is_err());
    assert_eq!(s.collection().len(), 10);
    // daily reward only tops up standard crystals
    s.claim_daily_reward();
    assert!(s.summon(true).is_err());
    s.purchase("premium_50").unwrap();
    assert!(s.summon(true).is_ok());
}

#[test]
fn rarity_frequencies_converge() {
    let table = RarityTable::new(RarityWeights::default()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0xD2A6);
    let trials = 200_000;
    let mut counts: HashMap<Rarity, u32> = HashMap::new();
    for _ in 0..trials {
        *counts.entry(table.pick(rng.gen_range(0.0..100.0))).or_default() += 1;
    }
    for (rarity, expected) in [
        (Rarity::Legendary, 0.02),
        (Rarity::Epic, 0.08),
        (Rarity::Rare, 0.25),
        (Rarity::Common, 0.65),
    ] {
        let share = counts.get(&rarity).copied().unwrap_or(0) as f64 / trials as f64;
        assert!((share - expected).abs() < 0.005, "{:?}: {} vs {}", rarity, share, expected);
    }
}

#[test]
fn session_summons_follow_odds() {
    let config = GameConfig {
        gacha: GachaConfig { starting_standard: 50 * 20_000, ..GachaConfig::default() },
        ..GameConfig::default()
    };
    let mut s = GameSession::with_seed(config, 5).unwrap();
    for _ in 0..20_000 {
        s.summon(false).unwrap();
    }
    let common = s.collection().count_by_rarity(Rarity::Common) as f64 / 20_000.0;
    let legendary = s.collection().count_by_rarity(Rarity::Legendary) as f64 / 20_000.0;
    assert!((common - 0.65).abs() < 0.02, "common share {}", common);
    assert!((legendary - 0.02).abs() < 0.006, "legendary share {}", legendary);
    assert_eq!(s.wallet().standard, 0);
}

#[test]
fn walking_west_and_north_picks_up_coin_once() {
    let mut s = session();
    s.enter_world(WorldVariant::Flat);
    s.drain_notifications();

    // 'a' + 'w' until level with the coin at (35, 45), then 'a' alone across it.
    s.key_down("a");
    s.key_down("w");
    for _ in 0..17 {
        let out = s.tick_world(16.0).unwrap();
        assert!(out.pickups.is_empty());
    }
    s.key_up("w");
    let mut picked = Vec::new();
    for _ in 0..200 {
        let out = s.tick_world(16.0).unwrap();
        picked.extend(out.pickups);
    }
    assert_eq!(picked, vec![1]);
    let world = s.world().unwrap();
    assert_eq!(world.coins(), 10);
    assert!(world.is_collected(1));
    assert_eq!(world.position().x, 0.0);

    let found = s.drain_notifications().into_iter().filter(|n| n.message == "Found 10 coins!").count();
    assert_eq!(found, 1);
}

#[test]
fn landmark_near_state_tracks_position() {
    let config = GameConfig {
        world: WorldConfig { start: Position::new(20.0, 36.0, 50.0), ..WorldConfig::default() },
        ..GameConfig::default()
    };
    let mut s = GameSession::with_seed(config, 3).unwrap();
    s.enter_world(WorldVariant::Flat);
    s.tick_world(16.0);
    assert_eq!(s.world().unwrap().near_landmark().map(|l| l.name), Some("Fire Mountain"));
    assert!(s.snapshot().world.unwrap().near_landmark.is_some());

    s.key_down("s");
    let mut cleared_at = None;
    for i in 0..20 {
        let out = s.tick_world(16.0).unwrap();
        let dist = ((out.position.x - 20.0).powi(2) + (out.position.y - 30.0).powi(2)).sqrt();
        if dist >= 8.0 {
            assert!(out.near.is_none());
            assert!(s.world().unwrap().near_landmark().is_none());
            cleared_at.get_or_insert(i);
        } else {
            assert_eq!(out.near, Some(0));
        }
    }
    assert!(cleared_at.is_some());
    let arrivals = s.drain_notifications().into_iter().filter(|n| n.message == "Arrived at Fire Mountain!").count();
    assert_eq!(arrivals, 1);
}

#[test]
fn frame_loop_drives_world_until_stopped() {
    let mut s = session();
    s.enter_world(WorldVariant::Depth);
    s.key_down("d");
    let mut fl = FrameLoop::new(s);
    let handle = fl.handle();
    for i in 0..10 {
        assert!(fl.run_frame(i as f64 * 16.0).is_continue());
    }
    handle.stop();
    assert!(fl.run_frame(160.0).is_break());
    let world = fl.ticker().world().unwrap();
    assert_eq!(world.ticks(), 10);
    assert!((world.position().x - 53.0).abs() < 1e-9);
}

#[test]
fn snapshot_serializes_to_json() {
    let mut s = session();
    let dragon = s.summon(false).unwrap();
    s.select_dragon(dragon.id);
    s.enter_world(WorldVariant::Depth);
    s.tick_world(16.0);
    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["dragon_count"], 1);
    assert_eq!(json["wallet"]["standard"], 450);
    assert_eq!(json["selected_dragon"]["id"], dragon.id.to_string());
    assert_eq!(json["world"]["variant"], "depth");
    assert_eq!(json["world"]["mode"], "walking");
    assert_eq!(json["world"]["altitude"], 50);
    assert_eq!(json["odds"], "Legendary: 2% | Epic: 8% | Rare: 25% | Common: 65%");
}
