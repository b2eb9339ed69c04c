// Catalog invariants for the static game data.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use dragon_roost::gacha::{DRAGON_POOL, SHOP_OFFERS};
use dragon_roost::world::{COIN_SPOTS, LANDMARKS};
use dragon_roost::{Rarity, RarityTable, RarityWeights};

#[test]
fn dragon_names_are_unique_and_stats_positive() {
    let mut seen = HashSet::new();
    for t in DRAGON_POOL.iter() {
        assert!(seen.insert(t.name), "duplicate dragon '{}'", t.name);
        assert!(t.power > 0 && t.hp > 0 && t.speed > 0, "non-positive stat on '{}'", t.name);
        assert!(t.image.starts_with("/img/"), "odd image path '{}' for '{}'", t.image, t.name);
    }
}

#[test]
fn every_weighted_rarity_has_templates() {
    let table = RarityTable::new(RarityWeights::default()).unwrap();
    for rarity in Rarity::DRAW_ORDER {
        let n = DRAGON_POOL.iter().filter(|t| t.rarity == rarity).count();
        assert!(table.weight(rarity) == 0 || n > 0, "no templates for {:?}", rarity);
    }
}

#[test]
fn world_entities_are_in_bounds_with_unique_ids() {
    let mut ids = HashSet::new();
    for (id, p) in COIN_SPOTS.iter() {
        assert!(ids.insert(*id), "duplicate coin id {}", id);
        for v in [p.x, p.y, p.z] {
            assert!((0.0..=100.0).contains(&v), "coin {} out of bounds", id);
        }
    }
    let names: HashSet<_> = LANDMARKS.iter().map(|l| l.name).collect();
    assert_eq!(names.len(), LANDMARKS.len());
    for l in LANDMARKS.iter() {
        for v in [l.position.x, l.position.y, l.position.z] {
            assert!((0.0..=100.0).contains(&v), "landmark '{}' out of bounds", l.name);
        }
    }
}

#[test]
fn shop_offer_ids_unique() {
    let ids: HashSet<_> = SHOP_OFFERS.iter().map(|o| o.id).collect();
    assert_eq!(ids.len(), SHOP_OFFERS.len());
    assert!(SHOP_OFFERS.iter().all(|o| o.amount > 0));
}
