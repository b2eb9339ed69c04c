// Dragon template catalog
// Fixed, read-only pool that summons draw from. Rarity spread: 1 legendary,
// 2 epic, 3 rare, 2 common.
use super::{CurrencyKind, DragonTemplate, Element, Rarity, ShopOffer};

pub static DRAGON_POOL: [DragonTemplate; 8] = [
    DragonTemplate { name: "Flame Sovereign", element: Element::Fire, rarity: Rarity::Legendary, power: 95, hp: 85, speed: 12, image: "/img/297e1d8b-1330-4b82-842b-006642877feb.jpg" },
    DragonTemplate { name: "Frost Warden", element: Element::Ice, rarity: Rarity::Epic, power: 75, hp: 90, speed: 8, image: "/img/4de6531c-8d1c-4b3c-9db7-8d0ad61e00f5.jpg" },
    DragonTemplate { name: "Shadow Hunter", element: Element::Shadow, rarity: Rarity::Epic, power: 80, hp: 70, speed: 15, image: "/img/a72e20cb-05dc-4813-9197-843755755fe2.jpg" },
    DragonTemplate { name: "Light Defender", element: Element::Light, rarity: Rarity::Rare, power: 60, hp: 75, speed: 10, image: "/img/a72e20cb-05dc-4813-9197-843755755fe2.jpg" },
    DragonTemplate { name: "Earth Titan", element: Element::Earth, rarity: Rarity::Rare, power: 65, hp: 95, speed: 5, image: "/img/297e1d8b-1330-4b82-842b-006642877feb.jpg" },
    DragonTemplate { name: "Wind Wanderer", element: Element::Wind, rarity: Rarity::Common, power: 45, hp: 55, speed: 18, image: "/img/4de6531c-8d1c-4b3c-9db7-8d0ad61e00f5.jpg" },
    DragonTemplate { name: "Lesser Flame", element: Element::Fire, rarity: Rarity::Common, power: 40, hp: 50, speed: 9, image: "/img/297e1d8b-1330-4b82-842b-006642877feb.jpg" },
    DragonTemplate { name: "Ice Scale", element: Element::Ice, rarity: Rarity::Rare, power: 55, hp: 70, speed: 8, image: "/img/4de6531c-8d1c-4b3c-9db7-8d0ad61e00f5.jpg" },
];

/// Mock shop offers. `price` is the display label only; no payment is taken.
pub static SHOP_OFFERS: [ShopOffer; 3] = [
    ShopOffer { id: "crystals_100", kind: CurrencyKind::Standard, amount: 100, price: "99", badge: None },
    ShopOffer { id: "crystals_500", kind: CurrencyKind::Standard, amount: 500, price: "399", badge: Some("Best value") },
    ShopOffer { id: "premium_50", kind: CurrencyKind::Premium, amount: 50, price: "599", badge: Some("Best offer") },
];
