//! Summoning ("gacha") core: weighted rarity draw, template pick, currency handling.
//!
//! The engine itself is stateless apart from its validated tables. Callers pass in
//! the wallet, collection, RNG and notification sink they own, so a summon either
//! applies all of its effects or none of them.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use uuid::Uuid;

use crate::config::{GachaConfig, RarityWeights};
use crate::error::{GameError, Result};
use crate::notify::{Notification, NotificationSink};

mod catalog;

pub use catalog::{DRAGON_POOL, SHOP_OFFERS};

// --- Dragon data -------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Ice,
    Shadow,
    Light,
    Earth,
    Wind,
}

impl Element {
    pub fn label(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Ice => "Ice",
            Element::Shadow => "Shadow",
            Element::Light => "Light",
            Element::Earth => "Earth",
            Element::Wind => "Wind",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Legendary,
    Epic,
    Rare,
    Common,
}

impl Rarity {
    /// Order in which cumulative weights are accumulated during a draw.
    pub const DRAW_ORDER: [Rarity; 4] = [Rarity::Legendary, Rarity::Epic, Rarity::Rare, Rarity::Common];

    fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Legendary => "Legendary",
            Rarity::Epic => "Epic",
            Rarity::Rare => "Rare",
            Rarity::Common => "Common",
        }
    }
}

/// Immutable catalog entry.
#[derive(Debug, PartialEq, Serialize)]
pub struct DragonTemplate {
    pub name: &'static str,
    pub element: Element,
    pub rarity: Rarity,
    pub power: u32,
    pub hp: u32,
    pub speed: u32,
    pub image: &'static str,
}

/// An owned dragon: a template plus the identifier minted at summon time.
#[derive(Clone, Debug, Serialize)]
pub struct Dragon {
    pub id: Uuid,
    #[serde(flatten)]
    pub template: &'static DragonTemplate,
}

impl Dragon {
    pub fn name(&self) -> &'static str {
        self.template.name
    }
    pub fn rarity(&self) -> Rarity {
        self.template.rarity
    }
}

/// Append-only, ordered by summon time.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Collection {
    dragons: Vec<Dragon>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, dragon: Dragon) {
        self.dragons.push(dragon);
    }

    pub fn len(&self) -> usize {
        self.dragons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dragons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dragon> {
        self.dragons.iter()
    }

    /// Most recent summon (the "reveal" card).
    pub fn last(&self) -> Option<&Dragon> {
        self.dragons.last()
    }

    pub fn get(&self, id: Uuid) -> Option<&Dragon> {
        self.dragons.iter().find(|d| d.id == id)
    }

    pub fn count_by_rarity(&self, rarity: Rarity) -> usize {
        self.dragons.iter().filter(|d| d.rarity() == rarity).count()
    }
}

// --- Currency ----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyKind {
    Standard,
    Premium,
}

impl fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyKind::Standard => write!(f, "standard"),
            CurrencyKind::Premium => write!(f, "premium"),
        }
    }
}

/// Two independent non-negative crystal counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Wallet {
    pub standard: u64,
    pub premium: u64,
}

impl Wallet {
    pub fn new(standard: u64, premium: u64) -> Self {
        Self { standard, premium }
    }

    pub fn balance(&self, kind: CurrencyKind) -> u64 {
        match kind {
            CurrencyKind::Standard => self.standard,
            CurrencyKind::Premium => self.premium,
        }
    }

    fn slot(&mut self, kind: CurrencyKind) -> &mut u64 {
        match kind {
            CurrencyKind::Standard => &mut self.standard,
            CurrencyKind::Premium => &mut self.premium,
        }
    }

    /// Deduct `amount`; leaves the wallet untouched when the balance is short.
    pub fn charge(&mut self, kind: CurrencyKind, amount: u64) -> Result<()> {
        let slot = self.slot(kind);
        match slot.checked_sub(amount) {
            Some(rest) => {
                *slot = rest;
                Ok(())
            }
            None => Err(GameError::InsufficientFunds { currency: kind, required: amount, available: *slot }),
        }
    }

    pub fn credit(&mut self, kind: CurrencyKind, amount: u64) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(amount);
    }
}

#[derive(Debug, Serialize)]
pub struct ShopOffer {
    pub id: &'static str,
    pub kind: CurrencyKind,
    pub amount: u64,
    pub price: &'static str,
    pub badge: Option<&'static str>,
}

// --- Rarity table --------------------------------------------------------------

/// Validated categorical distribution over rarity tiers (weights in percent).
#[derive(Clone, Debug)]
pub struct RarityTable {
    weights: [(Rarity, u32); 4],
}

impl RarityTable {
    pub fn new(w: RarityWeights) -> Result<Self> {
        let weights = [
            (Rarity::Legendary, w.legendary),
            (Rarity::Epic, w.epic),
            (Rarity::Rare, w.rare),
            (Rarity::Common, w.common),
        ];
        let total: u32 = weights.iter().map(|(_, w)| *w).sum();
        if total != 100 {
            return Err(GameError::InvalidRarityWeights { total });
        }
        Ok(Self { weights })
    }

    pub fn weight(&self, rarity: Rarity) -> u32 {
        self.weights[rarity.index()].1
    }

    /// Cumulative-sum selection for a uniform `draw` in [0, 100).
    pub fn pick(&self, draw: f64) -> Rarity {
        let mut cumulative = 0.0;
        for &(rarity, weight) in &self.weights {
            cumulative += weight as f64;
            if draw <= cumulative {
                return rarity;
            }
        }
        // Unreachable while the weights sum to 100.
        Rarity::Common
    }

    pub fn odds_summary(&self) -> String {
        self.weights
            .iter()
            .map(|(r, w)| format!("{}: {}%", r.label(), w))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

// --- Engine --------------------------------------------------------------------

/// Result of a successful draw before it is committed to session state.
#[derive(Clone, Debug)]
pub struct SummonOutcome {
    pub dragon: Dragon,
    pub wallet: Wallet,
}

#[derive(Debug)]
pub struct GachaEngine {
    table: RarityTable,
    pools: [Vec<&'static DragonTemplate>; 4],
    standard_cost: u64,
    premium_cost: u64,
    daily_reward: u64,
}

impl GachaEngine {
    pub fn new(cfg: &GachaConfig) -> Result<Self> {
        Self::with_catalog(cfg, &DRAGON_POOL)
    }

    /// Every tier with a non-zero weight must have at least one template.
    pub fn with_catalog(cfg: &GachaConfig, catalog: &'static [DragonTemplate]) -> Result<Self> {
        let table = RarityTable::new(cfg.weights)?;
        let mut pools: [Vec<&'static DragonTemplate>; 4] = Default::default();
        for template in catalog {
            pools[template.rarity.index()].push(template);
        }
        for rarity in Rarity::DRAW_ORDER {
            if table.weight(rarity) > 0 && pools[rarity.index()].is_empty() {
                return Err(GameError::EmptyRarityPool(rarity));
            }
        }
        Ok(Self {
            table,
            pools,
            standard_cost: cfg.standard_cost,
            premium_cost: cfg.premium_cost,
            daily_reward: cfg.daily_reward,
        })
    }

    pub fn table(&self) -> &RarityTable {
        &self.table
    }

    pub fn cost(&self, use_premium: bool) -> (CurrencyKind, u64) {
        if use_premium {
            (CurrencyKind::Premium, self.premium_cost)
        } else {
            (CurrencyKind::Standard, self.standard_cost)
        }
    }

    /// Pure draw over a wallet value. Nothing is mutated on the caller's side.
    pub fn draw<R: Rng + ?Sized>(&self, use_premium: bool, wallet: Wallet, rng: &mut R) -> Result<SummonOutcome> {
        let (kind, cost) = self.cost(use_premium);
        let mut wallet = wallet;
        wallet.charge(kind, cost)?;

        let rarity = self.table.pick(rng.gen_range(0.0..100.0));
        let template = self.pools[rarity.index()]
            .choose(rng)
            .copied()
            .ok_or(GameError::EmptyRarityPool(rarity))?;
        let id = uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid();
        Ok(SummonOutcome { dragon: Dragon { id, template }, wallet })
    }

    /// Draw, charge, append, then notify. On error nothing but the notification happens.
    pub fn summon<R: Rng + ?Sized>(
        &self,
        use_premium: bool,
        wallet: &mut Wallet,
        collection: &mut Collection,
        rng: &mut R,
        sink: &mut dyn NotificationSink,
    ) -> Result<Dragon> {
        match self.draw(use_premium, *wallet, rng) {
            Ok(SummonOutcome { dragon, wallet: charged }) => {
                *wallet = charged;
                collection.push(dragon.clone());
                tracing::debug!(id = %dragon.id, name = dragon.name(), rarity = ?dragon.rarity(), "summoned");
                sink.notify(Notification::success(format!(
                    "Summoned {} ({})!",
                    dragon.name(),
                    dragon.rarity().label()
                )));
                Ok(dragon)
            }
            Err(err) => {
                tracing::warn!(%err, "summon refused");
                let message = match err {
                    GameError::InsufficientFunds { currency: CurrencyKind::Premium, .. } => {
                        "Not enough premium crystals!".to_string()
                    }
                    GameError::InsufficientFunds { .. } => "Not enough crystals!".to_string(),
                    ref other => other.to_string(),
                };
                sink.notify(Notification::error(message));
                Err(err)
            }
        }
    }

    /// Always succeeds. Returns the new standard balance.
    pub fn claim_daily_reward(&self, wallet: &mut Wallet, sink: &mut dyn NotificationSink) -> u64 {
        wallet.credit(CurrencyKind::Standard, self.daily_reward);
        sink.notify(Notification::success(format!("Received {} crystals!", self.daily_reward)));
        wallet.standard
    }

    /// Mock purchase: credits the offer without any payment step.
    pub fn purchase(
        &self,
        offer_id: &str,
        wallet: &mut Wallet,
        sink: &mut dyn NotificationSink,
    ) -> Result<&'static ShopOffer> {
        let Some(offer) = SHOP_OFFERS.iter().find(|o| o.id == offer_id) else {
            sink.notify(Notification::error("That offer is not available"));
            return Err(GameError::UnknownOffer(offer_id.to_string()));
        };
        wallet.credit(offer.kind, offer.amount);
        let what = match offer.kind {
            CurrencyKind::Standard => "crystals",
            CurrencyKind::Premium => "premium crystals",
        };
        sink.notify(Notification::success(format!("Purchased {} {}!", offer.amount, what)));
        Ok(offer)
    }
}
