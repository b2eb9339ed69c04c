//! Tunable game constants.
//!
//! Every knob has a default matching the shipped game; JSON overrides are partial
//! (missing fields fall back to the defaults).

use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::world::{Position, WorldVariant};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub gacha: GachaConfig,
    pub world: WorldConfig,
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Draw weights in percent. Validated to sum to 100 by `RarityTable::new`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RarityWeights {
    pub legendary: u32,
    pub epic: u32,
    pub rare: u32,
    pub common: u32,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self { legendary: 2, epic: 8, rare: 25, common: 65 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GachaConfig {
    pub standard_cost: u64,
    pub premium_cost: u64,
    pub daily_reward: u64,
    pub starting_standard: u64,
    pub starting_premium: u64,
    pub weights: RarityWeights,
}

impl Default for GachaConfig {
    fn default() -> Self {
        Self {
            standard_cost: 50,
            premium_cost: 10,
            daily_reward: 50,
            starting_standard: 500,
            starting_premium: 100,
            weights: RarityWeights::default(),
        }
    }
}

/// Pickup / arrival radii for one world variant.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct ProximityRadii {
    pub collectible: f64,
    pub landmark: f64,
}

impl ProximityRadii {
    pub const FLAT: ProximityRadii = ProximityRadii { collectible: 3.0, landmark: 8.0 };
    pub const DEPTH: ProximityRadii = ProximityRadii { collectible: 5.0, landmark: 12.0 };
}

/// Radii as written in JSON; absent fields keep the variant's default.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RadiiOverride {
    collectible: Option<f64>,
    landmark: Option<f64>,
}

impl RadiiOverride {
    fn over(self, base: ProximityRadii) -> ProximityRadii {
        ProximityRadii {
            collectible: self.collectible.unwrap_or(base.collectible),
            landmark: self.landmark.unwrap_or(base.landmark),
        }
    }
}

fn flat_radii<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<ProximityRadii, D::Error> {
    RadiiOverride::deserialize(de).map(|r| r.over(ProximityRadii::FLAT))
}

fn depth_radii<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<ProximityRadii, D::Error> {
    RadiiOverride::deserialize(de).map(|r| r.over(ProximityRadii::DEPTH))
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub walk_speed: f64,
    pub fly_speed: f64,
    /// Depth axis speed; depth only moves while flying.
    pub depth_speed: f64,
    pub min_bound: f64,
    pub max_bound: f64,
    pub coin_reward: u64,
    pub start: Position,
    #[serde(deserialize_with = "flat_radii")]
    pub flat_radii: ProximityRadii,
    #[serde(deserialize_with = "depth_radii")]
    pub depth_radii: ProximityRadii,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.3,
            fly_speed: 0.5,
            depth_speed: 0.4,
            min_bound: 0.0,
            max_bound: 100.0,
            coin_reward: 10,
            start: Position::new(50.0, 50.0, 50.0),
            flat_radii: ProximityRadii::FLAT,
            depth_radii: ProximityRadii::DEPTH,
        }
    }
}

impl WorldConfig {
    pub fn radii(&self, variant: WorldVariant) -> ProximityRadii {
        match variant {
            WorldVariant::Flat => self.flat_radii,
            WorldVariant::Depth => self.depth_radii,
        }
    }
}
