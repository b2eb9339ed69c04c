//! Free-roam world: the player's dragon walks or flies over a bounded map,
//! picking up coins and discovering landmarks.
//!
//! A single simulator serves both layouts. `WorldVariant::Flat` moves on x/y only,
//! `WorldVariant::Depth` adds a z axis that only changes while flying. Distances
//! are Euclidean over the variant's active axes.
//!
//! `World::step` is the pure transition (position + events for one tick);
//! `World::tick` commits it. The host drives ticks from its frame loop.

use serde::{Deserialize, Serialize};

use crate::config::{ProximityRadii, WorldConfig};
use crate::notify::{Notification, NotificationSink};

mod catalog;
mod input;

pub use catalog::{COIN_SPOTS, LANDMARKS};
pub use input::{Action, InputState, Key};

// --- Geometry ----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldVariant {
    Flat,
    Depth,
}

impl WorldVariant {
    pub fn axes(self) -> usize {
        match self {
            WorldVariant::Flat => 2,
            WorldVariant::Depth => 3,
        }
    }
}

/// Point in world space, each axis in [0, 100]. `z` is carried but inert for `Flat`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position, variant: WorldVariant) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = match variant {
            WorldVariant::Flat => 0.0,
            WorldVariant::Depth => self.z - other.z,
        };
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    fn clamped(self, min: f64, max: f64) -> Self {
        Self { x: self.x.clamp(min, max), y: self.y.clamp(min, max), z: self.z.clamp(min, max) }
    }
}

/// Cosmetic size factor for depth: far (z=0) draws at 0.4, near (z=100) at 1.2.
pub fn depth_scale(z: f64) -> f64 {
    0.4 + (z / 100.0) * 0.8
}

// --- Entities ----------------------------------------------------------------

#[derive(Debug, PartialEq, Serialize)]
pub struct Landmark {
    pub position: Position,
    pub name: &'static str,
    /// Visual hint for the host (icon name).
    pub tag: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Collectible {
    pub id: u32,
    pub position: Position,
    pub collected: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Walking,
    Flying,
}

/// Everything one tick produced.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub position: Position,
    pub mode: Mode,
    /// Ids of collectibles picked up this tick (possibly several).
    pub pickups: Vec<u32>,
    /// Index into the landmark list of the first landmark in range.
    pub near: Option<usize>,
}

// --- Simulator ---------------------------------------------------------------

#[derive(Debug)]
pub struct World {
    variant: WorldVariant,
    cfg: WorldConfig,
    radii: ProximityRadii,
    position: Position,
    mode: Mode,
    collectibles: Vec<Collectible>,
    landmarks: &'static [Landmark],
    coins: u64,
    near: Option<usize>,
    ticks: u64,
    elapsed_ms: f64,
}

impl World {
    pub fn new(variant: WorldVariant, cfg: WorldConfig) -> Self {
        let collectibles = COIN_SPOTS
            .iter()
            .map(|&(id, position)| Collectible { id, position, collected: false })
            .collect();
        Self::with_entities(variant, cfg, collectibles, &LANDMARKS)
    }

    pub fn with_entities(
        variant: WorldVariant,
        cfg: WorldConfig,
        collectibles: Vec<Collectible>,
        landmarks: &'static [Landmark],
    ) -> Self {
        let radii = cfg.radii(variant);
        let position = cfg.start.clamped(cfg.min_bound, cfg.max_bound);
        tracing::info!(?variant, x = position.x, y = position.y, z = position.z, "world created");
        Self {
            variant,
            radii,
            position,
            mode: Mode::Walking,
            collectibles,
            landmarks,
            coins: 0,
            near: None,
            ticks: 0,
            elapsed_ms: 0.0,
            cfg,
        }
    }

    pub fn variant(&self) -> WorldVariant {
        self.variant
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn coins(&self) -> u64 {
        self.coins
    }
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }
    pub fn landmarks(&self) -> &'static [Landmark] {
        self.landmarks
    }

    pub fn near_landmark(&self) -> Option<&'static Landmark> {
        let landmarks = self.landmarks;
        self.near.and_then(|i| landmarks.get(i))
    }

    pub fn is_collected(&self, id: u32) -> bool {
        self.collectibles.iter().any(|c| c.id == id && c.collected)
    }

    /// Whole-unit depth for the HUD.
    pub fn altitude(&self) -> i64 {
        self.position.z.floor() as i64
    }

    pub fn scale(&self) -> f64 {
        depth_scale(self.position.z)
    }

    /// Pure transition: where the player ends up and what that triggers.
    pub fn step(&self, input: &InputState) -> TickOutcome {
        let cfg = &self.cfg;
        let flying = input.is_flying();
        let speed = if flying { cfg.fly_speed } else { cfg.walk_speed };
        let (min, max) = (cfg.min_bound, cfg.max_bound);
        let mut position = self.position;

        // Per-axis, no diagonal normalization. Each step is clamped on its own,
        // so opposing keys at a wall still move away from it.
        if input.is_active(Action::North) {
            position.y = (position.y - speed).clamp(min, max);
        }
        if input.is_active(Action::South) {
            position.y = (position.y + speed).clamp(min, max);
        }
        if input.is_active(Action::West) {
            position.x = (position.x - speed).clamp(min, max);
        }
        if input.is_active(Action::East) {
            position.x = (position.x + speed).clamp(min, max);
        }
        if flying && self.variant == WorldVariant::Depth {
            if input.is_active(Action::Ascend) {
                position.z = (position.z - cfg.depth_speed).clamp(min, max);
            }
            if input.is_active(Action::Descend) {
                position.z = (position.z + cfg.depth_speed).clamp(min, max);
            }
        }

        let pickups = self
            .collectibles
            .iter()
            .filter(|c| !c.collected && position.distance(&c.position, self.variant) < self.radii.collectible)
            .map(|c| c.id)
            .collect();

        let near = self
            .landmarks
            .iter()
            .position(|l| position.distance(&l.position, self.variant) < self.radii.landmark);

        TickOutcome { position, mode: if flying { Mode::Flying } else { Mode::Walking }, pickups, near }
    }

    /// Advance one frame: move, collect, recompute the near landmark.
    pub fn tick(&mut self, input: &InputState, elapsed_ms: f64, sink: &mut dyn NotificationSink) -> TickOutcome {
        let outcome = self.step(input);
        self.position = outcome.position;
        self.mode = outcome.mode;
        self.ticks += 1;
        self.elapsed_ms += elapsed_ms.max(0.0);

        for id in &outcome.pickups {
            if let Some(c) = self.collectibles.iter_mut().find(|c| c.id == *id && !c.collected) {
                c.collected = true;
                self.coins = self.coins.saturating_add(self.cfg.coin_reward);
                tracing::debug!(id, coins = self.coins, "coin picked up");
                sink.notify(Notification::success(format!("Found {} coins!", self.cfg.coin_reward)));
            }
        }

        if outcome.near != self.near {
            if let Some(landmark) = outcome.near.and_then(|i| self.landmarks.get(i)) {
                tracing::debug!(name = landmark.name, "arrived at landmark");
                sink.notify(Notification::info(format!("Arrived at {}!", landmark.name)));
            }
            self.near = outcome.near;
        }
        outcome
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            variant: self.variant,
            position: self.position,
            mode: self.mode,
            coins: self.coins,
            collected: self.collectibles.iter().filter(|c| c.collected).map(|c| c.id).collect(),
            remaining: self.collectibles.iter().filter(|c| !c.collected).cloned().collect(),
            near_landmark: self.near_landmark(),
            altitude: self.altitude(),
            scale: self.scale(),
            ticks: self.ticks,
            elapsed_ms: self.elapsed_ms,
        }
    }
}

/// What the host renders for the world screen.
#[derive(Clone, Debug, Serialize)]
pub struct WorldSnapshot {
    pub variant: WorldVariant,
    pub position: Position,
    pub mode: Mode,
    pub coins: u64,
    pub collected: Vec<u32>,
    pub remaining: Vec<Collectible>,
    pub near_landmark: Option<&'static Landmark>,
    pub altitude: i64,
    pub scale: f64,
    pub ticks: u64,
    pub elapsed_ms: f64,
}
