//! Per-session game state and the commands the UI issues against it.
//!
//! Nothing here persists past the session. The two cores never share state: the
//! summon screen works on wallet + collection, the world screen on its own `World`.

use std::ops::ControlFlow;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::config::GameConfig;
use crate::error::Result;
use crate::gacha::{Collection, Dragon, GachaEngine, ShopOffer, Wallet};
use crate::notify::{Notification, NotificationLog, NotificationSink};
use crate::scheduler::Ticker;
use crate::world::{InputState, TickOutcome, World, WorldSnapshot, WorldVariant};

pub struct GameSession {
    config: GameConfig,
    engine: GachaEngine,
    rng: ChaCha8Rng,
    seed: u64,
    wallet: Wallet,
    collection: Collection,
    selected: Option<Uuid>,
    world: Option<World>,
    input: InputState,
    notes: NotificationLog,
}

impl GameSession {
    /// Session seeded from OS / browser entropy.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        let engine = GachaEngine::new(&config.gacha)?;
        let wallet = Wallet::new(config.gacha.starting_standard, config.gacha.starting_premium);
        tracing::info!(seed, standard = wallet.standard, premium = wallet.premium, "session started");
        Ok(Self {
            engine,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            wallet,
            collection: Collection::new(),
            selected: None,
            world: None,
            input: InputState::new(),
            notes: NotificationLog::new(),
            config,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn wallet(&self) -> Wallet {
        self.wallet
    }
    pub fn collection(&self) -> &Collection {
        &self.collection
    }
    pub fn engine(&self) -> &GachaEngine {
        &self.engine
    }
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    // --- summon screen / shop ---

    pub fn summon(&mut self, use_premium: bool) -> Result<Dragon> {
        self.engine
            .summon(use_premium, &mut self.wallet, &mut self.collection, &mut self.rng, &mut self.notes)
    }

    pub fn claim_daily_reward(&mut self) -> u64 {
        self.engine.claim_daily_reward(&mut self.wallet, &mut self.notes)
    }

    pub fn purchase(&mut self, offer_id: &str) -> Result<&'static ShopOffer> {
        self.engine.purchase(offer_id, &mut self.wallet, &mut self.notes)
    }

    /// Picks the dragon shown in the world. Unknown ids are ignored.
    pub fn select_dragon(&mut self, id: Uuid) -> bool {
        if self.collection.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn selected_dragon(&self) -> Option<&Dragon> {
        self.selected.and_then(|id| self.collection.get(id))
    }

    // --- world screen ---

    /// Opens a fresh world; any previous world state is discarded.
    pub fn enter_world(&mut self, variant: WorldVariant) {
        self.input.release_all();
        self.world = Some(World::new(variant, self.config.world.clone()));
        if self.selected_dragon().is_none() {
            self.notes.notify(Notification::info("No dragon selected"));
        }
    }

    pub fn leave_world(&mut self) {
        if self.world.take().is_some() {
            tracing::info!("left world");
        }
        self.input.release_all();
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// One world frame. `None` while no world is open.
    pub fn tick_world(&mut self, elapsed_ms: f64) -> Option<TickOutcome> {
        let world = self.world.as_mut()?;
        Some(world.tick(&self.input, elapsed_ms, &mut self.notes))
    }

    // --- host surface ---

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notes.drain()
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            wallet: self.wallet,
            dragon_count: self.collection.len(),
            collection: &self.collection,
            last_summon: self.collection.last(),
            selected_dragon: self.selected_dragon(),
            odds: self.engine.table().odds_summary(),
            world: self.world.as_ref().map(World::snapshot),
        }
    }
}

/// Frames run while a world is open; closing it ends the loop.
impl Ticker for GameSession {
    fn on_frame(&mut self, _timestamp_ms: f64, elapsed_ms: f64) -> ControlFlow<()> {
        match self.tick_world(elapsed_ms) {
            Some(_) => ControlFlow::Continue(()),
            None => ControlFlow::Break(()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub wallet: Wallet,
    pub dragon_count: usize,
    pub collection: &'a Collection,
    pub last_summon: Option<&'a Dragon>,
    pub selected_dragon: Option<&'a Dragon>,
    pub odds: String,
    pub world: Option<WorldSnapshot>,
}
