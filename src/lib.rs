//! Dragon Roost core crate.
//!
//! Two independent game cores sit behind a small browser bridge:
//! - `gacha`: weighted dragon summoning, the collection, the mock shop and daily reward.
//! - `world`: the free-roam map where the selected dragon walks or flies, picks up
//!   coins and discovers landmarks, advanced one tick per animation frame.
//!
//! `session::GameSession` owns all per-session state. `web` exposes it to JS.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod gacha;
pub mod notify;
pub mod scheduler;
pub mod session;
pub mod web;
pub mod world;

pub use config::{GameConfig, GachaConfig, RarityWeights, WorldConfig};
pub use error::{GameError, Result};
pub use gacha::{Collection, CurrencyKind, Dragon, DragonTemplate, Element, GachaEngine, Rarity, RarityTable, Wallet};
pub use notify::{Notification, NotificationLog, NotificationSink, NotifyLevel};
pub use scheduler::{FrameLoop, LoopHandle, LoopSlot, Ticker};
pub use session::{GameSession, SessionSnapshot};
pub use world::{InputState, Mode, Position, TickOutcome, World, WorldVariant};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Draw odds as shown under the summon buttons.
#[wasm_bindgen]
pub fn summon_odds() -> String {
    match RarityTable::new(RarityWeights::default()) {
        Ok(table) => table.odds_summary(),
        Err(_) => String::new(),
    }
}
