use thiserror::Error;

use crate::gacha::{CurrencyKind, Rarity};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Insufficient {currency} funds: need {required}, have {available}")]
    InsufficientFunds {
        currency: CurrencyKind,
        required: u64,
        available: u64,
    },

    #[error("Rarity weights must sum to 100, got {total}")]
    InvalidRarityWeights { total: u32 },

    #[error("No dragon templates for rarity {0:?}")]
    EmptyRarityPool(Rarity),

    #[error("Unknown shop offer: {0}")]
    UnknownOffer(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl GameError {
    /// Recoverable conditions leave session state untouched and are only reported.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::InsufficientFunds { .. } | GameError::UnknownOffer(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
