//! Game configuration.
//!
//! `GameConfig` carries everything fixed for the lifetime of a deal:
//! how many pairs, how the deck is seeded, and the speed bonus table.
//! Resetting a game to a different pair count updates `pair_count` in place.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::game::SpeedBonus;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of pairs dealt (the deck holds twice as many cards).
    pub pair_count: usize,

    /// Shuffle seed. `None` draws a seed from OS entropy.
    /// Same seed produces the same deal.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Completion bonus thresholds.
    #[serde(default)]
    pub speed_bonus: SpeedBonus,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: 8,
            seed: None,
            speed_bonus: SpeedBonus::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration for `pair_count` pairs with default scoring.
    #[must_use]
    pub fn new(pair_count: usize) -> Self {
        Self {
            pair_count,
            ..Self::default()
        }
    }

    /// Create a configuration from a signed pair count.
    ///
    /// Negative counts are rejected rather than clamped.
    pub fn with_signed_pair_count(pair_count: i64) -> Result<Self, ConfigError> {
        usize::try_from(pair_count)
            .map(Self::new)
            .map_err(|_| ConfigError::NegativePairCount(pair_count))
    }

    /// Set the number of pairs.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the speed bonus table.
    #[must_use]
    pub fn with_speed_bonus(mut self, speed_bonus: SpeedBonus) -> Self {
        self.speed_bonus = speed_bonus;
        self
    }

    /// Check the configuration for inconsistencies.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.speed_bonus.validate()
    }
}
