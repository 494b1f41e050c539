//! Scoring rules.
//!
//! | Event                                   | Points |
//! |-----------------------------------------|--------|
//! | Match                                   | +2     |
//! | Mismatch, per card already seen before  | -1     |
//! | Completion, per threshold beaten        | +1     |
//!
//! The speed bonus counts every threshold the finishing time is strictly
//! under. With the default table, finishing in 12s beats all six (+6) and
//! finishing in 42s beats none.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ConfigError;

/// Points for a matched pair.
pub const MATCH_POINTS: i64 = 2;

/// Points lost per previously seen card in a mismatch.
pub const MISMATCH_PENALTY: i64 = 1;

/// Default completion thresholds in seconds.
pub const DEFAULT_THRESHOLDS_SECS: [u32; 6] = [15, 20, 25, 30, 35, 40];

/// Completion bonus table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedBonus {
    thresholds_secs: SmallVec<[u32; 6]>,
}

impl Default for SpeedBonus {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLDS_SECS)
    }
}

impl SpeedBonus {
    /// Create a table from ascending thresholds in seconds.
    pub fn new(thresholds_secs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            thresholds_secs: thresholds_secs.into_iter().collect(),
        }
    }

    /// A table that never awards a bonus.
    #[must_use]
    pub fn none() -> Self {
        Self::new([])
    }

    #[must_use]
    pub fn thresholds_secs(&self) -> &[u32] {
        &self.thresholds_secs
    }

    /// Largest bonus this table can award.
    #[must_use]
    pub fn max_bonus(&self) -> u32 {
        saturating_u32(self.thresholds_secs.len())
    }

    /// Bonus for finishing after `elapsed_secs` seconds.
    #[must_use]
    pub fn bonus_for(&self, elapsed_secs: f64) -> u32 {
        let beaten = self
            .thresholds_secs
            .iter()
            .filter(|&&t| elapsed_secs < f64::from(t))
            .count();
        saturating_u32(beaten)
    }

    /// Thresholds must be non-zero and strictly ascending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds_secs.contains(&0) {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.thresholds_secs.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::ThresholdsNotAscending(self.thresholds_secs.to_vec()));
        }
        Ok(())
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
