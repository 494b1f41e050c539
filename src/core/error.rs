//! Error types.
//!
//! Ordinary gameplay never fails: selecting a matched card or an illegal
//! face-up card is an ignored selection, and zero pairs is a finished game.
//! These errors cover configuration and checked card lookups only.

use thiserror::Error;

use crate::cards::CardId;

/// Invalid game configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("pair count must not be negative, got {0}")]
    NegativePairCount(i64),

    #[error("speed bonus thresholds must be strictly ascending: {0:?}")]
    ThresholdsNotAscending(Vec<u32>),

    #[error("speed bonus thresholds must be greater than zero")]
    ZeroThreshold,
}

/// Checked card selection failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("card index {index} out of range for {len} cards")]
    CardOutOfRange { index: usize, len: usize },

    #[error("{0} is not part of this game")]
    UnknownCard(CardId),
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::CardOutOfRange { index: 7, len: 4 };
        assert_eq!(err.to_string(), "card index 7 out of range for 4 cards");

        let err = GameError::UnknownCard(CardId::new(9));
        assert_eq!(err.to_string(), "Card(9) is not part of this game");

        let err = ConfigError::NegativePairCount(-2);
        assert_eq!(err.to_string(), "pair count must not be negative, got -2");
    }
}
