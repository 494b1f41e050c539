//! Concentration: the flip rules, scoring and timing.
//!
//! - Deal `n` pairs face down, shuffled
//! - Turn cards up one at a time; two of a pair stay up as a match (+2)
//! - A mismatch costs a point for each card that had been seen before
//! - Finishing fast earns a bonus per time threshold beaten

mod concentration;
pub mod scoring;
pub mod snapshot;

pub use concentration::{ChooseOutcome, Concentration};
pub use scoring::SpeedBonus;
pub use snapshot::{CardView, GameSnapshot};
