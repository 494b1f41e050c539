//! Core building blocks: RNG, clocks, configuration, errors.
//!
//! Nothing here knows the flip rules. The game module composes these.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GameConfig;
pub use error::{ConfigError, GameError, Result};
pub use rng::{GameRng, GameRngState};
