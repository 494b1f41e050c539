//! # concentration
//!
//! The core of a single-player memory-matching card game.
//!
//! ## Design Principles
//!
//! 1. **The game owns mutation**: callers pass an index, read `&Card` or a
//!    `GameSnapshot` back. No shared mutable cards.
//!
//! 2. **Two card relations**: `Eq`/`Hash` is instance identity (`CardId`);
//!    `Card::same_pair` is pair equality (`PairKey`).
//!
//! 3. **Scoped allocation**: pair keys come from an allocator that lives for
//!    one deck build, so repeated games in one process are isolated.
//!
//! 4. **No timers**: elapsed time is a pure read against a `Clock`; display
//!    code polls it on its own schedule.
//!
//! ## Example
//!
//! ```
//! use concentration::{ChooseOutcome, Concentration};
//!
//! let mut game = Concentration::new(1);
//! assert_eq!(game.choose_card(0), ChooseOutcome::Revealed);
//!
//! let outcome = game.choose_card(1);
//! assert!(matches!(outcome, ChooseOutcome::Matched { partner: 0, .. }));
//! assert!(game.is_finished());
//! assert!(game.score() >= 2);
//! ```
//!
//! ## Modules
//!
//! - `core`: RNG, clocks, configuration, errors
//! - `cards`: pair keys, cards, deck building
//! - `game`: the `Concentration` state machine, scoring, snapshots

pub mod cards;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Clock, ConfigError, GameConfig, GameError, GameRng, GameRngState, ManualClock, SystemClock,
};

pub use crate::cards::{Card, CardId, PairKey, PairKeyAllocator, PairKeyAllocatorState};

pub use crate::game::{CardView, ChooseOutcome, Concentration, GameSnapshot, SpeedBonus};
