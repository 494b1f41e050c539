//! Cards, pair keys and deck building.
//!
//! ## Key Types
//!
//! - `PairKey`: shared by the two cards of a pair
//! - `PairKeyAllocator`: issues keys two at a time, scoped to one build
//! - `CardId`: instance identity within a deal
//! - `Card`: flags for one physical card

pub mod card;
pub mod deck;
pub mod pair_key;

pub use card::{Card, CardId};
pub use deck::{build_deck, is_well_paired, pair_histogram};
pub use pair_key::{PairKey, PairKeyAllocator, PairKeyAllocatorState};
