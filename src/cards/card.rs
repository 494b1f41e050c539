//! A single card on the table.
//!
//! Cards carry two distinct relations:
//!
//! - **Instance identity** (`CardId`): derived `Eq`/`Hash`. Use this when
//!   cards are keys in lookup tables.
//! - **Pair equality** (`PairKey`): `Card::same_pair`. Use this to decide
//!   whether two cards match.
//!
//! Flags are only mutated by the game; callers see `&Card`.

use serde::{Deserialize, Serialize};

use super::pair_key::PairKey;

/// Instance identifier, unique within one deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card in a Concentration deal.
///
/// Not serializable: cards are only built by deck building and only changed
/// by the game. Use `CardView` to ship card state elsewhere.
#[derive(Clone, Debug)]
pub struct Card {
    id: CardId,
    pair_key: PairKey,

    /// Currently showing its face.
    pub(crate) face_up: bool,

    /// Resolved as part of a matched pair. Never reverts.
    pub(crate) matched: bool,

    /// Has been part of a mismatch before.
    pub(crate) ever_flipped: bool,
}

impl Card {
    /// Create a face-down, unmatched, unseen card.
    #[must_use]
    pub fn new(id: CardId, pair_key: PairKey) -> Self {
        Self {
            id,
            pair_key,
            face_up: false,
            matched: false,
            ever_flipped: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn pair_key(&self) -> PairKey {
        self.pair_key
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    #[must_use]
    pub fn ever_flipped(&self) -> bool {
        self.ever_flipped
    }

    /// Face up and still in play.
    #[must_use]
    pub fn is_face_up_unmatched(&self) -> bool {
        self.face_up && !self.matched
    }

    /// True if both cards belong to the same pair.
    ///
    /// A card is in the same pair as itself.
    #[must_use]
    pub fn same_pair(&self, other: &Card) -> bool {
        self.pair_key == other.pair_key
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} face_up={} matched={} ever_flipped={}",
            self.id, self.pair_key, self.face_up, self.matched, self.ever_flipped
        )
    }
}
