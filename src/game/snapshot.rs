//! Read-only views for the presentation layer.
//!
//! A snapshot is a detached copy: rendering code can hold it, serialize it
//! or hand it to another thread without touching the game. Pair keys of
//! face-down cards are hidden so a view never leaks the layout.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, PairKey};

/// What the player can see of one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    /// `None` while the card is face down.
    pub pair_key: Option<PairKey>,
    pub face_up: bool,
    pub matched: bool,
}

impl CardView {
    #[must_use]
    pub fn of(card: &Card) -> Self {
        let visible = card.is_face_up() || card.is_matched();
        Self {
            id: card.id(),
            pair_key: visible.then(|| card.pair_key()),
            face_up: card.is_face_up(),
            matched: card.is_matched(),
        }
    }
}

/// Everything needed to draw the table and its labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cards: Vec<CardView>,
    pub score: i64,
    pub flip_count: u64,
    pub pair_count: usize,
    pub finished: bool,
    pub elapsed_seconds: Option<f64>,
}
