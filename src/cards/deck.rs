//! Deck building.
//!
//! A deck of `n` pairs is `2n` cards laid out back to back: ids `0, 1` share
//! the first key, `2, 3` the second, and so on. Shuffling happens in the game.

use rustc_hash::FxHashMap;

use super::card::{Card, CardId};
use super::pair_key::{PairKey, PairKeyAllocator};

/// Build an unshuffled deck of `pair_count` pairs with a fresh allocator.
#[must_use]
pub fn build_deck(pair_count: usize) -> Vec<Card> {
    let mut alloc = PairKeyAllocator::new();
    (0..pair_count * 2)
        .map(|i| Card::new(card_id(i), alloc.next_key()))
        .collect()
}

/// Instance id for the card built at `index`.
///
/// # Panics
///
/// If `index` does not fit a `CardId`.
fn card_id(index: usize) -> CardId {
    let raw = u32::try_from(index).expect("deck size fits in u32 card ids");
    CardId::new(raw)
}

/// Count how many cards hold each pair key.
#[must_use]
pub fn pair_histogram(cards: &[Card]) -> FxHashMap<PairKey, usize> {
    let mut counts = FxHashMap::default();
    for card in cards {
        *counts.entry(card.pair_key()).or_insert(0) += 1;
    }
    counts
}

/// True if every key in `cards` is held by exactly two cards.
#[must_use]
pub fn is_well_paired(cards: &[Card]) -> bool {
    pair_histogram(cards).values().all(|&n| n == 2)
}
