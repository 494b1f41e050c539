//! The Concentration game.
//!
//! Owns the deal and every flag on it. Callers communicate intent by index
//! (or `CardId`) and read state back through `&Card`, accessors, or a
//! detached `GameSnapshot`.

use std::time::Instant;

use log::{debug, info, trace};
use smallvec::SmallVec;

use super::scoring::{MATCH_POINTS, MISMATCH_PENALTY};
use super::snapshot::{CardView, GameSnapshot};
use crate::cards::{build_deck, is_well_paired, Card, CardId};
use crate::core::{
    Clock, ConfigError, GameConfig, GameError, GameRng, GameRngState, Result, SystemClock,
};

/// What a selection did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChooseOutcome {
    /// Not an effective selection. Nothing changed.
    Ignored,
    /// Card turned face up with no card waiting for a partner.
    Revealed,
    /// Card completed a pair with the card at `partner`.
    ///
    /// `speed_bonus` is set when this match finished the game.
    Matched { partner: usize, speed_bonus: Option<u32> },
    /// Card did not match the card at `other`; `penalty` points were lost.
    Mismatched { other: usize, penalty: i64 },
}

impl ChooseOutcome {
    /// True if the selection counted as a flip.
    #[must_use]
    pub fn is_effective(self) -> bool {
        self != ChooseOutcome::Ignored
    }
}

/// A scored and timed game of Concentration.
///
/// Generic over its time source so tests can drive the completion bonus
/// with a `ManualClock`.
#[derive(Clone, Debug)]
pub struct Concentration<C: Clock = SystemClock> {
    config: GameConfig,
    cards: Vec<Card>,
    score: i64,
    flip_count: u64,
    first_move: Option<Instant>,
    rng: GameRng,
    clock: C,
}

impl Concentration<SystemClock> {
    /// Deal a new game of `pair_count` pairs on the system clock.
    #[must_use]
    pub fn new(pair_count: usize) -> Self {
        Self::build(GameConfig::new(pair_count), SystemClock)
    }
}

impl<C: Clock> Concentration<C> {
    /// Deal a new game from an explicit configuration and clock.
    pub fn with_config(config: GameConfig, clock: C) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    /// Deal from a saved shuffle stream.
    ///
    /// The first deal is the one the saved game would have made on its next
    /// reset. `config.seed` is ignored in favor of the saved state.
    pub fn resume(
        config: GameConfig,
        rng_state: &GameRngState,
        clock: C,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build_with_rng(config, GameRng::from_state(rng_state), clock))
    }

    fn build(config: GameConfig, clock: C) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::build_with_rng(config, rng, clock)
    }

    fn build_with_rng(config: GameConfig, rng: GameRng, clock: C) -> Self {
        let pair_count = config.pair_count;
        let mut game = Self {
            config,
            cards: Vec::new(),
            score: 0,
            flip_count: 0,
            first_move: None,
            rng,
            clock,
        };
        game.start_new_game(pair_count);
        game
    }

    /// Discard the current deal and shuffle a fresh one of `pair_count` pairs.
    ///
    /// Score, flip count and timing restart. The RNG stream continues, so
    /// consecutive deals differ while a seeded game stays reproducible.
    pub fn start_new_game(&mut self, pair_count: usize) {
        self.config.pair_count = pair_count;
        self.score = 0;
        self.flip_count = 0;
        self.first_move = None;

        self.cards = build_deck(pair_count);
        self.rng.shuffle(&mut self.cards);
        debug_assert!(is_well_paired(&self.cards));

        info!("new game: {} pairs, seed {}", pair_count, self.rng.seed());
    }

    /// Alias for `start_new_game`.
    pub fn reset(&mut self, pair_count: usize) {
        self.start_new_game(pair_count);
    }

    // === Queries ===

    /// Cards in table order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card at `index`, if on the table.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Current score. Can go negative.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Number of effective selections this deal.
    #[must_use]
    pub fn flip_count(&self) -> u64 {
        self.flip_count
    }

    /// Pairs in the current deal.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.config.pair_count
    }

    /// Configuration, with `pair_count` tracking the latest reset.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Time source used for move timing.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Seed of the shuffle stream, for reproducing a deal.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Position of the shuffle stream. Pass to `resume` to reproduce the
    /// next deal.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Position of the card with instance id `id`.
    #[must_use]
    pub fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    /// Every card matched. Vacuously true with zero pairs.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cards.iter().all(Card::is_matched)
    }

    /// Seconds since the first move, or `None` before it.
    #[must_use]
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.first_move
            .map(|start| self.clock.now().saturating_duration_since(start).as_secs_f64())
    }

    #[must_use]
    pub fn face_up_unmatched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_face_up_unmatched()).count()
    }

    /// Index of the face-up unmatched card, if exactly one exists.
    #[must_use]
    pub fn single_face_up_unmatched(&self) -> Option<usize> {
        let mut face_up = self.face_up_unmatched_indices().into_iter();
        match (face_up.next(), face_up.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }

    fn face_up_unmatched_indices(&self) -> SmallVec<[usize; 2]> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_face_up_unmatched())
            .map(|(i, _)| i)
            .collect()
    }

    /// Detached view of the table.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cards: self.cards.iter().map(CardView::of).collect(),
            score: self.score,
            flip_count: self.flip_count,
            pair_count: self.config.pair_count,
            finished: self.is_finished(),
            elapsed_seconds: self.elapsed_seconds(),
        }
    }

    // === Selection ===

    /// Choose the card at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not a position on the table.
    pub fn choose_card(&mut self, index: usize) -> ChooseOutcome {
        assert!(
            index < self.cards.len(),
            "card index {} out of range for {} cards",
            index,
            self.cards.len()
        );
        self.apply_choice(index)
    }

    /// Choose the card with instance id `id`.
    ///
    /// # Panics
    ///
    /// If no card on the table has that id.
    pub fn choose_card_by_id(&mut self, id: CardId) -> ChooseOutcome {
        let index = self
            .index_of(id)
            .unwrap_or_else(|| panic!("{} is not part of this game", id));
        self.apply_choice(index)
    }

    /// Choose the card at `index`, reporting a bad index as an error.
    pub fn try_choose_card(&mut self, index: usize) -> Result<ChooseOutcome> {
        if index >= self.cards.len() {
            return Err(GameError::CardOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        Ok(self.apply_choice(index))
    }

    /// Choose the card with instance id `id`, reporting a foreign id as an error.
    pub fn try_choose_card_by_id(&mut self, id: CardId) -> Result<ChooseOutcome> {
        let index = self.index_of(id).ok_or(GameError::UnknownCard(id))?;
        Ok(self.apply_choice(index))
    }

    fn apply_choice(&mut self, index: usize) -> ChooseOutcome {
        let chosen = &self.cards[index];
        if chosen.matched {
            trace!("ignored {}: already matched", chosen.id());
            return ChooseOutcome::Ignored;
        }

        let face_up = self.face_up_unmatched_indices();

        // A face-up card may only be picked again while two are showing
        if chosen.face_up && face_up.len() != 2 {
            trace!("ignored {}: already face up", chosen.id());
            return ChooseOutcome::Ignored;
        }

        if self.flip_count == 0 {
            self.first_move = Some(self.clock.now());
        }

        let prior = match face_up.as_slice() {
            [only] => Some(*only),
            _ => None,
        };

        let outcome = match prior {
            Some(prior) if self.cards[prior].same_pair(&self.cards[index]) => {
                self.cards[prior].matched = true;
                self.cards[index].matched = true;
                self.score += MATCH_POINTS;
                ChooseOutcome::Matched {
                    partner: prior,
                    speed_bonus: None,
                }
            }
            Some(prior) => {
                let seen = [prior, index]
                    .iter()
                    .filter(|&&i| self.cards[i].ever_flipped)
                    .count() as i64;
                let penalty = seen * MISMATCH_PENALTY;
                self.score -= penalty;
                self.cards[prior].ever_flipped = true;
                self.cards[index].ever_flipped = true;
                ChooseOutcome::Mismatched { other: prior, penalty }
            }
            None => {
                for &i in &face_up {
                    self.cards[i].face_up = false;
                }
                ChooseOutcome::Revealed
            }
        };

        self.cards[index].face_up = true;
        self.flip_count += 1;

        let outcome = match outcome {
            ChooseOutcome::Matched { partner, .. } if self.is_finished() => {
                let elapsed = self.elapsed_seconds().unwrap_or(0.0);
                let bonus = self.config.speed_bonus.bonus_for(elapsed);
                self.score += i64::from(bonus);
                info!(
                    "game finished in {:.1}s after {} flips: bonus {}, score {}",
                    elapsed, self.flip_count, bonus, self.score
                );
                ChooseOutcome::Matched {
                    partner,
                    speed_bonus: Some(bonus),
                }
            }
            other => other,
        };

        debug!(
            "flip {}: {} -> {:?}, score {}",
            self.flip_count,
            self.cards[index].id(),
            outcome,
            self.score
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::game::SpeedBonus;

    fn seeded(pair_count: usize) -> (Concentration<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let config = GameConfig::new(pair_count).with_seed(42);
        let game = Concentration::with_config(config, clock.clone()).unwrap();
        (game, clock)
    }

    fn partner_of<C: Clock>(game: &Concentration<C>, index: usize) -> usize {
        let card = &game.cards()[index];
        game.cards()
            .iter()
            .enumerate()
            .position(|(i, c)| i != index && c.same_pair(card))
            .unwrap()
    }

    fn stranger_of<C: Clock>(game: &Concentration<C>, index: usize) -> usize {
        let card = &game.cards()[index];
        game.cards().iter().position(|c| !c.same_pair(card)).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = Concentration::new(6);

        assert_eq!(game.cards().len(), 12);
        assert_eq!(game.pair_count(), 6);
        assert_eq!(game.score(), 0);
        assert_eq!(game.flip_count(), 0);
        assert_eq!(game.elapsed_seconds(), None);
        assert!(!game.is_finished());
        assert!(is_well_paired(game.cards()));
    }

    #[test]
    fn test_zero_pairs_is_finished() {
        let game = Concentration::new(0);
        assert!(game.cards().is_empty());
        assert!(game.is_finished());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_single_pair_fast_finish() {
        let (mut game, clock) = seeded(1);
        assert!(game.cards()[0].same_pair(&game.cards()[1]));

        assert_eq!(game.choose_card(0), ChooseOutcome::Revealed);
        assert_eq!(game.flip_count(), 1);
        assert!(game.cards()[0].is_face_up());
        assert_eq!(game.score(), 0);

        clock.advance_secs_f64(12.0);
        assert_eq!(
            game.choose_card(1),
            ChooseOutcome::Matched {
                partner: 0,
                speed_bonus: Some(6)
            }
        );
        assert!(game.cards().iter().all(Card::is_matched));
        assert_eq!(game.flip_count(), 2);
        assert_eq!(game.score(), 2 + 6);
        assert!(game.is_finished());
    }

    #[test]
    fn test_slow_finish_gets_no_bonus() {
        let (mut game, clock) = seeded(1);

        game.choose_card(0);
        clock.advance_secs_f64(42.0);
        game.choose_card(1);

        assert_eq!(game.score(), 2);
    }

    #[test]
    fn test_bonus_threshold_is_exclusive() {
        let (mut game, clock) = seeded(1);

        game.choose_card(1);
        clock.advance_secs_f64(15.0);
        game.choose_card(0);

        assert_eq!(game.score(), 2 + 5);
    }

    #[test]
    fn test_custom_bonus_table() {
        let clock = ManualClock::new();
        let config = GameConfig::new(1)
            .with_seed(1)
            .with_speed_bonus(SpeedBonus::none());
        let mut game = Concentration::with_config(config, clock).unwrap();

        game.choose_card(0);
        game.choose_card(1);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig::new(2).with_speed_bonus(SpeedBonus::new([30, 10]));
        assert!(Concentration::with_config(config, ManualClock::new()).is_err());
    }

    #[test]
    fn test_first_mismatch_is_free() {
        let (mut game, _clock) = seeded(3);
        let a = 0;
        let b = stranger_of(&game, a);

        game.choose_card(a);
        assert_eq!(
            game.choose_card(b),
            ChooseOutcome::Mismatched { other: a, penalty: 0 }
        );

        assert_eq!(game.score(), 0);
        assert_eq!(game.flip_count(), 2);
        assert!(!game.cards()[a].is_matched());
        assert!(!game.cards()[b].is_matched());
        assert!(game.cards()[a].ever_flipped());
        assert!(game.cards()[b].ever_flipped());
        assert_eq!(game.face_up_unmatched_count(), 2);
        assert_eq!(game.single_face_up_unmatched(), None);
    }

    #[test]
    fn test_repeat_mismatch_penalized_per_seen_card() {
        let (mut game, _clock) = seeded(3);
        let a = 0;
        let b = stranger_of(&game, a);

        game.choose_card(a);
        game.choose_card(b);

        // Re-touching a shown card clears the board and starts over
        assert_eq!(game.choose_card(a), ChooseOutcome::Revealed);
        assert!(!game.cards()[b].is_face_up());
        assert_eq!(game.single_face_up_unmatched(), Some(a));

        assert_eq!(
            game.choose_card(b),
            ChooseOutcome::Mismatched { other: a, penalty: 2 }
        );
        assert_eq!(game.score(), -2);
        assert_eq!(game.flip_count(), 4);
    }

    #[test]
    fn test_only_seen_cards_are_penalized() {
        let (mut game, _clock) = seeded(4);
        let a = 0;
        let b = stranger_of(&game, a);
        let cards = game.cards();
        let fresh = (0..cards.len())
            .find(|&i| !cards[i].same_pair(&cards[a]) && !cards[i].same_pair(&cards[b]))
            .unwrap();

        game.choose_card(a);
        game.choose_card(b);
        game.choose_card(fresh);
        assert_eq!(
            game.choose_card(a),
            ChooseOutcome::Mismatched { other: fresh, penalty: 1 }
        );
        assert_eq!(game.score(), -1);
    }

    #[test]
    fn test_match_after_mismatch() {
        let (mut game, _clock) = seeded(3);
        let a = 0;
        let b = stranger_of(&game, a);
        let a_partner = partner_of(&game, a);

        game.choose_card(a);
        game.choose_card(b);
        game.choose_card(a_partner);
        assert!(!game.cards()[a].is_face_up());
        assert!(!game.cards()[b].is_face_up());

        game.choose_card(a);
        assert!(game.cards()[a].is_matched());
        assert!(game.cards()[a_partner].is_matched());
        assert_eq!(game.score(), 2);
        assert_eq!(game.face_up_unmatched_count(), 0);
    }

    #[test]
    fn test_matched_card_is_strict_noop() {
        let (mut game, _clock) = seeded(2);
        let a = 0;
        let partner = partner_of(&game, a);
        game.choose_card(a);
        game.choose_card(partner);

        let before = game.snapshot();
        assert_eq!(game.choose_card(a), ChooseOutcome::Ignored);
        assert_eq!(game.choose_card(partner), ChooseOutcome::Ignored);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_single_face_up_card_cannot_be_rechosen() {
        let (mut game, _clock) = seeded(2);

        game.choose_card(3);
        let before = game.snapshot();

        assert_eq!(game.choose_card(3), ChooseOutcome::Ignored);
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.flip_count(), 1);
    }

    #[test]
    fn test_timer_starts_on_first_effective_flip() {
        let (mut game, clock) = seeded(2);

        clock.advance_secs_f64(5.0);
        assert_eq!(game.elapsed_seconds(), None);

        game.choose_card(0);
        assert_eq!(game.elapsed_seconds(), Some(0.0));

        clock.advance_secs_f64(3.0);
        assert_eq!(game.elapsed_seconds(), Some(3.0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut game, clock) = seeded(2);
        let a = 0;
        game.choose_card(a);
        game.choose_card(partner_of(&game, a));
        clock.advance_secs_f64(1.0);

        game.reset(5);

        assert_eq!(game.cards().len(), 10);
        assert_eq!(game.pair_count(), 5);
        assert_eq!(game.score(), 0);
        assert_eq!(game.flip_count(), 0);
        assert_eq!(game.elapsed_seconds(), None);
        assert!(game
            .cards()
            .iter()
            .all(|c| !c.is_face_up() && !c.is_matched() && !c.ever_flipped()));
    }

    #[test]
    fn test_seeded_deals_reproduce() {
        let (a, _) = seeded(10);
        let (b, _) = seeded(10);

        let keys = |g: &Concentration<ManualClock>| {
            g.cards().iter().map(Card::pair_key).collect::<Vec<_>>()
        };
        assert_eq!(keys(&a), keys(&b));
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_resume_reproduces_next_deal() {
        let (mut original, _clock) = seeded(10);
        original.reset(10);
        original.reset(10);

        let state = original.rng_state();
        let config = GameConfig::new(10).with_seed(999);
        let resumed = Concentration::resume(config, &state, ManualClock::new()).unwrap();

        original.reset(10);
        let ids = |g: &Concentration<ManualClock>| {
            g.cards().iter().map(Card::id).collect::<Vec<_>>()
        };
        assert_eq!(ids(&resumed), ids(&original));
        assert_eq!(resumed.seed(), 42);
        assert_eq!(resumed.flip_count(), 0);
    }

    #[test]
    fn test_resume_validates_config() {
        let (original, _clock) = seeded(2);
        let config = GameConfig::new(2).with_speed_bonus(SpeedBonus::new([5, 5]));

        assert!(Concentration::resume(config, &original.rng_state(), ManualClock::new()).is_err());
    }

    #[test]
    fn test_flip_count_passes_u32_range() {
        let (mut game, _clock) = seeded(2);
        game.flip_count = u64::from(u32::MAX);

        assert_eq!(game.choose_card(0), ChooseOutcome::Revealed);
        assert_eq!(game.flip_count(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_choose_by_id() {
        let (mut game, _clock) = seeded(2);
        let id = game.cards()[2].id();

        assert_eq!(game.choose_card_by_id(id), ChooseOutcome::Revealed);
        assert_eq!(game.index_of(id), Some(2));
        assert!(game.cards()[2].is_face_up());
    }

    #[test]
    #[should_panic(expected = "is not part of this game")]
    fn test_choose_foreign_id_panics() {
        let (mut game, _clock) = seeded(2);
        game.choose_card_by_id(CardId::new(99));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_choose_out_of_range_panics() {
        let (mut game, _clock) = seeded(2);
        game.choose_card(4);
    }

    #[test]
    fn test_try_choose_out_of_range() {
        let (mut game, _clock) = seeded(2);

        assert_eq!(
            game.try_choose_card(4),
            Err(GameError::CardOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(game.try_choose_card(0), Ok(ChooseOutcome::Revealed));
    }

    #[test]
    fn test_try_choose_foreign_id() {
        let (mut game, _clock) = seeded(2);

        assert_eq!(
            game.try_choose_card_by_id(CardId::new(99)),
            Err(GameError::UnknownCard(CardId::new(99)))
        );
        assert_eq!(game.flip_count(), 0);
    }

    #[test]
    fn test_outcome_is_effective() {
        assert!(!ChooseOutcome::Ignored.is_effective());
        assert!(ChooseOutcome::Revealed.is_effective());
        assert!(ChooseOutcome::Mismatched { other: 0, penalty: 0 }.is_effective());
    }
}
