use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Pairing state machine for one round.
///
/// Cards are addressed by their [`CardIndex`] in the deck's logical order. The card vector is built once in
/// [`PlayEngine::new`] and never regenerated, so [`PlayEngine::cards`] always returns the same sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayEngine {
    cards: Vec<Card>,
    pending: Option<CardIndex>,
    pairs_found: Saturating<CardCount>,
    attempts: Saturating<u32>,
    state: EngineState,
}

impl PlayEngine {
    pub fn new(deck: Deck) -> Self {
        let cards = deck.faces().iter().copied().map(Card::new).collect();
        Self {
            cards,
            pending: None,
            pairs_found: Saturating(0),
            attempts: Saturating(0),
            state: Default::default(),
        }
    }

    pub fn new_random(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(RandomDeckGenerator::new(seed).generate(difficulty))
    }

    /// Builds a random round from a difficulty name such as `"medium"`.
    pub fn from_difficulty_name(name: &str, seed: u64) -> Result<Self> {
        let difficulty: Difficulty = name.parse()?;
        Ok(Self::new_random(difficulty, seed))
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_at(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(usize::from(index))
    }

    pub fn card_count(&self) -> CardCount {
        // decks never exceed MAX_PAIRS pairs
        self.cards.len() as CardCount
    }

    pub fn already_selected_one(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_pick(&self) -> Option<CardIndex> {
        self.pending
    }

    /// Whether every card has been discarded.
    pub fn result(&self) -> bool {
        self.is_finished()
    }

    pub fn pairs_found(&self) -> CardCount {
        self.pairs_found.0
    }

    pub fn pairs_left(&self) -> CardCount {
        self.card_count() / 2 - self.pairs_found.0
    }

    /// Number of second picks resolved so far, matching or not.
    pub fn attempts(&self) -> u32 {
        self.attempts.0
    }

    pub fn can_select(&self, index: CardIndex) -> bool {
        self.card_at(index).is_some_and(|card| !card.is_discarded())
    }

    pub fn select_card(&mut self, index: CardIndex) -> SelectOutcome {
        use SelectOutcome::*;

        if !self.can_select(index) {
            return NoChange;
        }
        self.card_mut(index).select();
        self.mark_started();

        let Some(first) = self.pending else {
            self.pending = Some(index);
            return Pending;
        };
        if first == index {
            return NoChange;
        }

        self.pending = None;
        self.attempts += 1;

        if self.cards[usize::from(first)].face() == self.cards[usize::from(index)].face() {
            self.card_mut(first).discard();
            self.card_mut(index).discard();
            self.pairs_found += 1;
            log::trace!("matched cards {} and {}", first, index);

            if self.all_discarded() {
                self.end_game();
                Won
            } else {
                Matched
            }
        } else {
            self.card_mut(first).unselect();
            self.card_mut(index).unselect();
            log::trace!("mismatched cards {} and {}", first, index);
            Mismatched
        }
    }

    fn card_mut(&mut self, index: CardIndex) -> &mut Card {
        &mut self.cards[usize::from(index)]
    }

    fn all_discarded(&self) -> bool {
        self.cards.iter().all(Card::is_discarded)
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn end_game(&mut self) {
        if self.state.is_finished() {
            return;
        }
        self.state = EngineState::Won;
    }
}
