#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use stopwatch::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod session;
mod stopwatch;
mod types;

/// Largest number of pairs any board holds.
pub const MAX_PAIRS: CardCount = Difficulty::Hard.pair_count();

/// Faces of every card in logical order, laid out as consecutive pairs.
///
/// Only serialized for inspection; decks are built through the checked constructors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Deck {
    faces: Vec<FaceType>,
}

impl Deck {
    pub(crate) fn from_pair_faces(pair_faces: Vec<FaceType>) -> Self {
        let faces = pair_faces.into_iter().flat_map(|face| [face, face]).collect();
        Self { faces }
    }

    /// Builds a deck with one pair per entry of `pair_faces`.
    pub fn from_faces(pair_faces: &[FaceType]) -> Result<Self> {
        if pair_faces.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        if pair_faces.len() > usize::from(MAX_PAIRS) {
            return Err(GameError::TooManyPairs);
        }
        Ok(Self::from_pair_faces(pair_faces.to_vec()))
    }

    /// Like [`Deck::from_faces`], but the pair count must fill the board for `difficulty`.
    pub fn for_difficulty(difficulty: Difficulty, pair_faces: &[FaceType]) -> Result<Self> {
        let expected = difficulty.pair_count();
        if pair_faces.len() != usize::from(expected) {
            return Err(GameError::DeckSizeMismatch {
                expected,
                actual: pair_faces.len(),
            });
        }
        Self::from_faces(pair_faces)
    }

    pub fn faces(&self) -> &[FaceType] {
        &self.faces
    }

    pub fn card_count(&self) -> CardCount {
        // bounded by MAX_PAIRS at construction
        self.faces.len() as CardCount
    }

    pub fn pair_count(&self) -> CardCount {
        self.card_count() / 2
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    NoChange,
    Pending,
    Matched,
    Mismatched,
    Won,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            NoChange => false,
            Pending => true,
            Matched => true,
            Mismatched => true,
            Won => true,
        }
    }

    /// Whether this selection settled a pairing attempt.
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Matched | Self::Mismatched | Self::Won)
    }
}
