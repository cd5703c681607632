use thiserror::Error;

use crate::CardCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Difficulty not supported")]
    UnsupportedDifficulty,
    #[error("Deck must contain at least one pair")]
    EmptyDeck,
    #[error("Too many pairs")]
    TooManyPairs,
    #[error("Deck has {actual} pairs but the board needs {expected}")]
    DeckSizeMismatch { expected: CardCount, actual: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;
