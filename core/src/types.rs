use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Position of a card in the deck's logical order, also used as its identity.
pub type CardIndex = u8;

/// Count type used for card and pair counts.
pub type CardCount = u8;

/// Length of one side of the square board.
pub type Side = u8;

/// Symbol printed on a card; two cards with the same face form a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FaceType {
    Apple,
    Banana,
    Cherry,
    Orange,
    Peach,
    Watermelon,
}

impl FaceType {
    /// Every face, in the order random draws index into.
    pub const ALL: [FaceType; 6] = [
        Self::Apple,
        Self::Banana,
        Self::Cherry,
        Self::Orange,
        Self::Peach,
        Self::Watermelon,
    ];

    pub const fn name(self) -> &'static str {
        use FaceType::*;
        match self {
            Apple => "APPLE",
            Banana => "BANANA",
            Cherry => "CHERRY",
            Orange => "ORANGE",
            Peach => "PEACH",
            Watermelon => "WATERMELON",
        }
    }

    pub const fn glyph(self) -> &'static str {
        use FaceType::*;
        match self {
            Apple => "🍎",
            Banana => "🍌",
            Cherry => "🍒",
            Orange => "🍊",
            Peach => "🍑",
            Watermelon => "🍉",
        }
    }
}

impl fmt::Display for FaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Board size preset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn side(self) -> Side {
        use Difficulty::*;
        match self {
            Easy => 4,
            Medium => 6,
            Hard => 8,
        }
    }

    pub const fn card_count(self) -> CardCount {
        self.side() * self.side()
    }

    pub const fn pair_count(self) -> CardCount {
        self.card_count() / 2
    }

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy",
            Medium => "Medium",
            Hard => "Hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnsupportedDifficulty)
    }
}

impl TryFrom<Side> for Difficulty {
    type Error = GameError;

    /// Maps a board side length back to its preset.
    fn try_from(side: Side) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.side() == side)
            .ok_or(GameError::UnsupportedDifficulty)
    }
}
