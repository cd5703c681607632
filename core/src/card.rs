use serde::Serialize;

use crate::FaceType;

/// A single card on the table.
///
/// Only [`PlayEngine`](crate::PlayEngine) flips the flags, which keeps
/// `discarded` and `selected` mutually exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    face: FaceType,
    selected: bool,
    discarded: bool,
}

impl Card {
    pub const fn new(face: FaceType) -> Self {
        Self {
            face,
            selected: false,
            discarded: false,
        }
    }

    pub const fn face(&self) -> FaceType {
        self.face
    }

    /// Face up as part of an unresolved pairing attempt.
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Matched and removed from play.
    pub const fn is_discarded(&self) -> bool {
        self.discarded
    }

    pub(crate) fn select(&mut self) {
        debug_assert!(!self.discarded);
        self.selected = true;
    }

    pub(crate) fn unselect(&mut self) {
        self.selected = false;
    }

    pub(crate) fn discard(&mut self) {
        self.selected = false;
        self.discarded = true;
    }
}
