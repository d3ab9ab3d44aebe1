//! A single board cell.

use crate::{Digit, DigitSet};

/// One cell of the board: a value, a clue flag, and a candidate set.
///
/// A clue cell's value is fixed at board construction and its candidate set
/// is always empty. A non-clue cell may be empty (`value() == None`) or hold
/// a player/solver placement; its candidate set is maintained externally by
/// the constraint validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    value: Option<Digit>,
    is_clue: bool,
    candidates: DigitSet,
}

impl Cell {
    pub(crate) const fn clue(digit: Digit) -> Self {
        Self {
            value: Some(digit),
            is_clue: true,
            candidates: DigitSet::EMPTY,
        }
    }

    pub(crate) const fn empty() -> Self {
        Self {
            value: None,
            is_clue: false,
            candidates: DigitSet::EMPTY,
        }
    }

    /// Returns the cell's value, or `None` if the cell is empty.
    #[must_use]
    pub const fn value(self) -> Option<Digit> {
        self.value
    }

    /// Returns `true` if the cell is part of the original puzzle.
    #[must_use]
    pub const fn is_clue(self) -> bool {
        self.is_clue
    }

    /// Returns `true` if the cell holds no value.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.value.is_none()
    }

    /// Returns the cell's candidate set.
    ///
    /// Meaningful only for non-clue cells; clue cells always report the
    /// empty set.
    #[must_use]
    pub const fn candidates(self) -> DigitSet {
        self.candidates
    }

    pub(crate) const fn set_value(&mut self, value: Option<Digit>) {
        self.value = value;
    }

    pub(crate) const fn set_candidates(&mut self, candidates: DigitSet) {
        self.candidates = candidates;
    }
}
