//! Core board model for the kudoku engine.
//!
//! This crate provides the data structures shared by the constraint validator,
//! the backtracking solver, and the engine facade:
//!
//! - [`Digit`]: type-safe representation of sudoku digits 1-9
//! - [`DigitSet`]: a 9-bit candidate set over digits
//! - [`Position`]: a `(row, col)` board coordinate with house scans
//! - [`Cell`] and [`Board`]: the 9×9 grid of values, clue flags, and
//!   candidate sets
//!
//! The board is a plain in-memory model. It performs no rule checking of its
//! own beyond construction-time clue consistency; legality of placements is
//! the validator's responsibility.
//!
//! # Examples
//!
//! ```
//! use kudoku_core::{Board, Digit, Position};
//!
//! let board: Board = "
//!     53. .7. ...
//!     6.. 195 ...
//!     .98 ... .6.
//!     8.. .6. ..3
//!     4.. 8.3 ..1
//!     7.. .2. ..6
//!     .6. ... 28.
//!     ... 419 ..5
//!     ... .8. .79
//! "
//! .parse()
//! .unwrap();
//!
//! assert!(board.is_clue(Position::new(0, 0)));
//! assert_eq!(board[Position::new(0, 0)].value(), Some(Digit::D5));
//! ```

pub mod board;
pub mod cell;
pub mod digit;
pub mod digit_set;
pub mod position;

pub use self::{
    board::{Board, LayoutError, ParseBoardError},
    cell::Cell,
    digit::Digit,
    digit_set::DigitSet,
    position::{OutOfRangeError, Position},
};
