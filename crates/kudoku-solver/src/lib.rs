//! Constraint rules and backtracking search for the kudoku engine.
//!
//! This crate is split into two modules:
//!
//! - [`rules`]: stateless constraint checks over a [`Board`] — placement
//!   legality, board-wide candidate computation, and the full-solution check.
//! - [`backtrack`]: a deterministic depth-first backtracking solver with an
//!   optional step observer (for animated solving), pacing, and cooperative
//!   cancellation.
//!
//! [`Board`]: kudoku_core::Board
//!
//! # Examples
//!
//! ```
//! use kudoku_core::Board;
//! use kudoku_solver::{BacktrackSolver, CancelToken, SolveOutcome};
//!
//! let mut board: Board = "
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
//! let solver = BacktrackSolver::new();
//! let outcome = solver.solve(&mut board, &CancelToken::new(), &mut ());
//! assert_eq!(outcome, SolveOutcome::Solved);
//! assert!(board.is_complete());
//! ```

pub mod backtrack;
pub mod rules;

pub use self::{
    backtrack::{BacktrackSolver, CancelToken, SolveObserver, SolveOutcome},
    rules::IncompleteError,
};
