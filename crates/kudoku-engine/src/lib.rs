//! Engine facade coordinating the board model, constraint rules, and
//! backtracking solver.
//!
//! [`Engine`] is the single entry point a presentation adapter talks to. It
//! exclusively owns the [`Board`]; adapters only ever see `&Board` snapshots
//! or observer notifications, never a mutable reference.
//!
//! - Inbound operations: [`Engine::apply_move`], [`Engine::reset`],
//!   [`Engine::solve`] / [`Engine::spawn_solve`],
//!   [`Engine::validate_solution`], and the display-flag setters.
//! - Outbound notifications: the [`EngineObserver`] trait — full-board
//!   updates, single-cell updates, and per-cell [`CellCategory`]
//!   classifications.
//!
//! Long-running animated solves go through [`Engine::spawn_solve`], which
//! runs the search on a worker thread and hands back a poll-based
//! [`SolveHandle`]; at most one solve runs against the engine's board at a
//! time.
//!
//! [`Board`]: kudoku_core::Board
//!
//! # Examples
//!
//! ```
//! use kudoku_engine::{Engine, EngineError};
//! use kudoku_solver::SolveOutcome;
//!
//! let mut layout = [[0_u8; 9]; 9];
//! layout[0][0] = 5;
//! let mut engine = Engine::from_clues(&layout).unwrap();
//!
//! engine.apply_move(0, 1, 3)?;
//! assert_eq!(engine.solve(false)?, SolveOutcome::Solved);
//! assert!(engine.validate_solution()?);
//! # Ok::<(), EngineError>(())
//! ```

mod engine;
mod notify;
mod task;

pub use self::{
    engine::{Engine, EngineError},
    notify::{CellCategory, EngineObserver},
    task::{SolveEvent, SolveHandle},
};
