//! The engine facade.

use std::{
    fmt::{self, Debug},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::TryRecvError,
    },
    time::Duration,
};

use kudoku_core::{Board, Digit, LayoutError, OutOfRangeError, Position};
use kudoku_solver::{
    BacktrackSolver, CancelToken, IncompleteError, SolveObserver, SolveOutcome, rules,
};

use crate::{
    notify::{CellCategory, EngineObserver},
    task::{self, SolveEvent, SolveHandle, WorkerEvent},
};

/// Pacing between animated solve steps, matching the original engine's feel.
const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(50);

/// Boundary-facing errors reported to the presentation adapter.
///
/// Every failing operation leaves the board unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EngineError {
    /// A row or column index fell outside 0-8.
    #[display("{_0}")]
    OutOfRange(#[from] OutOfRangeError),
    /// A move value fell outside 0-9.
    #[display("value {value} out of range 0-9")]
    ValueOutOfRange {
        /// The rejected value.
        value: u8,
    },
    /// A move targeted a clue cell.
    #[display("cannot modify clue cell at row {row}, col {col}")]
    ClueCell {
        /// Row of the clue cell.
        row: u8,
        /// Column of the clue cell.
        col: u8,
    },
    /// A move violated row, column, or box uniqueness.
    #[display("placing {value} at row {row}, col {col} violates the rules")]
    RuleViolation {
        /// Target row.
        row: u8,
        /// Target column.
        col: u8,
        /// The rejected value.
        value: u8,
    },
    /// Solution validation was requested while cells are still empty.
    #[display("{_0}")]
    Incomplete(#[from] IncompleteError),
    /// A solve is already running against this board.
    #[display("a solve is already in progress")]
    SolveInProgress,
    /// The background solve worker went away without reporting a result.
    #[display("solve worker disconnected")]
    WorkerDisconnected,
}

/// Facade over the board model, constraint rules, and backtracking solver.
///
/// The engine owns its [`Board`] exclusively. Presentation adapters read
/// state through [`board`](Self::board) or [`EngineObserver`] notifications
/// and drive changes through the inbound operations; they never receive
/// mutable access.
pub struct Engine {
    board: Board,
    show_possible_numbers: bool,
    show_invalid_fields: bool,
    step_delay: Duration,
    observers: Vec<Box<dyn EngineObserver>>,
    // Identity of the background solve currently owning the board, shared
    // with its handle. The flag flips when the handle is dropped undrained.
    flight: Option<Arc<AtomicBool>>,
}

impl Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("board", &self.board)
            .field("show_possible_numbers", &self.show_possible_numbers)
            .field("show_invalid_fields", &self.show_invalid_fields)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine over an initial board, recomputing candidates.
    #[must_use]
    pub fn new(mut board: Board) -> Self {
        rules::compute_candidates(&mut board);
        Self {
            board,
            show_possible_numbers: false,
            show_invalid_fields: false,
            step_delay: DEFAULT_STEP_DELAY,
            observers: Vec::new(),
            flight: None,
        }
    }

    /// Creates an engine from a 9×9 clue layout (0 = empty, 1-9 = clue).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the layout contains out-of-range values or
    /// duplicate clues within a row, column, or box.
    pub fn from_clues(layout: &[[u8; 9]; 9]) -> Result<Self, LayoutError> {
        Ok(Self::new(Board::from_clues(layout)?))
    }

    /// Returns a read-only snapshot of the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Registers an observer for outbound notifications.
    pub fn add_observer(&mut self, observer: Box<dyn EngineObserver>) {
        self.observers.push(observer);
    }

    /// Enables or disables candidate-mark rendering and re-notifies.
    pub fn set_show_possible_numbers(&mut self, show: bool) {
        self.show_possible_numbers = show;
        self.notify_board();
    }

    /// Enables or disables invalid-field highlighting and re-notifies.
    pub fn set_show_invalid_fields(&mut self, show: bool) {
        self.show_invalid_fields = show;
        self.notify_classification();
    }

    /// Sets the pacing delay used between animated solve steps.
    pub fn set_step_delay(&mut self, delay: Duration) {
        self.step_delay = delay;
    }

    /// Applies a user move: value 1-9 places a digit, value 0 clears the
    /// cell.
    ///
    /// On success the whole board's candidates are recomputed and observers
    /// receive a single-cell update plus fresh classifications. A failed call
    /// leaves the board unchanged.
    ///
    /// # Errors
    ///
    /// - [`EngineError::OutOfRange`] if `row` or `col` is not in 0-8.
    /// - [`EngineError::ValueOutOfRange`] if `value` is not in 0-9.
    /// - [`EngineError::ClueCell`] if the target cell is a clue.
    /// - [`EngineError::RuleViolation`] if the digit already appears in the
    ///   target's row, column, or box.
    pub fn apply_move(&mut self, row: u8, col: u8, value: u8) -> Result<(), EngineError> {
        let pos = Position::try_new(row, col)?;
        if self.board.is_clue(pos) {
            return Err(EngineError::ClueCell { row, col });
        }
        let new_value = if value == 0 {
            None
        } else {
            let Some(digit) = Digit::try_from_value(value) else {
                return Err(EngineError::ValueOutOfRange { value });
            };
            if !rules::can_place(&self.board, pos, digit) {
                return Err(EngineError::RuleViolation { row, col, value });
            }
            Some(digit)
        };

        self.board.set_value(pos, new_value);
        rules::compute_candidates(&mut self.board);
        log::debug!("applied move {value} at {pos}");
        self.notify_cell(pos);
        self.notify_classification();
        Ok(())
    }

    /// Clears all non-clue cells, restoring the clue-only board.
    pub fn reset(&mut self) {
        self.board.reset();
        rules::compute_candidates(&mut self.board);
        log::debug!("board reset to clue-only state");
        self.notify_board();
        self.notify_classification();
    }

    /// Solves the board synchronously on the calling thread.
    ///
    /// Previously entered non-clue values are discarded first. With `animate`
    /// set, observers receive a full-board update per search step, paced by
    /// the configured step delay; prefer [`spawn_solve`](Self::spawn_solve)
    /// for animated solving so the adapter's thread stays responsive.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SolveInProgress`] while a background solve is
    /// running.
    pub fn solve(&mut self, animate: bool) -> Result<SolveOutcome, EngineError> {
        if self.solve_in_progress() {
            return Err(EngineError::SolveInProgress);
        }
        let solver = self.solver(animate);
        let token = CancelToken::new();
        let outcome = if animate {
            let mut bridge = ObserverBridge {
                observers: &mut self.observers,
                show_possible_numbers: self.show_possible_numbers,
            };
            solver.solve(&mut self.board, &token, &mut bridge)
        } else {
            solver.solve(&mut self.board, &token, &mut ())
        };
        self.notify_board();
        self.notify_classification();
        Ok(outcome)
    }

    /// Starts a background solve on a worker thread.
    ///
    /// The worker operates on a clone of the board; progress flows back
    /// through the returned [`SolveHandle`] and is applied by
    /// [`poll_solve`](Self::poll_solve). At most one solve may run at a
    /// time; the returned handle owns that flight until its finish event is
    /// drained or the handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SolveInProgress`] if a solve is already
    /// running.
    pub fn spawn_solve(&mut self, animate: bool) -> Result<SolveHandle, EngineError> {
        if self.solve_in_progress() {
            return Err(EngineError::SolveInProgress);
        }
        let solver = self.solver(animate);
        let handle = task::spawn(solver, self.board.clone(), animate);
        self.flight = Some(Arc::clone(&handle.detached));
        Ok(handle)
    }

    /// Drains one pending event from a background solve, if any.
    ///
    /// Step events install the stepped board snapshot; the finish event
    /// installs the final board and releases the solve guard. Both re-notify
    /// observers. Returns `None` while the worker is still between events.
    ///
    /// Only the handle that started the current solve can affect the board
    /// or the guard; polling a stale handle from an earlier, already-drained
    /// solve reports the dead worker without touching either.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkerDisconnected`] if the worker went away
    /// without reporting a result.
    pub fn poll_solve(&mut self, handle: &SolveHandle) -> Result<Option<SolveEvent>, EngineError> {
        let current = self
            .flight
            .as_ref()
            .is_some_and(|flight| Arc::ptr_eq(flight, &handle.detached));
        match handle.events.try_recv() {
            Ok(WorkerEvent::Step(board)) => {
                if current {
                    self.board = board;
                    self.notify_board();
                    self.notify_classification();
                }
                Ok(Some(SolveEvent::Step))
            }
            Ok(WorkerEvent::Finished(outcome, board)) => {
                if current {
                    self.board = board;
                    self.flight = None;
                    self.notify_board();
                    self.notify_classification();
                }
                Ok(Some(SolveEvent::Finished(outcome)))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                if current {
                    self.flight = None;
                }
                Err(EngineError::WorkerDisconnected)
            }
        }
    }

    /// Classifies a single cell for rendering.
    #[must_use]
    pub fn classify(&self, pos: Position) -> CellCategory {
        if self.board.is_clue(pos) {
            CellCategory::Clue
        } else if self.show_invalid_fields && !rules::placement_valid(&self.board, pos) {
            CellCategory::Invalid
        } else {
            CellCategory::Normal
        }
    }

    /// Returns the per-cell classification of the whole board.
    #[must_use]
    pub fn validate_fields(&self) -> [[CellCategory; 9]; 9] {
        let mut categories = [[CellCategory::Normal; 9]; 9];
        for pos in Position::ALL {
            categories[usize::from(pos.row())][usize::from(pos.col())] = self.classify(pos);
        }
        categories
    }

    /// Checks whether the board holds a complete, valid solution.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Incomplete`] if any cell is still empty.
    pub fn validate_solution(&self) -> Result<bool, EngineError> {
        Ok(rules::check_solution(&self.board)?)
    }

    fn solve_in_progress(&mut self) -> bool {
        match &self.flight {
            None => false,
            // The handle was dropped without draining its finish event. Its
            // worker has been cancelled and can no longer deliver anything,
            // so the flight is over.
            Some(flight) if flight.load(Ordering::Acquire) => {
                self.flight = None;
                false
            }
            Some(_) => true,
        }
    }

    fn solver(&self, animate: bool) -> BacktrackSolver {
        if animate {
            BacktrackSolver::new().step_delay(self.step_delay)
        } else {
            BacktrackSolver::new()
        }
    }

    fn notify_board(&mut self) {
        for observer in &mut self.observers {
            observer.board_updated(&self.board, self.show_possible_numbers);
        }
    }

    fn notify_cell(&mut self, pos: Position) {
        let cell = self.board[pos];
        let value = cell.value().map_or(0, Digit::value);
        let candidates = cell.candidates().as_flags();
        for observer in &mut self.observers {
            observer.cell_updated(
                pos.row(),
                pos.col(),
                value,
                candidates,
                self.show_possible_numbers,
            );
        }
    }

    fn notify_classification(&mut self) {
        let categories = self.validate_fields();
        for observer in &mut self.observers {
            for pos in Position::ALL {
                let category = categories[usize::from(pos.row())][usize::from(pos.col())];
                observer.cell_classified(pos.row(), pos.col(), category);
            }
        }
    }
}

/// Forwards solver steps to the engine's observers during synchronous
/// animated solving.
struct ObserverBridge<'a> {
    observers: &'a mut Vec<Box<dyn EngineObserver>>,
    show_possible_numbers: bool,
}

impl SolveObserver for ObserverBridge<'_> {
    fn on_step(&mut self, board: &Board) {
        for observer in self.observers.iter_mut() {
            observer.board_updated(board, self.show_possible_numbers);
        }
    }
}
