//! Depth-first backtracking search.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use kudoku_core::{Board, Digit, Position};

use crate::rules;

/// Cooperative cancellation signal for a running solve.
///
/// Clones share the same flag. The solver checks the token at the top of
/// every recursion step; once cancelled, it unwinds without touching the
/// board further, leaving it in its current partial state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the solve holding a clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Receives a notification after every search step.
///
/// A step is either a tentative placement or a backtrack reset; in both cases
/// the observer sees the board immediately after the mutation and the
/// following candidate recomputation. The unit type `()` is a no-op observer
/// for unanimated solving.
pub trait SolveObserver {
    /// Called with the board state after each search step.
    fn on_step(&mut self, board: &Board);
}

impl SolveObserver for () {
    fn on_step(&mut self, _board: &Board) {}
}

/// The result of a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolveOutcome {
    /// A full valid assignment was found; the board holds the solution.
    Solved,
    /// No assignment exists; all non-clue cells are back to empty.
    Unsolvable,
    /// The solve was cancelled; the board holds the partial state reached.
    Cancelled,
}

enum Search {
    Solved,
    Exhausted,
    Cancelled,
}

/// Deterministic depth-first backtracking solver.
///
/// The search walks cell indices 0-80 in row-major order and tries digits in
/// ascending order, keeping the first solution it finds. Clue cells are
/// passed through without branching. An exhausted cell is reset to empty
/// before the search returns to its caller, which drives backtracking.
///
/// An optional per-step delay paces animated solving. The delay blocks the
/// calling thread, so animated solves belong on a worker thread; the engine
/// crate arranges that.
#[derive(Debug, Clone, Default)]
pub struct BacktrackSolver {
    step_delay: Option<Duration>,
}

impl BacktrackSolver {
    /// Creates a solver with no pacing delay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pacing delay applied after each step notification.
    #[must_use]
    pub fn step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = Some(delay);
        self
    }

    /// Solves the board in place.
    ///
    /// Any previously entered non-clue values are discarded first, and
    /// candidates are recomputed before the search starts. On
    /// [`SolveOutcome::Solved`] the board holds the full solution; on
    /// [`SolveOutcome::Unsolvable`] it is back to its clue-only state; on
    /// [`SolveOutcome::Cancelled`] it keeps the partial assignment reached
    /// when the token fired.
    ///
    /// Unexpected faults inside the search are contained and reported as
    /// [`SolveOutcome::Unsolvable`]; the search never propagates a panic.
    pub fn solve(
        &self,
        board: &mut Board,
        token: &CancelToken,
        observer: &mut dyn SolveObserver,
    ) -> SolveOutcome {
        board.reset();
        rules::compute_candidates(board);

        let result =
            panic::catch_unwind(AssertUnwindSafe(|| self.search(board, 0, token, observer)));
        let outcome = match result {
            Ok(Search::Solved) => SolveOutcome::Solved,
            Ok(Search::Exhausted) => SolveOutcome::Unsolvable,
            Ok(Search::Cancelled) => SolveOutcome::Cancelled,
            Err(_) => {
                log::error!("backtracking search faulted; reporting no solution");
                SolveOutcome::Unsolvable
            }
        };
        log::debug!("solve finished: {outcome:?}");
        outcome
    }

    fn search(
        &self,
        board: &mut Board,
        index: u8,
        token: &CancelToken,
        observer: &mut dyn SolveObserver,
    ) -> Search {
        if token.is_cancelled() {
            return Search::Cancelled;
        }
        if index >= 81 {
            return Search::Solved;
        }
        let pos = Position::from_index(index);
        if board.is_clue(pos) {
            return self.search(board, index + 1, token, observer);
        }

        for digit in Digit::ALL {
            if !rules::can_place(board, pos, digit) {
                continue;
            }
            board.set_value(pos, Some(digit));
            rules::compute_candidates(board);
            self.notify(board, observer);
            match self.search(board, index + 1, token, observer) {
                Search::Solved => return Search::Solved,
                Search::Cancelled => return Search::Cancelled,
                Search::Exhausted => {}
            }
        }

        // Every digit failed below this cell; undo and let the caller try
        // its next digit.
        board.set_value(pos, None);
        rules::compute_candidates(board);
        self.notify(board, observer);
        Search::Exhausted
    }

    fn notify(&self, board: &Board, observer: &mut dyn SolveObserver) {
        observer.on_step(board);
        if let Some(delay) = self.step_delay {
            thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str = "
        53. .7. ...
        6.. 195 ...
        .98 ... .6.
        8.. .6. ..3
        4.. 8.3 ..1
        7.. .2. ..6
        .6. ... 28.
        ... 419 ..5
        ... .8. .79
    ";

    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn solve_board(board: &mut Board) -> SolveOutcome {
        BacktrackSolver::new().solve(board, &CancelToken::new(), &mut ())
    }

    #[test]
    fn test_solves_unique_puzzle() {
        let mut board: Board = PUZZLE.parse().unwrap();
        assert_eq!(solve_board(&mut board), SolveOutcome::Solved);
        assert!(board.is_complete());
        assert_eq!(board.to_string(), SOLUTION);
        assert_eq!(rules::check_solution(&board), Ok(true));
    }

    #[test]
    fn test_discards_prior_input_before_solving() {
        let mut board: Board = PUZZLE.parse().unwrap();
        // A wrong entry must not survive into the solution.
        board.set_value(Position::new(0, 2), Some(Digit::D9));
        assert_eq!(solve_board(&mut board), SolveOutcome::Solved);
        assert_eq!(board.to_string(), SOLUTION);
    }

    #[test]
    fn test_unsolvable_puzzle_resets_board() {
        // Consistent clues, but cell (0, 3) ends up with no candidate: row
        // covers 1-6, the column covers 7 and 8, and the box covers 9.
        let mut layout = [[0_u8; 9]; 9];
        layout[0] = [1, 2, 3, 0, 0, 0, 4, 5, 6];
        layout[1][3] = 9;
        layout[1][4] = 7;
        layout[2][4] = 8;
        let clues = Board::from_clues(&layout).unwrap();

        let mut board = clues.clone();
        assert_eq!(solve_board(&mut board), SolveOutcome::Unsolvable);
        for pos in Position::ALL {
            if board.is_clue(pos) {
                assert_eq!(board.value(pos), clues.value(pos));
            } else {
                assert!(board[pos].is_empty());
            }
        }
    }

    #[test]
    fn test_pre_cancelled_token() {
        let mut board: Board = PUZZLE.parse().unwrap();
        let token = CancelToken::new();
        token.cancel();
        let outcome = BacktrackSolver::new().solve(&mut board, &token, &mut ());
        assert_eq!(outcome, SolveOutcome::Cancelled);
        assert!(!board.is_complete());
    }

    struct CancelAfter {
        token: CancelToken,
        remaining: usize,
    }

    impl SolveObserver for CancelAfter {
        fn on_step(&mut self, _board: &Board) {
            if self.remaining == 0 {
                self.token.cancel();
            } else {
                self.remaining -= 1;
            }
        }
    }

    #[test]
    fn test_cancel_mid_search_keeps_partial_state() {
        let mut board: Board = PUZZLE.parse().unwrap();
        let token = CancelToken::new();
        let mut observer = CancelAfter {
            token: token.clone(),
            remaining: 3,
        };
        let outcome = BacktrackSolver::new().solve(&mut board, &token, &mut observer);
        assert_eq!(outcome, SolveOutcome::Cancelled);
        // Some placements were made before the token fired, and the board
        // was not cleared afterwards.
        let placed = Position::ALL
            .into_iter()
            .filter(|&pos| !board.is_clue(pos) && !board[pos].is_empty())
            .count();
        assert!(placed > 0);
        assert!(!board.is_complete());
    }

    struct StepRecorder {
        steps: usize,
        last: Option<Board>,
    }

    impl SolveObserver for StepRecorder {
        fn on_step(&mut self, board: &Board) {
            self.steps += 1;
            self.last = Some(board.clone());
        }
    }

    #[test]
    fn test_observer_sees_every_step() {
        let mut board: Board = PUZZLE.parse().unwrap();
        let mut observer = StepRecorder {
            steps: 0,
            last: None,
        };
        let outcome =
            BacktrackSolver::new().solve(&mut board, &CancelToken::new(), &mut observer);
        assert_eq!(outcome, SolveOutcome::Solved);
        // At least one step per filled non-clue cell.
        assert!(observer.steps >= 81 - board.clue_count());
        // The last notified state is the finished solution.
        assert_eq!(observer.last.as_ref(), Some(&board));
    }
}
