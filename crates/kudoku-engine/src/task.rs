//! Background solve worker.
//!
//! Solves run on a spawned worker thread over a cloned board; progress and
//! completion are reported through an mpsc channel and consumed by polling
//! [`Engine::poll_solve`](crate::Engine::poll_solve). The engine's own board
//! is only ever updated on the polling thread, so the presentation adapter
//! keeps seeing a single consistent snapshot source.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
    },
    thread,
};

use kudoku_core::Board;
use kudoku_solver::{BacktrackSolver, CancelToken, SolveObserver, SolveOutcome};

/// A progress event drained from a background solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveEvent {
    /// One search step completed; the engine board now holds the stepped
    /// state (animated solves only).
    Step,
    /// The solve finished; the engine board holds the final state.
    Finished(SolveOutcome),
}

pub(crate) enum WorkerEvent {
    Step(Board),
    Finished(SolveOutcome, Board),
}

/// Handle to a background solve started with
/// [`Engine::spawn_solve`](crate::Engine::spawn_solve).
///
/// Drain events by passing the handle to
/// [`Engine::poll_solve`](crate::Engine::poll_solve); request early
/// termination with [`cancel`](Self::cancel). The handle doubles as the
/// identity of its flight: the engine releases its one-solve-at-a-time guard
/// only when this handle's finish event is drained. Dropping the handle
/// undrained cancels the worker and abandons the flight; its results are
/// discarded.
#[derive(Debug)]
pub struct SolveHandle {
    pub(crate) events: Receiver<WorkerEvent>,
    pub(crate) detached: Arc<AtomicBool>,
    token: CancelToken,
}

impl SolveHandle {
    /// Requests cancellation of the running solve.
    ///
    /// The solver observes the signal at its next recursion step and finishes
    /// with [`SolveOutcome::Cancelled`], leaving the board in its partial
    /// state.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for SolveHandle {
    fn drop(&mut self) {
        // Without the receiver no event can reach the engine board, so the
        // worker only burns time. Stop it and mark the flight abandoned.
        self.token.cancel();
        self.detached.store(true, Ordering::Release);
    }
}

struct ChannelObserver {
    tx: Sender<WorkerEvent>,
    animate: bool,
}

impl SolveObserver for ChannelObserver {
    fn on_step(&mut self, board: &Board) {
        if self.animate {
            // A send failure means the handle was dropped; the cancellation
            // it triggered ends the search shortly.
            let _ = self.tx.send(WorkerEvent::Step(board.clone()));
        }
    }
}

pub(crate) fn spawn(solver: BacktrackSolver, board: Board, animate: bool) -> SolveHandle {
    let token = CancelToken::new();
    let worker_token = token.clone();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut board = board;
        let mut observer = ChannelObserver {
            tx: tx.clone(),
            animate,
        };
        let outcome = solver.solve(&mut board, &worker_token, &mut observer);
        let _ = tx.send(WorkerEvent::Finished(outcome, board));
    });

    SolveHandle {
        events: rx,
        detached: Arc::new(AtomicBool::new(false)),
        token,
    }
}
