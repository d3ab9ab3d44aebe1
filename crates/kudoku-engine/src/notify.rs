//! Outbound notifications toward the presentation adapter.

use kudoku_core::Board;

/// Color classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellCategory {
    /// Part of the original puzzle.
    Clue,
    /// Player-editable cell with no detected problem.
    Normal,
    /// Player-entered value that violates row, column, or box uniqueness
    /// (reported only while invalid-field highlighting is enabled).
    Invalid,
}

/// Receives state-change notifications from the engine.
///
/// All methods have empty default bodies so adapters implement only what
/// they render. The engine never hands out mutable board access; observers
/// see read-only snapshots.
pub trait EngineObserver {
    /// The whole board changed (reset, solve completion, display-flag
    /// change).
    fn board_updated(&mut self, board: &Board, show_possible_numbers: bool) {
        let _ = (board, show_possible_numbers);
    }

    /// A single cell changed. `value` is 0 for an empty cell; `candidates`
    /// holds flags for digits 1-9 in order.
    fn cell_updated(
        &mut self,
        row: u8,
        col: u8,
        value: u8,
        candidates: [bool; 9],
        show_possible_numbers: bool,
    ) {
        let _ = (row, col, value, candidates, show_possible_numbers);
    }

    /// A cell's color classification was recomputed.
    fn cell_classified(&mut self, row: u8, col: u8, category: CellCategory) {
        let _ = (row, col, category);
    }
}
