//! Stateless constraint rules over a board.
//!
//! All functions here treat the board as data; none of them hold state. The
//! placement check scans the full row, the full column, and all nine cells of
//! the owning 3×3 box, excluding only the target cell itself.

use kudoku_core::{Board, Digit, DigitSet, Position};

/// Error returned when a solution check is requested while cells are still
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("board is not completely filled")]
pub struct IncompleteError;

/// Returns `true` if `digit` may legally be placed at `pos`.
///
/// A placement is rejected when the target cell is a clue, or when the digit
/// already appears at any other cell of the same row, the same column, or the
/// same 3×3 box. The cell's own current value never blocks itself.
#[must_use]
pub fn can_place(board: &Board, pos: Position, digit: Digit) -> bool {
    if board.is_clue(pos) {
        return false;
    }
    let occupied = |peer: Position| peer != pos && board.value(peer) == Some(digit);
    !pos.same_row().any(occupied) && !pos.same_col().any(occupied) && !pos.same_box().any(occupied)
}

/// Recomputes the candidate set of every cell on the board.
///
/// Clue cells get the empty set. Each non-clue cell gets exactly the digits
/// that [`can_place`] accepts for it under the current board state.
pub fn compute_candidates(board: &mut Board) {
    for pos in Position::ALL {
        let candidates = if board.is_clue(pos) {
            DigitSet::EMPTY
        } else {
            Digit::ALL
                .into_iter()
                .filter(|&digit| can_place(board, pos, digit))
                .collect()
        };
        board.set_candidates(pos, candidates);
    }
}

/// Judges whether the value already placed at `pos` is legal.
///
/// Clue cells and empty cells judge as valid: clues are correct by
/// construction, and an empty cell has no placement to fault.
#[must_use]
pub fn placement_valid(board: &Board, pos: Position) -> bool {
    if board.is_clue(pos) {
        return true;
    }
    match board.value(pos) {
        Some(digit) => can_place(board, pos, digit),
        None => true,
    }
}

/// Checks whether the board holds a complete, valid solution.
///
/// Clue cells are not re-checked; every non-clue cell must pass
/// [`placement_valid`].
///
/// # Errors
///
/// Returns [`IncompleteError`] if any cell is still empty.
pub fn check_solution(board: &Board) -> Result<bool, IncompleteError> {
    if !board.is_complete() {
        return Err(IncompleteError);
    }
    Ok(Position::ALL
        .into_iter()
        .filter(|&pos| !board.is_clue(pos))
        .all(|pos| placement_valid(board, pos)))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

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

    fn puzzle() -> Board {
        PUZZLE.parse().unwrap()
    }

    #[test]
    fn test_can_place_rejects_clue_target() {
        let board = puzzle();
        for digit in Digit::ALL {
            assert!(!can_place(&board, Position::new(0, 0), digit));
        }
    }

    #[test]
    fn test_can_place_row_col_box() {
        let board = puzzle();
        let pos = Position::new(0, 2);

        // 5 occupies (0, 0) in the same row.
        assert!(!can_place(&board, pos, Digit::D5));
        // 8 occupies (2, 2) in the same column, 9 occupies (2, 1) in the box.
        assert!(!can_place(&board, pos, Digit::D8));
        assert!(!can_place(&board, pos, Digit::D9));
        // 1 appears nowhere in row 0, column 2, or the top-left box.
        assert!(can_place(&board, pos, Digit::D1));
    }

    #[test]
    fn test_box_check_covers_whole_box() {
        // Clue row [5,3,0,0,7,0,0,0,0] with a 4 elsewhere in the top-left
        // box. A scan limited to the box origin row would miss it.
        let mut layout = [[0_u8; 9]; 9];
        layout[0] = [5, 3, 0, 0, 7, 0, 0, 0, 0];
        layout[1][1] = 4;
        let board = Board::from_clues(&layout).unwrap();
        let pos = Position::new(0, 2);

        assert!(!can_place(&board, pos, Digit::D4));
        assert!(can_place(&board, pos, Digit::D6));
    }

    #[test]
    fn test_box_check_far_from_origin() {
        // Duplicate detection must also work in the bottom-right box.
        let mut layout = [[0_u8; 9]; 9];
        layout[6][6] = 9;
        let board = Board::from_clues(&layout).unwrap();
        assert!(!can_place(&board, Position::new(8, 8), Digit::D9));
        assert!(can_place(&board, Position::new(8, 8), Digit::D1));
    }

    #[test]
    fn test_own_value_does_not_block_itself() {
        let mut board = puzzle();
        let pos = Position::new(0, 2);
        board.set_value(pos, Some(Digit::D1));
        assert!(can_place(&board, pos, Digit::D1));
    }

    #[test]
    fn test_compute_candidates_clue_cells_empty() {
        let mut board = puzzle();
        compute_candidates(&mut board);
        for pos in Position::ALL {
            if board.is_clue(pos) {
                assert!(board[pos].candidates().is_empty());
            }
        }
    }

    #[test]
    fn test_placement_valid() {
        let mut board = puzzle();

        // Clue and empty cells judge as valid.
        assert!(placement_valid(&board, Position::new(0, 0)));
        assert!(placement_valid(&board, Position::new(0, 2)));

        // A legal placement stays valid; a duplicate does not.
        let pos = Position::new(0, 2);
        board.set_value(pos, Some(Digit::D1));
        assert!(placement_valid(&board, pos));
        board.set_value(pos, Some(Digit::D5));
        assert!(!placement_valid(&board, pos));
    }

    #[test]
    fn test_check_solution_incomplete() {
        assert_eq!(check_solution(&puzzle()), Err(IncompleteError));
    }

    #[test]
    fn test_check_solution_valid() {
        let board: Board = SOLUTION.parse().unwrap();
        assert_eq!(check_solution(&board), Ok(true));
    }

    #[test]
    fn test_check_solution_detects_duplicates() {
        // Blank two solution cells so they become non-clue, then fill them
        // with a duplicate in the same column.
        let mut grid = String::from(SOLUTION);
        grid.replace_range(2..3, ".");
        grid.replace_range(11..12, ".");
        let mut board: Board = grid.parse().unwrap();
        board.set_value(Position::new(0, 2), Some(Digit::D3));
        board.set_value(Position::new(1, 2), Some(Digit::D3));
        assert_eq!(check_solution(&board), Ok(false));

        // The correct values pass.
        board.set_value(Position::new(0, 2), Some(Digit::D4));
        board.set_value(Position::new(1, 2), Some(Digit::D2));
        assert_eq!(check_solution(&board), Ok(true));
    }

    /// Independent oracle for the candidate invariant: scans the houses by
    /// raw index arithmetic, without going through [`can_place`].
    fn reference_candidates(board: &Board, pos: Position) -> DigitSet {
        let mut candidates = DigitSet::FULL;
        for other in Position::ALL {
            if other == pos {
                continue;
            }
            let same_house = other.row() == pos.row()
                || other.col() == pos.col()
                || (other.row() / 3 == pos.row() / 3 && other.col() / 3 == pos.col() / 3);
            if !same_house {
                continue;
            }
            if let Some(digit) = board.value(other) {
                candidates.remove(digit);
            }
        }
        candidates
    }

    proptest! {
        #[test]
        fn prop_candidates_match_reference(
            writes in proptest::collection::vec((0_u8..81, 0_u8..=9), 0..40),
        ) {
            let mut board = puzzle();
            for (index, value) in writes {
                let pos = Position::from_index(index);
                if !board.is_clue(pos) {
                    board.set_value(pos, Digit::try_from_value(value));
                }
            }
            compute_candidates(&mut board);

            for pos in Position::ALL {
                if board.is_clue(pos) {
                    prop_assert!(board[pos].candidates().is_empty());
                } else {
                    prop_assert_eq!(
                        board[pos].candidates(),
                        reference_candidates(&board, pos),
                        "candidate mismatch at {}",
                        pos
                    );
                }
            }
        }
    }
}
