//! The 9×9 board of cells.

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use crate::{Cell, Digit, DigitSet, OutOfRangeError, Position};

/// Error returned when an initial clue layout is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LayoutError {
    /// A layout entry is outside the range 0-9.
    #[display("invalid value {value} at row {row}, col {col}")]
    InvalidValue {
        /// Row of the offending entry.
        row: u8,
        /// Column of the offending entry.
        col: u8,
        /// The rejected value.
        value: u8,
    },
    /// Two clues with the same digit share a row, column, or box.
    #[display("duplicate clue {digit} at row {row}, col {col}")]
    DuplicateClue {
        /// Row of the second clue.
        row: u8,
        /// Column of the second clue.
        col: u8,
        /// The duplicated digit.
        digit: Digit,
    },
}

/// Error returned when parsing a board from a grid string fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The string contains a character other than `0`-`9`, `.`, `_`, or
    /// whitespace.
    #[display("invalid character {c:?} in grid string")]
    InvalidCharacter {
        /// The rejected character.
        c: char,
    },
    /// The string does not contain exactly 81 cells.
    #[display("expected 81 cells, found {found}")]
    WrongCellCount {
        /// Number of cells found.
        found: usize,
    },
    /// The parsed layout violates clue uniqueness.
    #[display("{_0}")]
    Layout(#[error(source)] LayoutError),
}

/// The 9×9 grid of [`Cell`]s.
///
/// The board is the single owner of all cell state. It offers unconditional
/// mutation primitives ([`set_value`](Self::set_value),
/// [`set_candidates`](Self::set_candidates)); rule legality is enforced by
/// callers, not here. The only checks the board itself performs are
/// construction-time ones: value ranges and clue uniqueness within each row,
/// column, and box.
///
/// # Examples
///
/// ```
/// use kudoku_core::{Board, Digit, Position};
///
/// let mut layout = [[0_u8; 9]; 9];
/// layout[0][0] = 5;
/// let mut board = Board::from_clues(&layout).unwrap();
///
/// assert!(board.is_clue(Position::new(0, 0)));
/// board.set_value(Position::new(0, 1), Some(Digit::D3));
/// board.reset();
/// assert!(board[Position::new(0, 1)].is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; 81],
}

impl Board {
    /// Creates a board from a 9×9 clue layout.
    ///
    /// Entries of 0 become empty cells; entries 1-9 become clue cells.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidValue`] for entries outside 0-9 and
    /// [`LayoutError::DuplicateClue`] when two clues with the same digit
    /// share a row, column, or box.
    pub fn from_clues(layout: &[[u8; 9]; 9]) -> Result<Self, LayoutError> {
        let mut cells = [const { Cell::empty() }; 81];
        for pos in Position::ALL {
            let value = layout[usize::from(pos.row())][usize::from(pos.col())];
            if value == 0 {
                continue;
            }
            let digit = Digit::try_from_value(value).ok_or(LayoutError::InvalidValue {
                row: pos.row(),
                col: pos.col(),
                value,
            })?;
            cells[usize::from(pos.index())] = Cell::clue(digit);
        }
        let board = Self { cells };
        board.check_clue_uniqueness()?;
        Ok(board)
    }

    fn check_clue_uniqueness(&self) -> Result<(), LayoutError> {
        for pos in Position::ALL {
            let cell = self[pos];
            let Some(digit) = cell.value() else { continue };
            debug_assert!(cell.is_clue());
            let duplicated = pos
                .same_row()
                .chain(pos.same_col())
                .chain(pos.same_box())
                .any(|peer| peer != pos && self[peer].value() == Some(digit));
            if duplicated {
                return Err(LayoutError::DuplicateClue {
                    row: pos.row(),
                    col: pos.col(),
                    digit,
                });
            }
        }
        Ok(())
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `row` or `col` is not in the range 0-8.
    pub fn get(&self, row: u8, col: u8) -> Result<&Cell, OutOfRangeError> {
        let pos = Position::try_new(row, col)?;
        Ok(&self.cells[usize::from(pos.index())])
    }

    /// Returns the value at the given position, or `None` if the cell is
    /// empty.
    #[must_use]
    pub fn value(&self, pos: Position) -> Option<Digit> {
        self[pos].value()
    }

    /// Returns `true` if the cell at the given position is a clue.
    #[must_use]
    pub fn is_clue(&self, pos: Position) -> bool {
        self[pos].is_clue()
    }

    /// Writes a value into a cell unconditionally.
    ///
    /// Constraint legality is the caller's responsibility. Callers must not
    /// route writes to clue cells through here; the engine facade guards its
    /// public mutation path.
    pub fn set_value(&mut self, pos: Position, value: Option<Digit>) {
        debug_assert!(!self[pos].is_clue(), "clue cell written at {pos}");
        self.cells[usize::from(pos.index())].set_value(value);
    }

    /// Replaces the candidate set of a cell.
    pub fn set_candidates(&mut self, pos: Position, candidates: DigitSet) {
        self.cells[usize::from(pos.index())].set_candidates(candidates);
    }

    /// Clears every non-clue cell back to empty.
    ///
    /// Clue cells and their values are untouched. Candidate sets are not
    /// recomputed here; that is the validator's job.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            if !cell.is_clue() {
                cell.set_value(None);
            }
        }
    }

    /// Returns `true` if every cell holds a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Returns the number of clue cells.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_clue()).count()
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        &self.cells[usize::from(pos.index())]
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses a board from an 81-cell grid string.
    ///
    /// Digits 1-9 become clue cells; `.`, `_`, and `0` are empty cells;
    /// whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut layout = [[0_u8; 9]; 9];
        let mut count = 0_usize;
        for c in s.chars() {
            if c.is_whitespace() {
                continue;
            }
            let value = match c {
                '.' | '_' => 0,
                '0'..='9' => c as u8 - b'0',
                _ => return Err(ParseBoardError::InvalidCharacter { c }),
            };
            if count < 81 {
                layout[count / 9][count % 9] = value;
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseBoardError::WrongCellCount { found: count });
        }
        Self::from_clues(&layout).map_err(ParseBoardError::Layout)
    }
}

impl Display for Board {
    /// Renders the board as 81 characters in row-major order, `.` for empty
    /// cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell.value() {
                Some(digit) => write!(f, "{digit}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
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

    #[test]
    fn test_parse_and_display_round_trip() {
        let board: Board = PUZZLE.parse().unwrap();
        assert_eq!(board.clue_count(), 30);
        assert_eq!(board.value(Position::new(0, 0)), Some(Digit::D5));
        assert_eq!(board.value(Position::new(0, 2)), None);

        let rendered = board.to_string();
        let reparsed: Board = rendered.parse().unwrap();
        assert_eq!(board, reparsed);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "x".repeat(81).parse::<Board>(),
            Err(ParseBoardError::InvalidCharacter { c: 'x' })
        );
        assert_eq!(
            ".".repeat(80).parse::<Board>(),
            Err(ParseBoardError::WrongCellCount { found: 80 })
        );
        assert_eq!(
            ".".repeat(82).parse::<Board>(),
            Err(ParseBoardError::WrongCellCount { found: 82 })
        );
    }

    #[test]
    fn test_from_clues_rejects_invalid_value() {
        let mut layout = [[0_u8; 9]; 9];
        layout[3][4] = 12;
        assert_eq!(
            Board::from_clues(&layout),
            Err(LayoutError::InvalidValue {
                row: 3,
                col: 4,
                value: 12
            })
        );
    }

    #[test]
    fn test_from_clues_rejects_duplicate_clues() {
        // Same row.
        let mut layout = [[0_u8; 9]; 9];
        layout[0][0] = 5;
        layout[0][8] = 5;
        assert!(matches!(
            Board::from_clues(&layout),
            Err(LayoutError::DuplicateClue {
                digit: Digit::D5,
                ..
            })
        ));

        // Same box, different row and column.
        let mut layout = [[0_u8; 9]; 9];
        layout[6][6] = 2;
        layout[8][8] = 2;
        assert!(matches!(
            Board::from_clues(&layout),
            Err(LayoutError::DuplicateClue {
                digit: Digit::D2,
                ..
            })
        ));
    }

    #[test]
    fn test_reset_restores_clue_only_state() {
        let original: Board = PUZZLE.parse().unwrap();
        let mut board = original.clone();
        board.set_value(Position::new(0, 2), Some(Digit::D1));
        board.set_value(Position::new(8, 0), Some(Digit::D9));
        assert_ne!(board, original);

        board.reset();
        assert_eq!(board, original);
        for pos in Position::ALL {
            if board.is_clue(pos) {
                assert_eq!(board.value(pos), original.value(pos));
            } else {
                assert!(board[pos].is_empty());
            }
        }
    }

    #[test]
    fn test_get_bounds() {
        let board: Board = PUZZLE.parse().unwrap();
        assert!(board.get(8, 8).is_ok());
        assert_eq!(
            board.get(9, 0).unwrap_err(),
            OutOfRangeError { row: 9, col: 0 }
        );
    }

    #[test]
    fn test_is_complete() {
        let board: Board = PUZZLE.parse().unwrap();
        assert!(!board.is_complete());

        const SOLVED: &str = "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
        let solved: Board = SOLVED.parse().unwrap();
        assert!(solved.is_complete());
    }
}
