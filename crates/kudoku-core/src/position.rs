//! Board positions and house scans.

use std::fmt::{self, Display};

/// Error returned when a row or column index falls outside 0-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell index out of range: row {row}, col {col}")]
pub struct OutOfRangeError {
    /// The offending row index.
    pub row: u8,
    /// The offending column index.
    pub col: u8,
}

/// A cell position on the 9×9 board, addressed as `(row, col)` with both
/// indices in 0-8.
///
/// Positions map to linear indices in row-major order: `index = row * 9 + col`.
///
/// # Examples
///
/// ```
/// use kudoku_core::Position;
///
/// let pos = Position::new(2, 4);
/// assert_eq!(pos.index(), 22);
/// assert_eq!(Position::from_index(22), pos);
/// assert_eq!(pos.box_index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// All 81 positions in row-major order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { row: 0, col: 0 }; 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self {
                row: (i / 9) as u8,
                col: (i % 9) as u8,
            };
            i += 1;
        }
        all
    };

    /// Creates a position.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in the range 0-8.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// Creates a position, rejecting out-of-range indices.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `row` or `col` is not in the range 0-8.
    pub const fn try_new(row: u8, col: u8) -> Result<Self, OutOfRangeError> {
        if row < 9 && col < 9 {
            Ok(Self { row, col })
        } else {
            Err(OutOfRangeError { row, col })
        }
    }

    /// Creates a position from a row-major linear index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        assert!(index < 81);
        Self {
            row: index / 9,
            col: index % 9,
        }
    }

    /// Returns the row index (0-8).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column index (0-8).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row-major linear index (0-80).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.row * 9 + self.col
    }

    /// Returns the index (0-8) of the 3×3 box owning this position, counted
    /// left to right, top to bottom.
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.row / 3) * 3 + self.col / 3
    }

    /// Returns all nine positions of this position's row, self included.
    pub fn same_row(self) -> impl Iterator<Item = Self> {
        (0..9).map(move |col| Self { row: self.row, col })
    }

    /// Returns all nine positions of this position's column, self included.
    pub fn same_col(self) -> impl Iterator<Item = Self> {
        (0..9).map(move |row| Self { row, col: self.col })
    }

    /// Returns all nine positions of this position's 3×3 box, self included.
    ///
    /// The scan covers the full owning box, rows `row / 3 * 3` through
    /// `row / 3 * 3 + 2` and the corresponding columns.
    pub fn same_box(self) -> impl Iterator<Item = Self> {
        let top = self.row / 3 * 3;
        let left = self.col / 3 * 3;
        (top..top + 3).flat_map(move |row| (left..left + 3).map(move |col| Self { row, col }))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for index in 0..81 {
            let pos = Position::from_index(index);
            assert_eq!(pos.index(), index);
            assert_eq!(Position::ALL[usize::from(index)], pos);
        }
    }

    #[test]
    fn test_try_new_bounds() {
        assert_eq!(Position::try_new(0, 0), Ok(Position::new(0, 0)));
        assert_eq!(Position::try_new(8, 8), Ok(Position::new(8, 8)));
        assert_eq!(
            Position::try_new(9, 0),
            Err(OutOfRangeError { row: 9, col: 0 })
        );
        assert_eq!(
            Position::try_new(0, 12),
            Err(OutOfRangeError { row: 0, col: 12 })
        );
    }

    #[test]
    fn test_box_index() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(1, 4).box_index(), 1);
        assert_eq!(Position::new(2, 8).box_index(), 2);
        assert_eq!(Position::new(4, 4).box_index(), 4);
        assert_eq!(Position::new(8, 8).box_index(), 8);
    }

    #[test]
    fn test_house_scans_cover_houses() {
        let pos = Position::new(4, 7);

        let row: Vec<_> = pos.same_row().collect();
        assert_eq!(row.len(), 9);
        assert!(row.iter().all(|p| p.row() == 4));
        assert!(row.contains(&pos));

        let col: Vec<_> = pos.same_col().collect();
        assert_eq!(col.len(), 9);
        assert!(col.iter().all(|p| p.col() == 7));

        let boxed: Vec<_> = pos.same_box().collect();
        assert_eq!(boxed.len(), 9);
        assert!(boxed.iter().all(|p| p.box_index() == pos.box_index()));
        assert!(boxed.contains(&pos));
    }

    proptest::proptest! {
        #[test]
        fn prop_house_membership_is_symmetric(a in 0_u8..81, b in 0_u8..81) {
            let a = Position::from_index(a);
            let b = Position::from_index(b);
            proptest::prop_assert_eq!(
                a.same_row().any(|p| p == b),
                b.same_row().any(|p| p == a)
            );
            proptest::prop_assert_eq!(
                a.same_box().any(|p| p == b),
                b.same_box().any(|p| p == a)
            );
            proptest::prop_assert_eq!(
                a.same_box().any(|p| p == b),
                a.box_index() == b.box_index()
            );
        }
    }

    #[test]
    fn test_box_scan_outside_first_box() {
        // The full owning box must be scanned even far from the origin.
        let positions: Vec<_> = Position::new(8, 8).same_box().collect();
        assert_eq!(positions.len(), 9);
        assert!(positions.iter().all(|p| p.row() >= 6 && p.col() >= 6));
    }
}
