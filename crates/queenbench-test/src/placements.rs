//! Known placements for validator and selector tests.
//!
//! Coordinates are 1-based `(row, column)` pairs, as the validator expects.

use queenbench_core::{BoardCoordinate, Placement};

/// Builds a placement from `(row, column)` pairs.
pub fn placement(pairs: &[(i64, i64)]) -> Placement {
    pairs.iter().copied().map(BoardCoordinate::from).collect()
}

/// Builds a placement with one queen per column, `rows[c]` being the row of
/// the queen in column `c + 1`.
///
/// # Examples
///
/// ```
/// use queenbench_test::placements::{placement, placement_from_rows};
///
/// assert_eq!(placement_from_rows(&[2, 1]), placement(&[(2, 1), (1, 2)]));
/// ```
pub fn placement_from_rows(rows: &[i64]) -> Placement {
    rows.iter()
        .zip(1..)
        .map(|(&row, column)| BoardCoordinate::new(row, column))
        .collect()
}

/// `[(2,1), (4,2), (1,3), (3,4)]`, a valid 4-queens solution.
pub fn four_queens_solution() -> Placement {
    placement(&[(2, 1), (4, 2), (1, 3), (3, 4)])
}

/// The column-wise mirror of [`four_queens_solution`].
pub fn mirrored_four_queens_solution() -> Placement {
    placement(&[(3, 1), (1, 2), (4, 3), (2, 4)])
}

/// A valid 8-queens solution.
pub fn eight_queens_solution() -> Placement {
    placement_from_rows(&[1, 5, 8, 6, 3, 7, 2, 4])
}

/// `[(1,1), (1,2), (2,2), (3,3)]`: four queens with a shared row, a shared
/// column and a shared diagonal.
pub fn row_conflict_placement() -> Placement {
    placement(&[(1, 1), (1, 2), (2, 2), (3, 3)])
}

/// Four queens on a 4×4 board sharing only a diagonal.
pub fn diagonal_conflict_placement() -> Placement {
    placement(&[(1, 1), (2, 2), (3, 4), (4, 3)])
}
