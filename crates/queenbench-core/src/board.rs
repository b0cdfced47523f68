//! Board coordinates and the index ↔ cell bijection.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{QueensError, Result};

/// Linear index of a binary variable, in `0..n*n`.
pub type VariableIndex = usize;

/// Occupied cells of a board, as decoded from a solver assignment.
pub type Placement = Vec<BoardCoordinate>;

/// A 1-indexed `(row, column)` board cell.
///
/// Components are signed so that coordinates read from external solver
/// output can still be represented when they fall outside the board; the
/// validator reports those as format errors.
///
/// # Examples
///
/// ```
/// use queenbench_core::BoardCoordinate;
///
/// let cell = BoardCoordinate::new(2, 3);
/// assert_eq!(cell.major_diagonal(), 5);
/// assert_eq!(cell.minor_diagonal(), -1);
/// assert!(cell.is_within(3));
/// assert!(!cell.is_within(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardCoordinate {
    row: i64,
    column: i64,
}

impl BoardCoordinate {
    #[inline]
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }

    #[inline]
    pub const fn row(&self) -> i64 {
        self.row
    }

    #[inline]
    pub const fn column(&self) -> i64 {
        self.column
    }

    /// Cells sharing `row + column` lie on the same major diagonal.
    ///
    /// Widened to `i128` so that any pair of `i64` components has a key.
    #[inline]
    pub const fn major_diagonal(&self) -> i128 {
        self.row as i128 + self.column as i128
    }

    /// Cells sharing `row - column` lie on the same minor diagonal.
    #[inline]
    pub const fn minor_diagonal(&self) -> i128 {
        self.row as i128 - self.column as i128
    }

    /// Returns true if both components are in `[1, n]`.
    pub fn is_within(&self, n: usize) -> bool {
        let n = n as i64;
        (1..=n).contains(&self.row) && (1..=n).contains(&self.column)
    }
}

impl From<(i64, i64)> for BoardCoordinate {
    fn from((row, column): (i64, i64)) -> Self {
        Self::new(row, column)
    }
}

impl fmt::Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Row-major bijection between variable indices and board cells.
///
/// Index `i` maps to row `i / n + 1` and column `i % n + 1`. The same
/// mapping instance must be used to build a model and to decode the
/// assignments sampled from it.
///
/// # Examples
///
/// ```
/// use queenbench_core::{generate_mapping, BoardCoordinate};
///
/// let mapping = generate_mapping(3).unwrap();
/// assert_eq!(mapping.len(), 9);
/// assert_eq!(mapping.coordinate(5), Some(BoardCoordinate::new(2, 3)));
/// assert_eq!(mapping.index_of(BoardCoordinate::new(3, 1)), Some(6));
/// assert_eq!(mapping.index_of(BoardCoordinate::new(4, 1)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateMapping {
    board_size: usize,
    coordinates: Vec<BoardCoordinate>,
    indices: HashMap<BoardCoordinate, VariableIndex>,
}

impl CoordinateMapping {
    /// Generates the mapping for an `n × n` board.
    ///
    /// # Errors
    ///
    /// Returns [`QueensError::InvalidBoardSize`] if `n` is zero.
    pub fn generate(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(QueensError::InvalidBoardSize(n));
        }

        let mut coordinates = Vec::with_capacity(n * n);
        let mut indices = HashMap::with_capacity(n * n);
        for row in 0..n {
            for column in 0..n {
                let index = row * n + column;
                let cell = BoardCoordinate::new(row as i64 + 1, column as i64 + 1);
                coordinates.push(cell);
                indices.insert(cell, index);
            }
        }

        Ok(Self {
            board_size: n,
            coordinates,
            indices,
        })
    }

    /// Returns the board size `n`.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Returns the number of variables, `n * n`.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Returns the cell for a variable index.
    pub fn coordinate(&self, index: VariableIndex) -> Option<BoardCoordinate> {
        self.coordinates.get(index).copied()
    }

    /// Returns the variable index for a cell, if it lies on the board.
    pub fn index_of(&self, cell: BoardCoordinate) -> Option<VariableIndex> {
        self.indices.get(&cell).copied()
    }

    /// Returns all cells in index order.
    pub fn coordinates(&self) -> &[BoardCoordinate] {
        &self.coordinates
    }

    /// Iterates `(index, cell)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableIndex, BoardCoordinate)> + '_ {
        self.coordinates.iter().copied().enumerate()
    }

    /// Variable indices of each row, top to bottom.
    pub fn row_groups(&self) -> Vec<Vec<VariableIndex>> {
        let n = self.board_size;
        (0..n)
            .map(|row| (0..n).map(|column| row * n + column).collect())
            .collect()
    }

    /// Variable indices of each column, left to right.
    pub fn column_groups(&self) -> Vec<Vec<VariableIndex>> {
        let n = self.board_size;
        (0..n)
            .map(|column| (0..n).map(|row| row * n + column).collect())
            .collect()
    }

    /// Variable indices of every diagonal.
    ///
    /// Minor diagonals (shared `row - column`) come first, then major
    /// diagonals (shared `row + column`), each ordered by key. Single-cell
    /// corner diagonals are included.
    pub fn diagonal_groups(&self) -> Vec<Vec<VariableIndex>> {
        let mut minor: BTreeMap<i128, Vec<VariableIndex>> = BTreeMap::new();
        let mut major: BTreeMap<i128, Vec<VariableIndex>> = BTreeMap::new();
        for (index, cell) in self.iter() {
            minor.entry(cell.minor_diagonal()).or_default().push(index);
            major.entry(cell.major_diagonal()).or_default().push(index);
        }
        minor.into_values().chain(major.into_values()).collect()
    }
}

/// Generates the row-major mapping for an `n × n` board.
///
/// Shorthand for [`CoordinateMapping::generate`].
pub fn generate_mapping(n: usize) -> Result<CoordinateMapping> {
    CoordinateMapping::generate(n)
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
