//! Placement validation and the conflict taxonomy.
//!
//! A verdict lists every failing check, in a fixed order, and additionally
//! condenses them into one [`ReasonSummary`] chosen by precedence:
//!
//! ```text
//! wrong_count > format_error > row_conflict > col_conflict > diag_conflict > ok
//! ```
//!
//! The summary lets aggregations bucket each run under a single dominant
//! cause even when several checks fail together.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::board::BoardCoordinate;
use crate::error::{QueensError, Result};

/// Single dominant failure cause of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ReasonSummary {
    /// Placement has exactly `n` queens without conflicts.
    Ok,
    /// Number of queens differs from `n`.
    WrongCount,
    /// A coordinate lies outside the board.
    FormatError,
    /// Two queens share a row.
    RowConflict,
    /// Two queens share a column.
    ColConflict,
    /// Two queens share a diagonal.
    DiagConflict,
}

impl ReasonSummary {
    /// Returns the stable code used in result records.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReasonSummary::Ok => "ok",
            ReasonSummary::WrongCount => "wrong_count",
            ReasonSummary::FormatError => "format_error",
            ReasonSummary::RowConflict => "row_conflict",
            ReasonSummary::ColConflict => "col_conflict",
            ReasonSummary::DiagConflict => "diag_conflict",
        }
    }

    pub const fn is_ok(&self) -> bool {
        matches!(self, ReasonSummary::Ok)
    }
}

impl fmt::Display for ReasonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasonSummary {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ok" => Ok(ReasonSummary::Ok),
            "wrong_count" => Ok(ReasonSummary::WrongCount),
            "format_error" => Ok(ReasonSummary::FormatError),
            "row_conflict" => Ok(ReasonSummary::RowConflict),
            "col_conflict" => Ok(ReasonSummary::ColConflict),
            "diag_conflict" => Ok(ReasonSummary::DiagConflict),
            other => Err(format!("unknown reason summary: {other}")),
        }
    }
}

/// One failed placement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    WrongCount { expected: usize, found: usize },
    OutOfBounds,
    RowConflict,
    ColumnConflict,
    /// Shared `row + column`.
    MajorDiagonalConflict,
    /// Shared `row - column`.
    MinorDiagonalConflict,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::WrongCount { expected, found } => {
                write!(f, "Expected {expected} queens, found {found}")
            }
            Violation::OutOfBounds => f.write_str("Coordinates out of bounds"),
            Violation::RowConflict => f.write_str("Row conflict detected"),
            Violation::ColumnConflict => f.write_str("Column conflict detected"),
            Violation::MajorDiagonalConflict => f.write_str("Major diagonal conflict detected"),
            Violation::MinorDiagonalConflict => f.write_str("Minor diagonal conflict detected"),
        }
    }
}

/// Queen counts per row, column and diagonal value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyCounts {
    pub rows: BTreeMap<i64, usize>,
    pub columns: BTreeMap<i64, usize>,
    /// Keyed by `row + column`.
    pub major_diagonals: BTreeMap<i128, usize>,
    /// Keyed by `row - column`.
    pub minor_diagonals: BTreeMap<i128, usize>,
}

impl OccupancyCounts {
    fn from_placement(placement: &[BoardCoordinate]) -> Self {
        let mut counts = Self::default();
        for cell in placement {
            *counts.rows.entry(cell.row()).or_default() += 1;
            *counts.columns.entry(cell.column()).or_default() += 1;
            *counts.major_diagonals.entry(cell.major_diagonal()).or_default() += 1;
            *counts.minor_diagonals.entry(cell.minor_diagonal()).or_default() += 1;
        }
        counts
    }
}

fn has_duplicates<K>(counts: &BTreeMap<K, usize>) -> bool {
    counts.values().any(|&count| count > 1)
}

/// Result of validating one placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    valid: bool,
    violations: Vec<Violation>,
    reason: ReasonSummary,
    counts: OccupancyCounts,
}

impl ValidationVerdict {
    /// Returns true if no check failed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Every failed check, in check order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Human-readable form of [`violations`](Self::violations).
    pub fn violation_messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    pub fn reason(&self) -> ReasonSummary {
        self.reason
    }

    pub fn counts(&self) -> &OccupancyCounts {
        &self.counts
    }
}

/// Validates a placement on an `n × n` board.
///
/// All checks run independently and every failure is reported: queen count,
/// bounds, then duplicated rows, columns, major and minor diagonals.
///
/// # Errors
///
/// Returns [`QueensError::InvalidBoardSize`] if `n` is zero.
///
/// # Examples
///
/// ```
/// use queenbench_core::{validate, BoardCoordinate, ReasonSummary};
///
/// let placement: Vec<BoardCoordinate> = [(1, 1), (1, 2), (2, 2), (3, 3)]
///     .into_iter()
///     .map(BoardCoordinate::from)
///     .collect();
///
/// let verdict = validate(&placement, 4).unwrap();
/// assert!(!verdict.is_valid());
/// assert_eq!(verdict.reason(), ReasonSummary::RowConflict);
/// assert_eq!(verdict.violations().len(), 3);
/// ```
pub fn validate(placement: &[BoardCoordinate], n: usize) -> Result<ValidationVerdict> {
    if n == 0 {
        return Err(QueensError::InvalidBoardSize(n));
    }

    let counts = OccupancyCounts::from_placement(placement);

    let wrong_count = placement.len() != n;
    let out_of_bounds = placement.iter().any(|cell| !cell.is_within(n));
    let row_conflict = has_duplicates(&counts.rows);
    let column_conflict = has_duplicates(&counts.columns);
    let major_conflict = has_duplicates(&counts.major_diagonals);
    let minor_conflict = has_duplicates(&counts.minor_diagonals);

    let mut violations = Vec::new();
    if wrong_count {
        violations.push(Violation::WrongCount {
            expected: n,
            found: placement.len(),
        });
    }
    if out_of_bounds {
        violations.push(Violation::OutOfBounds);
    }
    if row_conflict {
        violations.push(Violation::RowConflict);
    }
    if column_conflict {
        violations.push(Violation::ColumnConflict);
    }
    if major_conflict {
        violations.push(Violation::MajorDiagonalConflict);
    }
    if minor_conflict {
        violations.push(Violation::MinorDiagonalConflict);
    }

    let reason = if wrong_count {
        ReasonSummary::WrongCount
    } else if out_of_bounds {
        ReasonSummary::FormatError
    } else if row_conflict {
        ReasonSummary::RowConflict
    } else if column_conflict {
        ReasonSummary::ColConflict
    } else if major_conflict || minor_conflict {
        ReasonSummary::DiagConflict
    } else {
        ReasonSummary::Ok
    };

    Ok(ValidationVerdict {
        valid: violations.is_empty(),
        violations,
        reason,
        counts,
    })
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
