//! Penalty weights for the three constraint families.

use std::fmt;

/// Scalar multipliers for the row, column and diagonal penalty groups.
///
/// Weights are expected to be finite and non-negative; the encoder assumes
/// this precondition and the configuration layer enforces it. Missing
/// entries default to `1.0`.
///
/// # Examples
///
/// ```
/// use queenbench_core::PenaltyWeights;
///
/// let weights = PenaltyWeights::new(2.0, 2.0, 4.0);
/// assert_eq!(weights.scaled(0.5), PenaltyWeights::new(1.0, 1.0, 2.0));
/// assert_eq!(PenaltyWeights::default(), PenaltyWeights::uniform(1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "snake_case")
)]
pub struct PenaltyWeights {
    /// Weight of the exactly-one-per-row groups.
    pub row: f64,

    /// Weight of the exactly-one-per-column groups.
    #[cfg_attr(feature = "serde", serde(alias = "col"))]
    pub column: f64,

    /// Weight of the at-most-one-per-diagonal groups.
    #[cfg_attr(feature = "serde", serde(alias = "diag"))]
    pub diagonal: f64,
}

impl PenaltyWeights {
    pub const fn new(row: f64, column: f64, diagonal: f64) -> Self {
        Self {
            row,
            column,
            diagonal,
        }
    }

    /// Same weight for every group.
    pub const fn uniform(weight: f64) -> Self {
        Self::new(weight, weight, weight)
    }

    /// Multiplies every weight by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.row * factor,
            self.column * factor,
            self.diagonal * factor,
        )
    }

    /// Returns true if every weight is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.row, self.column, self.diagonal]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl fmt::Display for PenaltyWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row={} col={} diag={}",
            self.row, self.column, self.diagonal
        )
    }
}
