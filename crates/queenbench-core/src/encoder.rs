//! Penalty encoding of the N-Queens rules.
//!
//! Rows and columns carry an equality-to-one penalty `w (Σx - 1)²`. Each
//! diagonal carries a pairwise at-most-one penalty `w Σ_{i<j} x_i x_j`; the
//! row and column equalities already force exactly `n` queens, so diagonals
//! never need an equality of their own.

use crate::board::{CoordinateMapping, VariableIndex};
use crate::error::Result;
use crate::model::{QuadraticModel, QuadraticModelBuilder};
use crate::penalty::PenaltyWeights;

/// A built model together with the mapping used to build it.
///
/// Decoding must use this exact mapping so that variable indices line up
/// with the cells they were created for.
#[derive(Debug, Clone)]
pub struct EncodedModel {
    model: QuadraticModel,
    mapping: CoordinateMapping,
    variables: Vec<VariableIndex>,
}

impl EncodedModel {
    pub fn model(&self) -> &QuadraticModel {
        &self.model
    }

    pub fn mapping(&self) -> &CoordinateMapping {
        &self.mapping
    }

    /// Variables in index order.
    pub fn variables(&self) -> &[VariableIndex] {
        &self.variables
    }

    pub fn board_size(&self) -> usize {
        self.mapping.board_size()
    }

    pub fn into_parts(self) -> (QuadraticModel, CoordinateMapping, Vec<VariableIndex>) {
        (self.model, self.mapping, self.variables)
    }
}

/// Builds the penalty model for an `n × n` board.
///
/// # Errors
///
/// Returns [`QueensError::InvalidBoardSize`](crate::QueensError) if `n` is zero.
///
/// # Examples
///
/// ```
/// use queenbench_core::{build_model, PenaltyWeights};
///
/// let encoded = build_model(4, &PenaltyWeights::new(2.0, 3.0, 5.0)).unwrap();
/// let model = encoded.model();
///
/// // Every cell sits in one row and one column group.
/// assert_eq!(model.linear_bias(0), -5.0);
/// // (1,1) and (1,2): same row only.
/// assert_eq!(model.quadratic_coefficient(0, 1), 4.0);
/// // (1,1) and (2,2): same minor diagonal only.
/// assert_eq!(model.quadratic_coefficient(0, 5), 5.0);
/// // One unit of offset per row and per column group.
/// assert_eq!(model.offset(), 4.0 * 2.0 + 4.0 * 3.0);
/// ```
pub fn build_model(n: usize, weights: &PenaltyWeights) -> Result<EncodedModel> {
    let mapping = CoordinateMapping::generate(n)?;
    let variables: Vec<VariableIndex> = (0..mapping.len()).collect();
    let mut builder = QuadraticModelBuilder::new(mapping.len());

    for row in mapping.row_groups() {
        add_equality_penalty(&mut builder, &row, weights.row, 1.0);
    }

    for column in mapping.column_groups() {
        add_equality_penalty(&mut builder, &column, weights.column, 1.0);
    }

    for diagonal in mapping.diagonal_groups() {
        add_at_most_one_penalty(&mut builder, &diagonal, weights.diagonal);
    }

    Ok(EncodedModel {
        model: builder.build(),
        mapping,
        variables,
    })
}

/// Adds `weight * (Σ x_i - target)²` over `indices`.
///
/// Expanded for binary variables: `weight * (1 - 2 target)` on each
/// variable, `2 weight` on each unordered pair, `weight * target²` on the
/// offset. An empty group adds nothing.
pub fn add_equality_penalty(
    builder: &mut QuadraticModelBuilder,
    indices: &[VariableIndex],
    weight: f64,
    target: f64,
) {
    if indices.is_empty() {
        return;
    }

    for &index in indices {
        builder.add_linear(index, weight * (1.0 - 2.0 * target));
    }
    for (position, &a) in indices.iter().enumerate() {
        for &b in &indices[position + 1..] {
            builder.add_quadratic(a, b, 2.0 * weight);
        }
    }
    builder.add_offset(weight * target * target);
}

/// Adds `weight` on every unordered pair of `indices`.
///
/// Penalizes two simultaneously active variables without forbidding an
/// empty group.
pub fn add_at_most_one_penalty(
    builder: &mut QuadraticModelBuilder,
    indices: &[VariableIndex],
    weight: f64,
) {
    for (position, &a) in indices.iter().enumerate() {
        for &b in &indices[position + 1..] {
            builder.add_quadratic(a, b, weight);
        }
    }
}

#[cfg(test)]
#[path = "encoder_tests.rs"]
mod tests;
