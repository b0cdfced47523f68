//! Quadratic binary models.
//!
//! A [`QuadraticModel`] is the objective handed to the annealing backend:
//!
//! ```text
//! E(x) = Σ_i h_i x_i + Σ_{i<j} J_ij x_i x_j + c
//! ```
//!
//! over binary variables `x_i`. Models are assembled with a
//! [`QuadraticModelBuilder`] and are immutable once built.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::assignment::Assignment;
use crate::board::VariableIndex;

/// An unordered pair of distinct variables.
///
/// Construction normalizes the order, so `(i, j)` and `(j, i)` are the same key.
///
/// # Examples
///
/// ```
/// use queenbench_core::VariablePair;
///
/// assert_eq!(VariablePair::new(7, 2), VariablePair::new(2, 7));
/// assert_eq!(VariablePair::new(7, 2).low(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariablePair {
    low: VariableIndex,
    high: VariableIndex,
}

impl VariablePair {
    pub fn new(a: VariableIndex, b: VariableIndex) -> Self {
        debug_assert_ne!(a, b, "a quadratic term needs two distinct variables");
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    #[inline]
    pub fn low(&self) -> VariableIndex {
        self.low
    }

    #[inline]
    pub fn high(&self) -> VariableIndex {
        self.high
    }
}

/// Sparse symmetric coefficient table keyed by [`VariablePair`].
///
/// The only mutator is [`add`](Self::add), which sums into any existing
/// coefficient. Contributions from overlapping constraint groups therefore
/// accumulate and can never overwrite each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadraticTerms {
    coefficients: BTreeMap<VariablePair, f64>,
}

impl QuadraticTerms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coefficient` to the pair's accumulated coefficient.
    pub fn add(&mut self, pair: VariablePair, coefficient: f64) {
        *self.coefficients.entry(pair).or_insert(0.0) += coefficient;
    }

    /// Returns the accumulated coefficient, or 0 for an absent pair.
    pub fn get(&self, pair: VariablePair) -> f64 {
        self.coefficients.get(&pair).copied().unwrap_or(0.0)
    }

    /// Returns the number of pairs with a recorded coefficient.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Iterates pairs in ascending `(low, high)` order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.coefficients.iter(),
        }
    }
}

/// Iterator over `(pair, coefficient)` entries of [`QuadraticTerms`].
#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, VariablePair, f64>,
}

impl Iterator for Iter<'_> {
    type Item = (VariablePair, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(pair, coefficient)| (*pair, *coefficient))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a QuadraticTerms {
    type Item = (VariablePair, f64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An immutable quadratic binary objective.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticModel {
    linear: Vec<f64>,
    quadratic: QuadraticTerms,
    offset: f64,
}

impl QuadraticModel {
    /// Returns the number of binary variables.
    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    /// Returns the linear bias of a variable (0 for an unknown index).
    pub fn linear_bias(&self, index: VariableIndex) -> f64 {
        self.linear.get(index).copied().unwrap_or(0.0)
    }

    /// Returns every linear bias in index order.
    pub fn linear_biases(&self) -> &[f64] {
        &self.linear
    }

    /// Returns the coefficient of `x_a x_b` (0 when absent or `a == b`).
    pub fn quadratic_coefficient(&self, a: VariableIndex, b: VariableIndex) -> f64 {
        if a == b {
            return 0.0;
        }
        self.quadratic.get(VariablePair::new(a, b))
    }

    pub fn quadratic_terms(&self) -> &QuadraticTerms {
        &self.quadratic
    }

    /// Returns the constant offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Evaluates the objective for an assignment.
    ///
    /// Only variables whose value is exactly 1 contribute.
    pub fn energy(&self, assignment: &Assignment) -> f64 {
        let linear: f64 = self
            .linear
            .iter()
            .enumerate()
            .filter(|(index, _)| assignment.is_active(*index))
            .map(|(_, bias)| bias)
            .sum();

        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|(pair, _)| assignment.is_active(pair.low()) && assignment.is_active(pair.high()))
            .map(|(_, coefficient)| coefficient)
            .sum();

        linear + quadratic + self.offset
    }
}

/// Accumulating builder for a [`QuadraticModel`].
///
/// Every `add_*` method sums into the existing value.
///
/// # Examples
///
/// ```
/// use queenbench_core::{Assignment, QuadraticModelBuilder};
///
/// let mut builder = QuadraticModelBuilder::new(2);
/// builder.add_linear(0, -1.0);
/// builder.add_quadratic(0, 1, 2.0);
/// builder.add_quadratic(1, 0, 0.5);
/// builder.add_offset(1.0);
/// let model = builder.build();
///
/// assert_eq!(model.quadratic_coefficient(0, 1), 2.5);
/// assert_eq!(model.energy(&Assignment::from_active([0])), 0.0);
/// assert_eq!(model.energy(&Assignment::from_active([0, 1])), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct QuadraticModelBuilder {
    linear: Vec<f64>,
    quadratic: QuadraticTerms,
    offset: f64,
}

impl QuadraticModelBuilder {
    /// Creates an empty builder over `num_variables` variables.
    pub fn new(num_variables: usize) -> Self {
        Self {
            linear: vec![0.0; num_variables],
            quadratic: QuadraticTerms::new(),
            offset: 0.0,
        }
    }

    /// Adds to the linear bias of a variable.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the builder's variable count.
    pub fn add_linear(&mut self, index: VariableIndex, bias: f64) {
        self.linear[index] += bias;
    }

    /// Adds to the coefficient of `x_a x_b`.
    ///
    /// For binary variables `x² = x`, so `a == b` folds into the linear bias.
    ///
    /// # Panics
    ///
    /// Panics if either index is not below the builder's variable count.
    pub fn add_quadratic(&mut self, a: VariableIndex, b: VariableIndex, coefficient: f64) {
        assert!(
            a < self.linear.len() && b < self.linear.len(),
            "variable index out of range"
        );
        if a == b {
            self.add_linear(a, coefficient);
        } else {
            self.quadratic.add(VariablePair::new(a, b), coefficient);
        }
    }

    /// Adds to the constant offset.
    pub fn add_offset(&mut self, value: f64) {
        self.offset += value;
    }

    /// Finishes the model.
    pub fn build(self) -> QuadraticModel {
        QuadraticModel {
            linear: self.linear,
            quadratic: self.quadratic,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_accumulate() {
        let mut terms = QuadraticTerms::new();
        terms.add(VariablePair::new(1, 3), 2.0);
        terms.add(VariablePair::new(3, 1), 1.5);
        terms.add(VariablePair::new(0, 2), 1.0);

        assert_eq!(terms.len(), 2);
        assert_eq!(terms.get(VariablePair::new(1, 3)), 3.5);
        assert_eq!(terms.get(VariablePair::new(0, 1)), 0.0);

        let keys: Vec<(usize, usize)> = terms.iter().map(|(p, _)| (p.low(), p.high())).collect();
        assert_eq!(keys, vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_self_pair_folds_into_linear() {
        let mut builder = QuadraticModelBuilder::new(3);
        builder.add_linear(2, 1.0);
        builder.add_quadratic(2, 2, 4.0);
        let model = builder.build();

        assert_eq!(model.linear_bias(2), 5.0);
        assert!(model.quadratic_terms().is_empty());
        assert_eq!(model.quadratic_coefficient(2, 2), 0.0);
    }

    #[test]
    fn test_energy_ignores_non_unit_values() {
        let mut builder = QuadraticModelBuilder::new(2);
        builder.add_linear(0, 3.0);
        builder.add_linear(1, 5.0);
        let model = builder.build();

        let assignment = Assignment::new().with_value(0, 1).with_value(1, 2);
        assert_eq!(model.energy(&assignment), 3.0);
        assert_eq!(model.energy(&Assignment::new()), 0.0);
    }

    #[test]
    #[should_panic(expected = "variable index out of range")]
    fn test_out_of_range_quadratic_panics() {
        let mut builder = QuadraticModelBuilder::new(2);
        builder.add_quadratic(0, 2, 1.0);
    }
}
