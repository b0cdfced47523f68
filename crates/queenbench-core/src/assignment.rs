//! Solver assignments over model variables.

use std::collections::HashMap;

use crate::board::VariableIndex;

/// Values sampled by a solver for the model variables.
///
/// A variable is active (a queen is present) only when its value is
/// exactly `1`. Any other value, and any missing index, reads as inactive.
///
/// # Examples
///
/// ```
/// use queenbench_core::Assignment;
///
/// let assignment: Assignment = [(0, 1), (1, 0), (2, 7)].into_iter().collect();
/// assert!(assignment.is_active(0));
/// assert!(!assignment.is_active(1));
/// assert!(!assignment.is_active(2));
/// assert!(!assignment.is_active(99));
/// assert_eq!(assignment.active_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<VariableIndex, i64>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an assignment with the given indices set to 1.
    pub fn from_active(indices: impl IntoIterator<Item = VariableIndex>) -> Self {
        indices.into_iter().map(|index| (index, 1)).collect()
    }

    /// Creates an assignment from a dense sample vector indexed by variable.
    pub fn from_values(values: &[i64]) -> Self {
        values.iter().copied().enumerate().collect()
    }

    /// Sets the value of a variable, replacing any previous value.
    pub fn with_value(mut self, index: VariableIndex, value: i64) -> Self {
        self.values.insert(index, value);
        self
    }

    /// Returns the raw value for a variable, if present.
    pub fn value(&self, index: VariableIndex) -> Option<i64> {
        self.values.get(&index).copied()
    }

    /// Returns true if the variable's value is exactly 1.
    #[inline]
    pub fn is_active(&self, index: VariableIndex) -> bool {
        self.values.get(&index) == Some(&1)
    }

    /// Returns the number of active variables.
    pub fn active_count(&self) -> usize {
        self.values.values().filter(|&&v| v == 1).count()
    }

    /// Returns the number of variables with a recorded value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(VariableIndex, i64)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (VariableIndex, i64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(VariableIndex, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (VariableIndex, bool)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(index, on)| (index, i64::from(on)))
            .collect()
    }
}
