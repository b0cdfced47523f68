//! The reported result of one annealing call.

use std::fmt;

use crate::board::Placement;
use crate::validation::ReasonSummary;

/// How a solve invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum OutcomeStatus {
    /// At least one candidate was returned and judged.
    #[default]
    Ok,
    /// The solver answered with an empty candidate list.
    NoCandidates,
    /// The solver failed before answering.
    Error,
}

impl OutcomeStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Ok => "OK",
            OutcomeStatus::NoCandidates => "NO_CANDIDATES",
            OutcomeStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The candidate reported for one solve invocation, with provenance.
///
/// Produced by [`select_candidate`](crate::select_candidate) or by one of
/// the terminal constructors for runs that yielded nothing to judge.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Objective value of the reported candidate; `+∞` when there is none.
    pub objective: f64,
    /// Decoded placement of the reported candidate.
    pub placement: Placement,
    /// Whether the reported placement is a valid N-Queens solution.
    pub valid: bool,
    /// Validator reason for the reported placement.
    pub reason: ReasonSummary,
    /// Number of candidates the solver returned.
    pub candidates_considered: usize,
    /// Whether any returned candidate was valid.
    pub best_valid_found: bool,
    pub status: OutcomeStatus,
    /// Diagnostic message for non-`Ok` statuses.
    pub message: Option<String>,
}

impl Outcome {
    /// Outcome for an empty candidate list.
    ///
    /// # Examples
    ///
    /// ```
    /// use queenbench_core::{Outcome, OutcomeStatus, ReasonSummary};
    ///
    /// let outcome = Outcome::no_candidates();
    /// assert_eq!(outcome.status, OutcomeStatus::NoCandidates);
    /// assert_eq!(outcome.candidates_considered, 0);
    /// assert!(!outcome.valid && !outcome.best_valid_found);
    /// assert_eq!(outcome.reason, ReasonSummary::WrongCount);
    /// ```
    pub fn no_candidates() -> Self {
        Self {
            objective: f64::INFINITY,
            placement: Vec::new(),
            valid: false,
            reason: ReasonSummary::WrongCount,
            candidates_considered: 0,
            best_valid_found: false,
            status: OutcomeStatus::NoCandidates,
            message: Some("No candidates returned".to_string()),
        }
    }

    /// Outcome for a solver that failed before answering.
    pub fn solver_failure(message: impl Into<String>) -> Self {
        Self {
            objective: f64::INFINITY,
            placement: Vec::new(),
            valid: false,
            reason: ReasonSummary::FormatError,
            candidates_considered: 0,
            best_valid_found: false,
            status: OutcomeStatus::Error,
            message: Some(message.into()),
        }
    }

    /// Number of queens in the reported placement.
    pub fn queen_count(&self) -> usize {
        self.placement.len()
    }
}
