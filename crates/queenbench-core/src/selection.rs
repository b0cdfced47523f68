//! Choosing the candidate to report from one annealing response.

use crate::board::Placement;
use crate::error::{QueensError, Result};
use crate::outcome::{Outcome, OutcomeStatus};
use crate::validation::{validate, ReasonSummary};

/// A decoded candidate with the objective value the solver assigned it.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub objective: f64,
    pub placement: Placement,
}

impl Candidate {
    pub fn new(objective: f64, placement: Placement) -> Self {
        Self {
            objective,
            placement,
        }
    }
}

struct Best {
    objective: f64,
    placement: Placement,
    reason: ReasonSummary,
}

impl Best {
    // Strictly lower wins; the first of equal objectives is kept.
    fn is_beaten_by(current: &Option<Best>, objective: f64) -> bool {
        match current {
            None => true,
            Some(best) => rank(objective) < rank(best.objective),
        }
    }
}

// NaN objectives rank after every number.
fn rank(objective: f64) -> f64 {
    if objective.is_nan() {
        f64::INFINITY
    } else {
        objective
    }
}

/// Picks the candidate to report for a board of size `n`.
///
/// Every candidate is validated. The lowest-objective valid candidate wins;
/// when none is valid, the lowest-objective candidate overall is reported
/// with its own validator reason. An empty list yields
/// [`Outcome::no_candidates`].
///
/// # Errors
///
/// Returns [`QueensError::InvalidBoardSize`](crate::QueensError) if `n` is zero.
///
/// # Examples
///
/// ```
/// use queenbench_core::{select_candidate, BoardCoordinate, Candidate, ReasonSummary};
///
/// let valid: Vec<BoardCoordinate> = [(2, 1), (4, 2), (1, 3), (3, 4)]
///     .into_iter()
///     .map(BoardCoordinate::from)
///     .collect();
/// let crowded = vec![BoardCoordinate::new(1, 1), BoardCoordinate::new(1, 2)];
///
/// let outcome = select_candidate(
///     4,
///     vec![Candidate::new(-3.0, crowded), Candidate::new(0.0, valid.clone())],
/// )
/// .unwrap();
///
/// assert!(outcome.valid && outcome.best_valid_found);
/// assert_eq!(outcome.placement, valid);
/// assert_eq!(outcome.reason, ReasonSummary::Ok);
/// assert_eq!(outcome.candidates_considered, 2);
/// ```
pub fn select_candidate(
    n: usize,
    candidates: impl IntoIterator<Item = Candidate>,
) -> Result<Outcome> {
    if n == 0 {
        return Err(QueensError::InvalidBoardSize(n));
    }

    let mut considered = 0;
    let mut best_overall: Option<Best> = None;
    let mut best_valid: Option<Best> = None;

    for candidate in candidates {
        considered += 1;
        let verdict = validate(&candidate.placement, n)?;

        let improves_valid =
            verdict.is_valid() && Best::is_beaten_by(&best_valid, candidate.objective);
        let improves_overall = Best::is_beaten_by(&best_overall, candidate.objective);

        if improves_valid {
            best_valid = Some(Best {
                objective: candidate.objective,
                placement: candidate.placement.clone(),
                reason: verdict.reason(),
            });
        }
        if improves_overall {
            best_overall = Some(Best {
                objective: candidate.objective,
                placement: candidate.placement,
                reason: verdict.reason(),
            });
        }
    }

    let Some(best_overall) = best_overall else {
        return Ok(Outcome::no_candidates());
    };

    let (best, best_valid_found) = match best_valid {
        Some(valid) => (valid, true),
        None => (best_overall, false),
    };

    Ok(Outcome {
        objective: best.objective,
        valid: best_valid_found,
        reason: best.reason,
        placement: best.placement,
        candidates_considered: considered,
        best_valid_found,
        status: OutcomeStatus::Ok,
        message: None,
    })
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
