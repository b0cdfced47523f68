//! Annealing runs over the penalty model.

use std::sync::Arc;
use std::time::{Duration, Instant};

use queenbench_config::ExperimentConfig;
use queenbench_core::{build_model, decode, select_candidate, Candidate, Outcome, PenaltyWeights};

use crate::annealing::{AnnealingBackend, Credentials, SampleRequest};
use crate::error::Result;
use crate::event::{RunContext, RunKind, SolveEventListener, SolveEventSupport};

/// Samples requested per call unless configured otherwise.
pub const DEFAULT_NUM_SAMPLES: usize = 20;

/// A judged annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct QuboRunResult {
    pub board_size: usize,
    pub weights: PenaltyWeights,
    pub timeout: Option<Duration>,
    pub outcome: Outcome,
    /// Wall-clock time of the backend call alone.
    pub runtime: Duration,
}

/// Encodes a board, asks an [`AnnealingBackend`] for samples and reports
/// the selected candidate.
///
/// # Examples
///
/// ```
/// use queenbench_core::{Assignment, OutcomeStatus, PenaltyWeights, QuadraticModel};
/// use queenbench_runner::{AnnealingBackend, BackendError, QuboRunner, RawCandidate, SampleRequest};
///
/// #[derive(Debug)]
/// struct FixedBackend;
/// impl AnnealingBackend for FixedBackend {
///     fn sample(
///         &self,
///         model: &QuadraticModel,
///         _request: &SampleRequest,
///     ) -> Result<Vec<RawCandidate>, BackendError> {
///         let assignment = Assignment::from_active([1, 7, 8, 14]);
///         Ok(vec![RawCandidate::new(model.energy(&assignment), assignment)])
///     }
/// }
///
/// let runner = QuboRunner::new(FixedBackend);
/// let result = runner.solve(4, &PenaltyWeights::default(), None).unwrap();
/// assert_eq!(result.outcome.status, OutcomeStatus::Ok);
/// assert!(result.outcome.valid);
/// assert_eq!(result.outcome.objective, 0.0);
/// ```
#[derive(Debug)]
pub struct QuboRunner<B> {
    backend: B,
    num_samples: usize,
    events: SolveEventSupport,
}

impl<B: AnnealingBackend> QuboRunner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            num_samples: DEFAULT_NUM_SAMPLES,
            events: SolveEventSupport::new(),
        }
    }

    /// Runner requesting the configured number of samples.
    pub fn from_config(backend: B, config: &ExperimentConfig) -> Self {
        Self::new(backend).with_num_samples(config.qubo.num_samples)
    }

    /// Builds the backend from the token in the environment variable named
    /// by `config.qubo.token_env`, then configures the runner as
    /// [`from_config`](Self::from_config) does.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Environment`](crate::RunnerError::Environment)
    /// if the token is missing or blank; `connect` is not called then.
    pub fn connect(
        config: &ExperimentConfig,
        connect: impl FnOnce(Credentials) -> B,
    ) -> Result<Self> {
        let credentials = Credentials::from_config(config)?;
        Ok(Self::from_config(connect(credentials), config))
    }

    pub fn with_num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }

    /// Adds an event listener.
    pub fn with_listener(mut self, listener: Arc<dyn SolveEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn events(&self) -> &SolveEventSupport {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut SolveEventSupport {
        &mut self.events
    }

    /// Runs one annealing call for an `n × n` board.
    ///
    /// A backend error yields status `ERROR` and an empty response yields
    /// `NO_CANDIDATES`; neither is returned as `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Queens`](crate::RunnerError::Queens) if `n` is
    /// zero; the backend is not invoked in that case.
    pub fn solve(
        &self,
        n: usize,
        weights: &PenaltyWeights,
        timeout: Option<Duration>,
    ) -> Result<QuboRunResult> {
        let encoded = build_model(n, weights)?;
        let run = RunContext {
            board_size: n,
            timeout,
            kind: RunKind::Annealing { weights: *weights },
        };
        self.events.fire_run_started(&run);

        let request = SampleRequest {
            timeout,
            num_samples: self.num_samples,
        };

        let start = Instant::now();
        let response = self.backend.sample(encoded.model(), &request);
        let runtime = start.elapsed();

        let outcome = match response {
            Err(err) => {
                let message = format!("{} solver error: {err}", self.backend.name());
                self.events.fire_backend_failed(&run, &message);
                Outcome::solver_failure(message)
            }
            Ok(raw) if raw.is_empty() => {
                self.events.fire_no_candidates(&run);
                Outcome::no_candidates()
            }
            Ok(raw) => {
                let candidates = raw.into_iter().map(|candidate| {
                    Candidate::new(
                        candidate.energy,
                        decode(&candidate.assignment, encoded.mapping()),
                    )
                });
                select_candidate(n, candidates)?
            }
        };

        let result = QuboRunResult {
            board_size: n,
            weights: *weights,
            timeout,
            outcome,
            runtime,
        };
        self.events.fire_annealing_finished(&result);
        Ok(result)
    }
}

#[cfg(test)]
#[path = "qubo_tests.rs"]
mod tests;
