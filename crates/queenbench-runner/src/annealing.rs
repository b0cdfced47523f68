//! The annealing collaborator seam.
//!
//! A backend receives the encoded model and returns sampled assignments.
//! How it anneals (remote service, local heuristic, test double) is its own
//! business; the runner only judges what comes back.

use std::env::{self, VarError};
use std::fmt::{self, Debug};
use std::time::Duration;

use queenbench_config::ExperimentConfig;
use queenbench_core::{Assignment, QuadraticModel};
use thiserror::Error;

use crate::error::{EnvironmentCode, Result, RunnerError};

/// Parameters of one sampling call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    /// Wall-clock budget for the call, if the backend supports one.
    pub timeout: Option<Duration>,
    /// Number of candidates to return.
    pub num_samples: usize,
}

/// One sampled assignment with the objective value the backend reports.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub energy: f64,
    pub assignment: Assignment,
}

impl RawCandidate {
    pub fn new(energy: f64, assignment: Assignment) -> Self {
        Self { energy, assignment }
    }
}

/// Failure reported by an annealing backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Samples low-energy assignments of a quadratic binary model.
///
/// An empty `Ok` list is a valid answer and is reported as "no candidates".
/// Backends for a hosted service take their [`Credentials`] at construction;
/// [`QuboRunner::connect`](crate::QuboRunner::connect) reads them from the
/// configured environment variable and hands them over.
pub trait AnnealingBackend: Send + Sync + Debug {
    /// Returns up to `request.num_samples` candidates.
    fn sample(
        &self,
        model: &QuadraticModel,
        request: &SampleRequest,
    ) -> std::result::Result<Vec<RawCandidate>, BackendError>;

    /// Short name used in logs and result records.
    fn name(&self) -> &str {
        "annealer"
    }
}

/// Access token for a hosted annealing service.
///
/// The token never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Reads the token from the environment variable `var`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Environment`] with
    /// [`EnvironmentCode::MissingCredential`] when the variable is unset or
    /// not valid unicode, and [`EnvironmentCode::EmptyCredential`] when it
    /// holds only whitespace.
    pub fn from_env(var: &str) -> Result<Self> {
        Self::from_lookup(var, env::var(var))
    }

    /// Reads the token from the variable named by the configuration.
    pub fn from_config(config: &ExperimentConfig) -> Result<Self> {
        Self::from_env(&config.qubo.token_env)
    }

    fn from_lookup(var: &str, lookup: std::result::Result<String, VarError>) -> Result<Self> {
        match lookup {
            Ok(token) if token.trim().is_empty() => Err(RunnerError::environment(
                EnvironmentCode::EmptyCredential,
                format!("annealing token in environment variable {var} is empty"),
            )),
            Ok(token) => Ok(Self::new(token)),
            Err(VarError::NotPresent) => Err(RunnerError::environment(
                EnvironmentCode::MissingCredential,
                format!("annealing token not found in environment variable {var}"),
            )),
            Err(VarError::NotUnicode(_)) => Err(RunnerError::environment(
                EnvironmentCode::MissingCredential,
                format!("annealing token in environment variable {var} is not valid unicode"),
            )),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}
