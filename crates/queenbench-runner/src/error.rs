//! Error types for run evaluation.

use std::fmt;

use queenbench_core::QueensError;
use thiserror::Error;

/// Reason code for an unusable runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentCode {
    /// The credential variable is not set.
    MissingCredential,
    /// The credential variable is set but blank.
    EmptyCredential,
}

impl EnvironmentCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EnvironmentCode::MissingCredential => "missing_credential",
            EnvironmentCode::EmptyCredential => "empty_credential",
        }
    }
}

impl fmt::Display for EnvironmentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a run before any solver is asked.
///
/// Solver failures and empty responses are not errors; they are reported
/// through the run result's status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Queens(#[from] QueensError),

    #[error("{message} ({code})")]
    Environment {
        code: EnvironmentCode,
        message: String,
    },
}

impl RunnerError {
    pub(crate) fn environment(code: EnvironmentCode, message: impl Into<String>) -> Self {
        RunnerError::Environment {
            code,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RunnerError>;
