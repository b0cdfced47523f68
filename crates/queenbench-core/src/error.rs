//! Error types for queenbench

use thiserror::Error;

/// Error raised when a call violates its input contract.
///
/// These are caller bugs rather than runtime conditions: a valid experiment
/// configuration never produces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueensError {
    /// Board size below 1 given to the mapper, encoder or validator
    #[error("Invalid board size: {0} (must be at least 1)")]
    InvalidBoardSize(usize),
}

/// Result type alias for queenbench core operations
pub type Result<T> = std::result::Result<T, QueensError>;
