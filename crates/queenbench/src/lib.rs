//! queenbench - N-Queens benchmark of penalty-encoded annealing against exact solving
//!
//! One import for the whole pipeline: encode a board into a quadratic binary
//! model, decode and validate what a solver returns, and turn runs into CSV
//! records.
//!
//! # Example
//!
//! ```rust
//! use queenbench::prelude::*;
//!
//! let encoded = build_model(4, &PenaltyWeights::new(2.0, 2.0, 4.0)).unwrap();
//! assert_eq!(encoded.model().num_variables(), 16);
//!
//! let placement = vec![
//!     BoardCoordinate::new(2, 1),
//!     BoardCoordinate::new(4, 2),
//!     BoardCoordinate::new(1, 3),
//!     BoardCoordinate::new(3, 4),
//! ];
//! let verdict = validate(&placement, 4).unwrap();
//! assert_eq!(verdict.reason(), ReasonSummary::Ok);
//! ```

// Encoding and validation pipeline
pub use queenbench_core::{
    add_at_most_one_penalty, add_equality_penalty, build_model, decode, generate_mapping,
    select_candidate, validate, Assignment, BoardCoordinate, Candidate, CoordinateMapping,
    EncodedModel, OccupancyCounts, Outcome, OutcomeStatus, PenaltyWeights, Placement,
    QuadraticModel, QuadraticModelBuilder, QuadraticTerms, QueensError, ReasonSummary,
    ValidationVerdict, VariableIndex, VariablePair, Violation,
};

// Experiment configuration
pub use queenbench_config::{ConfigError, CpConfig, ExperimentConfig, Profile, QuboConfig};

// Runs, events and records
pub use queenbench_runner::{
    event, AnnealingBackend, BackendError, CountingEventListener, CpRecord, CpRunResult,
    Credentials, CsvExporter, EnvironmentCode, ExactRunner, ExactSolver, ExactSolverOutput,
    ExactSolverStatus, MiniZincCommand, ParseError, QuboRecord, QuboRunResult, QuboRunner,
    RawCandidate, RunnerError, SampleRequest, SolveEventListener, SolveEventSupport,
    TracingEventListener,
};

// Configured sweeps
pub use queenbench_runner::{
    run_cp_experiment, run_qubo_experiment, save_cp_results, save_qubo_results,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        build_model, decode, generate_mapping, select_candidate, validate, Assignment,
        BoardCoordinate, Candidate, Outcome, OutcomeStatus, PenaltyWeights, ReasonSummary,
    };
    pub use super::{ExperimentConfig, Profile};
    pub use super::{
        AnnealingBackend, CsvExporter, ExactRunner, ExactSolver, MiniZincCommand, QuboRunner,
        SolveEventListener, TracingEventListener,
    };
    pub use super::{run_cp_experiment, run_qubo_experiment};
}
