//! Run evaluation for queenbench.
//!
//! This crate drives the two solver families against the core pipeline and
//! turns what they return into flat records:
//! - [`QuboRunner`] encodes a board, calls an [`AnnealingBackend`] and
//!   reports the selected candidate
//! - [`ExactRunner`] calls an [`ExactSolver`], parses its output and
//!   validates the placement
//! - [`CsvExporter`] writes [`QuboRecord`] and [`CpRecord`] tables
//! - [`experiment`] sweeps both runners over a configured grid
//!
//! Solver internals stay behind the two collaborator traits. Progress is
//! reported through the listeners in [`event`], never logged directly.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use queenbench_core::ReasonSummary;
//! use queenbench_runner::event::CountingEventListener;
//! use queenbench_runner::{ExactRunner, ExactSolver, ExactSolverOutput};
//!
//! #[derive(Debug)]
//! struct CannedSolver;
//! impl ExactSolver for CannedSolver {
//!     fn solve(&self, _model: &Path, _n: usize, _timeout: Duration) -> ExactSolverOutput {
//!         ExactSolverOutput::sat(
//!             Duration::from_millis(3),
//!             "positions=[(2,1), (4,2), (1,3), (3,4)]\n----------\n",
//!         )
//!     }
//! }
//!
//! let listener = Arc::new(CountingEventListener::new());
//! let runner = ExactRunner::new(CannedSolver).with_listener(listener.clone());
//! let result = runner
//!     .run("classic", Path::new("queens.mzn"), 4, Duration::from_secs(5))
//!     .unwrap();
//!
//! assert!(result.is_valid());
//! assert_eq!(result.reason(), ReasonSummary::Ok);
//! assert_eq!(listener.exact_finished_count(), 1);
//! ```

pub mod annealing;
pub mod error;
pub mod event;
pub mod exact;
pub mod experiment;
pub mod minizinc;
pub mod qubo;
pub mod record;

pub use annealing::{AnnealingBackend, BackendError, Credentials, RawCandidate, SampleRequest};
pub use error::{EnvironmentCode, Result, RunnerError};
pub use event::{
    CountingEventListener, RunContext, RunKind, SolveEventListener, SolveEventSupport,
    TracingEventListener,
};
pub use exact::{
    evaluate_exact_run, parse_positions, CpRunResult, ExactRunner, ExactSolver,
    ExactSolverOutput, ExactSolverStatus, ParseError,
};
pub use experiment::{
    penalty_set_name, run_cp_experiment, run_qubo_experiment, save_cp_results,
    save_qubo_results,
};
pub use minizinc::MiniZincCommand;
pub use qubo::{QuboRunResult, QuboRunner, DEFAULT_NUM_SAMPLES};
pub use record::{CpRecord, CsvExporter, QuboRecord};
