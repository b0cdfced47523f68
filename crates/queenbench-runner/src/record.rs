//! Flat result records and CSV export.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use queenbench_core::{OutcomeStatus, ReasonSummary};
use serde::Serialize;

use crate::exact::{CpRunResult, ExactSolverStatus};
use crate::qubo::QuboRunResult;

/// One row of the annealing results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuboRecord {
    pub run_id: usize,
    pub solver_name: String,
    #[serde(rename = "N")]
    pub board_size: usize,
    /// Absent when the backend ran without a budget.
    pub timeout_s: Option<f64>,
    pub status: OutcomeStatus,
    pub runtime_s: f64,
    pub is_valid: bool,
    pub reason_summary: ReasonSummary,
    /// Groups runs that share one penalty configuration.
    pub penalty_set_name: String,
    pub penalty_row: f64,
    pub penalty_col: f64,
    pub penalty_diag: f64,
    pub energy: f64,
    pub num_candidates: usize,
    pub best_valid_found: bool,
    /// Index of this run among the repeats of one configuration.
    pub run_repeat: usize,
    pub message: Option<String>,
}

impl QuboRecord {
    pub fn from_run(run_id: usize, solver_name: impl Into<String>, run: &QuboRunResult) -> Self {
        let outcome = &run.outcome;
        Self {
            run_id,
            solver_name: solver_name.into(),
            board_size: run.board_size,
            timeout_s: run.timeout.map(|timeout| timeout.as_secs_f64()),
            status: outcome.status,
            runtime_s: run.runtime.as_secs_f64(),
            is_valid: outcome.valid,
            reason_summary: outcome.reason,
            penalty_set_name: String::new(),
            penalty_row: run.weights.row,
            penalty_col: run.weights.column,
            penalty_diag: run.weights.diagonal,
            energy: outcome.objective,
            num_candidates: outcome.candidates_considered,
            best_valid_found: outcome.best_valid_found,
            run_repeat: 0,
            message: outcome.message.clone(),
        }
    }

    pub fn with_penalty_set(mut self, name: impl Into<String>) -> Self {
        self.penalty_set_name = name.into();
        self
    }

    pub fn with_run_repeat(mut self, repeat: usize) -> Self {
        self.run_repeat = repeat;
        self
    }
}

/// One row of the exact-solver results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpRecord {
    pub run_id: usize,
    pub solver_name: String,
    pub model_name: String,
    #[serde(rename = "N")]
    pub board_size: usize,
    pub timeout_s: f64,
    pub status: ExactSolverStatus,
    pub runtime_s: f64,
    pub is_valid: bool,
    pub reason_summary: ReasonSummary,
    pub num_queens: usize,
    /// Violation messages joined with `;`.
    pub violations: String,
}

impl CpRecord {
    pub fn from_run(run_id: usize, solver_name: impl Into<String>, run: &CpRunResult) -> Self {
        Self {
            run_id,
            solver_name: solver_name.into(),
            model_name: run.model_name.clone(),
            board_size: run.board_size,
            timeout_s: run.timeout.as_secs_f64(),
            status: run.status,
            runtime_s: run.runtime.as_secs_f64(),
            is_valid: run.is_valid(),
            reason_summary: run.reason(),
            num_queens: run.num_queens(),
            violations: run.joined_violations(),
        }
    }
}

/// CSV exporter for result records.
///
/// The header row is taken from the record's field names and is written
/// with the first record, so an empty slice produces empty output.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use queenbench_core::validate;
/// use queenbench_runner::{CpRecord, CpRunResult, CsvExporter, ExactSolverStatus};
///
/// let run = CpRunResult {
///     board_size: 4,
///     model_name: "classic".to_string(),
///     timeout: Duration::from_secs(5),
///     status: ExactSolverStatus::Timeout,
///     runtime: Duration::from_secs(5),
///     placement: Vec::new(),
///     verdict: validate(&[], 4).unwrap(),
///     parse_error: None,
/// };
///
/// let csv = CsvExporter::to_string(&[CpRecord::from_run(0, "minizinc", &run)]).unwrap();
/// assert!(csv.starts_with("run_id,solver_name,model_name,N,"));
/// assert!(CsvExporter::to_string::<CpRecord>(&[]).unwrap().is_empty());
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Exports records to a CSV string with a header row.
    pub fn to_string<R: Serialize>(records: &[R]) -> io::Result<String> {
        let mut buffer = Vec::new();
        Self::write(records, &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    /// Exports records to a CSV file, creating parent directories.
    pub fn to_file<R: Serialize>(records: &[R], path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Self::write(records, fs::File::create(path)?)
    }

    /// Writes records as CSV to a writer.
    pub fn write<R: Serialize, W: Write>(records: &[R], writer: W) -> io::Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
