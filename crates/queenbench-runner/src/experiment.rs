//! Configured parameter sweeps.
//!
//! Each sweep walks the grid an [`ExperimentConfig`] resolves to, runs every
//! point once through the given runner and numbers the resulting records
//! with a single `run_id` counter:
//!
//! - annealing: board size × penalty set × timeout × repeat
//! - exact: model × board size × timeout
//!
//! Call [`ExperimentConfig::validate`] first; a zero board size aborts the
//! whole sweep with an error.

use std::io;
use std::path::PathBuf;

use queenbench_config::ExperimentConfig;

use crate::annealing::AnnealingBackend;
use crate::error::Result;
use crate::exact::{ExactRunner, ExactSolver};
use crate::qubo::QuboRunner;
use crate::record::{CpRecord, CsvExporter, QuboRecord};

/// Name under which the `index`-th configured penalty set is reported.
pub fn penalty_set_name(index: usize) -> String {
    format!("penalty_set_{index}")
}

/// Runs the annealing sweep.
pub fn run_qubo_experiment<B: AnnealingBackend>(
    runner: &QuboRunner<B>,
    config: &ExperimentConfig,
) -> Result<Vec<QuboRecord>> {
    let timeouts = config.qubo_timeouts();
    let repeats = config.qubo_runs_per_config();
    let mut records = Vec::new();

    for &n in config.qubo_board_sizes() {
        for (index, weights) in config.qubo.penalty_sets.iter().enumerate() {
            let penalty_set = penalty_set_name(index);
            for &timeout in &timeouts {
                for repeat in 0..repeats {
                    let result = runner.solve(n, weights, Some(timeout))?;
                    let run_id = records.len();
                    let record = QuboRecord::from_run(run_id, runner.backend().name(), &result)
                        .with_penalty_set(penalty_set.clone())
                        .with_run_repeat(repeat);
                    records.push(record);
                }
            }
        }
    }

    Ok(records)
}

/// Runs the exact-solver sweep over every configured model.
pub fn run_cp_experiment<S: ExactSolver>(
    runner: &ExactRunner<S>,
    config: &ExperimentConfig,
) -> Result<Vec<CpRecord>> {
    let timeouts = config.cp_timeouts();
    let mut records = Vec::new();

    for (model_name, model_path) in &config.cp.models {
        for &n in config.cp_board_sizes() {
            for &timeout in &timeouts {
                let result = runner.run(model_name, model_path, n, timeout)?;
                records.push(CpRecord::from_run(records.len(), runner.solver().name(), &result));
            }
        }
    }

    Ok(records)
}

/// Writes annealing records to [`ExperimentConfig::qubo_results_path`].
pub fn save_qubo_results(records: &[QuboRecord], config: &ExperimentConfig) -> io::Result<PathBuf> {
    let path = config.qubo_results_path();
    CsvExporter::to_file(records, &path)?;
    Ok(path)
}

/// Writes exact-solver records to [`ExperimentConfig::cp_results_path`].
pub fn save_cp_results(records: &[CpRecord], config: &ExperimentConfig) -> io::Result<PathBuf> {
    let path = config.cp_results_path();
    CsvExporter::to_file(records, &path)?;
    Ok(path)
}

#[cfg(test)]
#[path = "experiment_tests.rs"]
mod tests;
