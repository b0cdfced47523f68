//! Tests for configured sweeps.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::*;
use crate::annealing::{BackendError, RawCandidate, SampleRequest};
use crate::event::CountingEventListener;
use crate::exact::{ExactSolverOutput, ExactSolverStatus};
use crate::RunnerError;
use queenbench_core::{
    generate_mapping, OutcomeStatus, PenaltyWeights, QuadraticModel, QueensError, ReasonSummary,
};
use queenbench_test::placements::{
    diagonal_conflict_placement, eight_queens_solution, four_queens_solution,
};
use queenbench_test::assignment_for;

/// Answers every board it knows a solution for, and nothing otherwise.
#[derive(Debug)]
struct KnownSolutionsBackend;

impl AnnealingBackend for KnownSolutionsBackend {
    fn sample(
        &self,
        model: &QuadraticModel,
        _request: &SampleRequest,
    ) -> std::result::Result<Vec<RawCandidate>, BackendError> {
        let placement = match model.num_variables() {
            16 => four_queens_solution(),
            64 => eight_queens_solution(),
            _ => return Ok(Vec::new()),
        };
        let n = (model.num_variables() as f64).sqrt() as usize;
        let mapping = generate_mapping(n).map_err(|err| BackendError::new(err.to_string()))?;
        let assignment = assignment_for(&placement, &mapping);
        Ok(vec![RawCandidate::new(model.energy(&assignment), assignment)])
    }

    fn name(&self) -> &str {
        "known"
    }
}

#[test]
fn test_qubo_sweep_covers_the_profile_grid() {
    let config = ExperimentConfig::default();
    let runner = QuboRunner::from_config(KnownSolutionsBackend, &config);

    let records = run_qubo_experiment(&runner, &config).unwrap();

    // fast_debug: 2 sizes x 3 penalty sets x 1 timeout x 2 repeats.
    assert_eq!(records.len(), 12);
    assert!(records.iter().enumerate().all(|(i, r)| r.run_id == i));
    assert!(records.iter().all(|r| r.solver_name == "known"));
    assert!(records.iter().all(|r| r.is_valid && r.energy == 0.0));
    assert!(records.iter().all(|r| r.timeout_s == Some(1.0)));

    let labels: Vec<(usize, &str, usize)> = records
        .iter()
        .take(4)
        .map(|r| (r.board_size, r.penalty_set_name.as_str(), r.run_repeat))
        .collect();
    assert_eq!(
        labels,
        vec![
            (4, "penalty_set_0", 0),
            (4, "penalty_set_0", 1),
            (4, "penalty_set_1", 0),
            (4, "penalty_set_1", 1),
        ]
    );
    assert_eq!(records[6].board_size, 8);
    assert_eq!(
        (records[11].penalty_row, records[11].penalty_diag),
        (1.0, 2.0)
    );
}

#[test]
fn test_qubo_sweep_reports_unanswered_boards() {
    let mut config = ExperimentConfig::new().with_penalty_sets([PenaltyWeights::uniform(1.0)]);
    config.qubo.board_sizes = Some(vec![5]);
    config.qubo.runs_per_config = Some(1);
    let listener = Arc::new(CountingEventListener::new());
    let runner = QuboRunner::new(KnownSolutionsBackend).with_listener(listener.clone());

    let records = run_qubo_experiment(&runner, &config).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, OutcomeStatus::NoCandidates);
    assert_eq!(records[0].reason_summary, ReasonSummary::WrongCount);
    assert_eq!(listener.no_candidates_count(), 1);
}

#[test]
fn test_qubo_sweep_stops_on_zero_board_size() {
    let mut config = ExperimentConfig::new();
    config.qubo.board_sizes = Some(vec![4, 0]);
    let runner = QuboRunner::new(KnownSolutionsBackend);

    assert_eq!(
        run_qubo_experiment(&runner, &config),
        Err(RunnerError::Queens(QueensError::InvalidBoardSize(0)))
    );
}

/// Prints a diagonal conflict for every call and records the calls.
#[derive(Debug, Default)]
struct DiagonalSolver {
    calls: Mutex<Vec<(PathBuf, usize, Duration)>>,
}

impl ExactSolver for DiagonalSolver {
    fn solve(&self, model: &Path, board_size: usize, timeout: Duration) -> ExactSolverOutput {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_path_buf(), board_size, timeout));
        let body = diagonal_conflict_placement()
            .iter()
            .map(|cell| format!("({},{})", cell.row(), cell.column()))
            .collect::<Vec<_>>()
            .join(", ");
        let stdout = format!("positions=[{body}]\n----------\n");
        ExactSolverOutput::sat(Duration::from_millis(1), stdout)
    }
}

#[test]
fn test_cp_sweep_walks_models_sizes_and_timeouts() {
    let mut config = ExperimentConfig::new();
    config.cp.board_sizes = Some(vec![4]);
    config.cp.timeouts = Some(vec![5, 15]);
    let runner = ExactRunner::new(DiagonalSolver::default());

    let records = run_cp_experiment(&runner, &config).unwrap();

    let calls = runner.solver().calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            (PathBuf::from("models/queens_classic.mzn"), 4, Duration::from_secs(5)),
            (PathBuf::from("models/queens_classic.mzn"), 4, Duration::from_secs(15)),
            (PathBuf::from("models/queens_pb.mzn"), 4, Duration::from_secs(5)),
            (PathBuf::from("models/queens_pb.mzn"), 4, Duration::from_secs(15)),
        ]
    );

    let models: Vec<&str> = records.iter().map(|r| r.model_name.as_str()).collect();
    assert_eq!(models, ["classic", "classic", "pb", "pb"]);
    assert!(records.iter().all(|r| r.solver_name == "exact"));
    assert!(records.iter().all(|r| r.status == ExactSolverStatus::Sat));
    assert!(records.iter().all(|r| r.reason_summary == ReasonSummary::DiagConflict));
    assert_eq!(records[3].run_id, 3);
    assert_eq!(records[1].timeout_s, 15.0);
}

#[test]
fn test_results_are_saved_under_the_raw_directory() {
    let dir = std::env::temp_dir().join(format!("queenbench-sweep-{}", std::process::id()));
    let mut config = ExperimentConfig::new().with_results_dir(&dir);
    config.cp.board_sizes = Some(vec![4]);
    config.qubo.board_sizes = Some(vec![4]);

    let cp = run_cp_experiment(&ExactRunner::new(DiagonalSolver::default()), &config).unwrap();
    let qubo =
        run_qubo_experiment(&QuboRunner::new(KnownSolutionsBackend), &config).unwrap();

    let cp_path = save_cp_results(&cp, &config).unwrap();
    let qubo_path = save_qubo_results(&qubo, &config).unwrap();

    assert_eq!(cp_path, dir.join("raw").join("cp_results.csv"));
    assert_eq!(qubo_path, dir.join("raw").join("qubo_results.csv"));
    let qubo_csv = std::fs::read_to_string(&qubo_path).unwrap();
    assert_eq!(qubo_csv.lines().count(), qubo.len() + 1);
    assert!(std::fs::read_to_string(&cp_path)
        .unwrap()
        .contains("diag_conflict"));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_penalty_set_names() {
    assert_eq!(penalty_set_name(0), "penalty_set_0");
    assert_eq!(penalty_set_name(12), "penalty_set_12");
}
