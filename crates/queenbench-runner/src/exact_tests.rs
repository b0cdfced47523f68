//! Tests for exact-solver output parsing and run evaluation.

use std::path::PathBuf;
use std::sync::Mutex;

use super::*;
use crate::event::CountingEventListener;
use queenbench_test::placements::{four_queens_solution, placement};

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn test_parse_single_block() {
    let stdout = "positions=[(2,1), (4,2), (1,3), (3,4)]\n----------\n";
    assert_eq!(parse_positions(stdout).unwrap(), four_queens_solution());
}

#[test]
fn test_parse_keeps_last_block() {
    let stdout = "\
positions=[(1,1)]
----------
positions=[(2,1), (4,2), (1,3), (3,4)]
----------
==========
";
    assert_eq!(parse_positions(stdout).unwrap(), four_queens_solution());
}

#[test]
fn test_parse_without_separator() {
    let stdout = "% solving\npositions=[( 1 , 1 )]\n";
    assert_eq!(parse_positions(stdout).unwrap(), placement(&[(1, 1)]));
}

#[test]
fn test_parse_explicitly_empty_positions() {
    assert_eq!(parse_positions("positions=[]\n----------\n").unwrap(), Vec::new());
    assert_eq!(parse_positions("positions=[   ]").unwrap(), Vec::new());
}

#[test]
fn test_parse_missing_positions() {
    assert_eq!(
        parse_positions("=====UNSATISFIABLE=====\n"),
        Err(ParseError::MissingPositions)
    );
    assert_eq!(parse_positions(""), Err(ParseError::MissingPositions));
}

#[test]
fn test_parse_only_separators() {
    assert_eq!(
        parse_positions("----------\n----------\n==========\n"),
        Err(ParseError::NoSolutionBlocks)
    );
}

#[test]
fn test_parse_body_without_pairs() {
    assert_eq!(
        parse_positions("positions=[1, 2, 3]"),
        Err(ParseError::NoCoordinatePairs)
    );
}

#[test]
fn test_parse_rejects_oversized_coordinates() {
    assert!(matches!(
        parse_positions("positions=[(99999999999999999999, 1)]"),
        Err(ParseError::CoordinateOutOfRange(_))
    ));
}

#[test]
fn test_largest_coordinate_is_judged_out_of_bounds() {
    let output = ExactSolverOutput::sat(
        Duration::ZERO,
        "positions=[(9223372036854775807,1), (2,4), (3,1), (4,3)]\n----------\n",
    );

    let result =
        evaluate_exact_run(4, "classic", TIMEOUT, &output, &SolveEventSupport::new()).unwrap();

    assert_eq!(result.parse_error, None);
    assert_eq!(result.placement[0], BoardCoordinate::new(i64::MAX, 1));
    assert_eq!(result.num_queens(), 4);
    assert!(!result.is_valid());
    assert_eq!(result.reason(), ReasonSummary::FormatError);
}

#[test]
fn test_status_strings() {
    assert_eq!(ExactSolverStatus::Sat.to_string(), "SAT");
    assert_eq!(ExactSolverStatus::Timeout.to_string(), "TIMEOUT");
    assert_eq!(ExactSolverStatus::Error.to_string(), "ERROR");
}

#[test]
fn test_evaluate_sat_run() {
    let output = ExactSolverOutput::sat(
        Duration::from_millis(40),
        "positions=[(2,1), (4,2), (1,3), (3,4)]\n----------\n==========\n",
    );
    let events = SolveEventSupport::new();

    let result = evaluate_exact_run(4, "classic", TIMEOUT, &output, &events).unwrap();

    assert!(result.is_valid());
    assert_eq!(result.reason(), ReasonSummary::Ok);
    assert_eq!(result.num_queens(), 4);
    assert_eq!(result.joined_violations(), "");
    assert_eq!(result.runtime, Duration::from_millis(40));
    assert_eq!(result.parse_error, None);
}

#[test]
fn test_evaluate_invalid_sat_run_joins_violations() {
    let output = ExactSolverOutput::sat(Duration::ZERO, "positions=[(1,1), (1,2), (2,2), (3,3)]");
    let result =
        evaluate_exact_run(4, "pb", TIMEOUT, &output, &SolveEventSupport::new()).unwrap();

    assert_eq!(result.reason(), ReasonSummary::RowConflict);
    assert_eq!(
        result.joined_violations(),
        "Row conflict detected;Column conflict detected;Minor diagonal conflict detected"
    );
}

#[test]
fn test_evaluate_timeout_skips_parsing() {
    // Output of a timed-out run is ignored even if it holds a solution.
    let output = ExactSolverOutput::new(
        ExactSolverStatus::Timeout,
        TIMEOUT,
        "positions=[(2,1), (4,2), (1,3), (3,4)]",
        "",
    );
    let listener = Arc::new(CountingEventListener::new());
    let events = SolveEventSupport::with_listener(listener.clone());

    let result = evaluate_exact_run(4, "classic", TIMEOUT, &output, &events).unwrap();

    assert_eq!(result.status, ExactSolverStatus::Timeout);
    assert!(result.placement.is_empty());
    assert_eq!(result.reason(), ReasonSummary::WrongCount);
    assert_eq!(result.joined_violations(), "Expected 4 queens, found 0");
    assert_eq!(listener.parse_failed_count(), 0);
}

#[test]
fn test_evaluate_parse_failure_is_reported_and_judged_empty() {
    let output = ExactSolverOutput::sat(Duration::ZERO, "garbage");
    let listener = Arc::new(CountingEventListener::new());
    let events = SolveEventSupport::with_listener(listener.clone());

    let result = evaluate_exact_run(4, "classic", TIMEOUT, &output, &events).unwrap();

    assert_eq!(result.status, ExactSolverStatus::Sat);
    assert_eq!(result.parse_error, Some(ParseError::MissingPositions));
    assert!(!result.is_valid());
    assert_eq!(result.reason(), ReasonSummary::WrongCount);
    assert_eq!(listener.parse_failed_count(), 1);
}

#[test]
fn test_evaluate_zero_board_size() {
    let output = ExactSolverOutput::error(Duration::ZERO, "boom");
    let result = evaluate_exact_run(0, "classic", TIMEOUT, &output, &SolveEventSupport::new());
    assert!(result.is_err());
}

#[derive(Debug, Default)]
struct ScriptedSolver {
    calls: Mutex<Vec<(PathBuf, usize, Duration)>>,
    output: Option<ExactSolverOutput>,
}

impl ExactSolver for ScriptedSolver {
    fn solve(&self, model: &Path, board_size: usize, timeout: Duration) -> ExactSolverOutput {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_path_buf(), board_size, timeout));
        self.output
            .clone()
            .unwrap_or_else(|| ExactSolverOutput::error(Duration::ZERO, "not scripted"))
    }
}

#[test]
fn test_runner_invokes_solver_and_fires_events() {
    let solver = ScriptedSolver {
        output: Some(ExactSolverOutput::sat(
            Duration::from_millis(7),
            "positions=[(2,1), (4,2), (1,3), (3,4)]",
        )),
        ..ScriptedSolver::default()
    };
    let listener = Arc::new(CountingEventListener::new());
    let runner = ExactRunner::new(solver).with_listener(listener.clone());

    let result = runner
        .run("classic", Path::new("models/queens_classic.mzn"), 4, TIMEOUT)
        .unwrap();

    assert!(result.is_valid());
    assert_eq!(result.model_name, "classic");
    assert_eq!(result.timeout, TIMEOUT);
    assert_eq!(
        *runner.solver().calls.lock().unwrap(),
        vec![(PathBuf::from("models/queens_classic.mzn"), 4, TIMEOUT)]
    );
    assert_eq!(listener.run_started_count(), 1);
    assert_eq!(listener.exact_finished_count(), 1);
}

#[test]
fn test_runner_reports_solver_error_as_status() {
    let runner = ExactRunner::new(ScriptedSolver::default());

    let result = runner.run("pb", Path::new("queens_pb.mzn"), 8, TIMEOUT).unwrap();

    assert_eq!(result.status, ExactSolverStatus::Error);
    assert_eq!(result.reason(), ReasonSummary::WrongCount);
    assert_eq!(result.num_queens(), 0);
}

#[test]
fn test_runner_rejects_zero_board_without_calling_solver() {
    let runner = ExactRunner::new(ScriptedSolver::default());

    let result = runner.run("classic", Path::new("queens.mzn"), 0, TIMEOUT);

    assert!(matches!(
        result,
        Err(crate::RunnerError::Queens(QueensError::InvalidBoardSize(0)))
    ));
    assert!(runner.solver().calls.lock().unwrap().is_empty());
}
