//! Exact-solver runs: output parsing and judgement.
//!
//! The solver prints one or more solution blocks separated by a line of ten
//! dashes, optionally closed by a line of ten equals signs:
//!
//! ```text
//! positions=[(1,2), (2,4), (3,1), (4,3)]
//! ----------
//! ==========
//! ```
//!
//! Only the last non-empty block is read.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use queenbench_core::{validate, BoardCoordinate, Placement, QueensError, ReasonSummary, ValidationVerdict};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::error::Result;
use crate::event::{RunContext, RunKind, SolveEventListener, SolveEventSupport};

const SEPARATOR: &str = "----------";
const TERMINATOR: &str = "==========";

/// How an exact-solver invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExactSolverStatus {
    /// The solver exited normally; its output holds a solution.
    Sat,
    /// The wall-clock budget ran out.
    Timeout,
    /// The solver could not be started or exited abnormally.
    Error,
}

impl ExactSolverStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExactSolverStatus::Sat => "SAT",
            ExactSolverStatus::Timeout => "TIMEOUT",
            ExactSolverStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for ExactSolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything an exact-solver invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactSolverOutput {
    pub status: ExactSolverStatus,
    pub runtime: Duration,
    pub stdout: String,
    pub stderr: String,
}

impl ExactSolverOutput {
    pub fn new(
        status: ExactSolverStatus,
        runtime: Duration,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            status,
            runtime,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn sat(runtime: Duration, stdout: impl Into<String>) -> Self {
        Self::new(ExactSolverStatus::Sat, runtime, stdout, "")
    }

    pub fn timeout(runtime: Duration) -> Self {
        Self::new(ExactSolverStatus::Timeout, runtime, "", "")
    }

    pub fn error(runtime: Duration, stderr: impl Into<String>) -> Self {
        Self::new(ExactSolverStatus::Error, runtime, "", stderr)
    }
}

/// Solves the N-Queens model in `model` for one board size.
///
/// Implementations never fail: a missing binary, a crash or an exhausted
/// budget are reported through [`ExactSolverOutput::status`].
pub trait ExactSolver: Send + Sync + fmt::Debug {
    fn solve(&self, model: &Path, board_size: usize, timeout: Duration) -> ExactSolverOutput;

    /// Short name used in result records.
    fn name(&self) -> &str {
        "exact"
    }
}

/// Why solver output yielded no placement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No solution blocks found in solver output")]
    NoSolutionBlocks,

    #[error("Could not find positions array in solver output")]
    MissingPositions,

    #[error("No coordinate pairs parsed from solver output")]
    NoCoordinatePairs,

    #[error("Coordinate out of range: {0}")]
    CoordinateOutOfRange(String),
}

fn position_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"positions=\[(?P<body>[^\]]*)\]").expect("positions pattern is valid")
    })
}

fn pair_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\(\s*(?P<row>\d+)\s*,\s*(?P<col>\d+)\s*\)").expect("pair pattern is valid")
    })
}

fn last_block(raw_output: &str) -> std::result::Result<String, ParseError> {
    let text = raw_output.replace(TERMINATOR, "");
    let text = text.trim();
    if !text.contains(SEPARATOR) {
        return Ok(text.to_string());
    }
    text.split(SEPARATOR)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .last()
        .map(str::to_string)
        .ok_or(ParseError::NoSolutionBlocks)
}

fn parse_coordinate(digits: &str) -> std::result::Result<i64, ParseError> {
    digits
        .parse()
        .map_err(|_| ParseError::CoordinateOutOfRange(digits.to_string()))
}

/// Extracts the `(row, column)` pairs of the last solution block.
///
/// An explicitly empty `positions=[]` yields an empty placement.
///
/// # Errors
///
/// Returns a [`ParseError`] when the output holds only separators, lacks
/// the `positions=[...]` array, or the array body holds no pairs.
///
/// # Examples
///
/// ```
/// use queenbench_core::BoardCoordinate;
/// use queenbench_runner::parse_positions;
///
/// let stdout = "positions=[(1,1)]\n----------\npositions=[(2, 1), (1, 2)]\n----------\n==========\n";
/// assert_eq!(
///     parse_positions(stdout).unwrap(),
///     vec![BoardCoordinate::new(2, 1), BoardCoordinate::new(1, 2)]
/// );
/// assert!(parse_positions("=====UNSATISFIABLE=====").is_err());
/// ```
pub fn parse_positions(raw_output: &str) -> std::result::Result<Placement, ParseError> {
    let block = last_block(raw_output)?;
    let captures = position_pattern()
        .captures(&block)
        .ok_or(ParseError::MissingPositions)?;

    let body = captures.name("body").map_or("", |m| m.as_str()).trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let placement = pair_pattern()
        .captures_iter(body)
        .map(|pair| {
            let row = parse_coordinate(&pair["row"])?;
            let column = parse_coordinate(&pair["col"])?;
            Ok(BoardCoordinate::new(row, column))
        })
        .collect::<std::result::Result<Placement, ParseError>>()?;

    if placement.is_empty() {
        return Err(ParseError::NoCoordinatePairs);
    }
    Ok(placement)
}

/// A judged exact-solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct CpRunResult {
    pub board_size: usize,
    pub model_name: String,
    pub timeout: Duration,
    pub status: ExactSolverStatus,
    pub runtime: Duration,
    /// Parsed placement; empty unless the solver reported `SAT` and its
    /// output parsed.
    pub placement: Placement,
    pub verdict: ValidationVerdict,
    pub parse_error: Option<ParseError>,
}

impl CpRunResult {
    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid()
    }

    pub fn reason(&self) -> ReasonSummary {
        self.verdict.reason()
    }

    pub fn num_queens(&self) -> usize {
        self.placement.len()
    }

    /// Violation messages joined with `;`.
    pub fn joined_violations(&self) -> String {
        self.verdict.violation_messages().join(";")
    }
}

/// Judges the output of one exact-solver invocation.
///
/// Output is parsed only when the status is `SAT`. A parse failure is
/// reported to `events` and the run is judged on an empty placement.
///
/// # Errors
///
/// Returns [`RunnerError::Queens`](crate::RunnerError::Queens) if
/// `board_size` is zero.
pub fn evaluate_exact_run(
    board_size: usize,
    model_name: &str,
    timeout: Duration,
    output: &ExactSolverOutput,
    events: &SolveEventSupport,
) -> Result<CpRunResult> {
    let mut parse_error = None;
    let placement = match output.status {
        ExactSolverStatus::Sat => match parse_positions(&output.stdout) {
            Ok(placement) => placement,
            Err(err) => {
                let run = RunContext {
                    board_size,
                    timeout: Some(timeout),
                    kind: RunKind::Exact { model: model_name },
                };
                events.fire_parse_failed(&run, &err);
                parse_error = Some(err);
                Vec::new()
            }
        },
        ExactSolverStatus::Timeout | ExactSolverStatus::Error => Vec::new(),
    };

    let verdict = validate(&placement, board_size)?;

    Ok(CpRunResult {
        board_size,
        model_name: model_name.to_string(),
        timeout,
        status: output.status,
        runtime: output.runtime,
        placement,
        verdict,
        parse_error,
    })
}

/// Runs an [`ExactSolver`] and judges its answer.
#[derive(Debug)]
pub struct ExactRunner<S> {
    solver: S,
    events: SolveEventSupport,
}

impl<S: ExactSolver> ExactRunner<S> {
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            events: SolveEventSupport::new(),
        }
    }

    /// Adds an event listener.
    pub fn with_listener(mut self, listener: Arc<dyn SolveEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn events(&self) -> &SolveEventSupport {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut SolveEventSupport {
        &mut self.events
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Solves `model_path` for an `n × n` board within `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Queens`](crate::RunnerError::Queens) if `n` is
    /// zero; the solver is not invoked in that case.
    pub fn run(
        &self,
        model_name: &str,
        model_path: &Path,
        n: usize,
        timeout: Duration,
    ) -> Result<CpRunResult> {
        if n == 0 {
            return Err(QueensError::InvalidBoardSize(n).into());
        }

        self.events.fire_run_started(&RunContext {
            board_size: n,
            timeout: Some(timeout),
            kind: RunKind::Exact { model: model_name },
        });

        let output = self.solver.solve(model_path, n, timeout);
        let result = evaluate_exact_run(n, model_name, timeout, &output, &self.events)?;

        self.events.fire_exact_finished(&result);
        Ok(result)
    }
}

#[cfg(test)]
#[path = "exact_tests.rs"]
mod tests;
