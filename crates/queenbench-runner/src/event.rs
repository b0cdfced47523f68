//! Event system for run monitoring.
//!
//! Runners never log directly. They fire events on a [`SolveEventSupport`]
//! that the caller fills with listeners, so the same run can be traced,
//! counted in a test, or both.
//!
//! # Event Types
//!
//! - **Lifecycle**: run started, annealing run finished, exact run finished
//! - **Anomalies**: backend failure, empty response, unparseable output
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use queenbench_runner::event::{RunContext, SolveEventListener, SolveEventSupport};
//!
//! #[derive(Debug)]
//! struct MyListener;
//! impl SolveEventListener for MyListener {
//!     fn on_run_started(&self, run: &RunContext<'_>) {
//!         println!("N={} started", run.board_size);
//!     }
//! }
//!
//! let mut support = SolveEventSupport::new();
//! support.add_listener(Arc::new(MyListener));
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use queenbench_core::PenaltyWeights;
use tracing::{debug, error, info, warn};

use crate::exact::{CpRunResult, ParseError};
use crate::qubo::QuboRunResult;

/// Which kind of run an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunKind<'a> {
    /// Annealing over the penalty model.
    Annealing { weights: PenaltyWeights },
    /// Exact solver on a named model.
    Exact { model: &'a str },
}

/// Identifies a run in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunContext<'a> {
    pub board_size: usize,
    pub timeout: Option<Duration>,
    pub kind: RunKind<'a>,
}

/// Listener for run events.
///
/// Every method has an empty default, so implement only the events you
/// care about. Methods are called synchronously on the running thread.
pub trait SolveEventListener: Send + Sync + Debug {
    /// Called before the solver is invoked.
    fn on_run_started(&self, _run: &RunContext<'_>) {}

    /// Called when an annealing run has been judged.
    fn on_annealing_finished(&self, _result: &QuboRunResult) {}

    /// Called when an exact-solver run has been judged.
    fn on_exact_finished(&self, _result: &CpRunResult) {}

    /// Called when the annealing backend failed.
    fn on_backend_failed(&self, _run: &RunContext<'_>, _message: &str) {}

    /// Called when the annealing backend returned no candidates.
    fn on_no_candidates(&self, _run: &RunContext<'_>) {}

    /// Called when exact-solver output could not be parsed.
    ///
    /// The run is then judged on an empty placement.
    fn on_parse_failed(&self, _run: &RunContext<'_>, _error: &ParseError) {}
}

/// Central event broadcaster.
///
/// All listener methods are called synchronously in registration order.
#[derive(Default)]
pub struct SolveEventSupport {
    listeners: Vec<Arc<dyn SolveEventListener>>,
}

impl SolveEventSupport {
    /// Creates a new event support instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instance with a single listener.
    pub fn with_listener(listener: Arc<dyn SolveEventListener>) -> Self {
        let mut support = Self::new();
        support.add_listener(listener);
        support
    }

    pub fn add_listener(&mut self, listener: Arc<dyn SolveEventListener>) {
        self.listeners.push(listener);
    }

    /// Removes all listeners.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    // === Event Firing ===

    pub fn fire_run_started(&self, run: &RunContext<'_>) {
        for listener in &self.listeners {
            listener.on_run_started(run);
        }
    }

    pub fn fire_annealing_finished(&self, result: &QuboRunResult) {
        for listener in &self.listeners {
            listener.on_annealing_finished(result);
        }
    }

    pub fn fire_exact_finished(&self, result: &CpRunResult) {
        for listener in &self.listeners {
            listener.on_exact_finished(result);
        }
    }

    pub fn fire_backend_failed(&self, run: &RunContext<'_>, message: &str) {
        for listener in &self.listeners {
            listener.on_backend_failed(run, message);
        }
    }

    pub fn fire_no_candidates(&self, run: &RunContext<'_>) {
        for listener in &self.listeners {
            listener.on_no_candidates(run);
        }
    }

    pub fn fire_parse_failed(&self, run: &RunContext<'_>, error: &ParseError) {
        for listener in &self.listeners {
            listener.on_parse_failed(run, error);
        }
    }
}

impl Debug for SolveEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn timeout_ms(run: &RunContext<'_>) -> Option<u64> {
    run.timeout.map(|timeout| timeout.as_millis() as u64)
}

/// Emits every event as a `tracing` record.
///
/// Lifecycle events log at `info`, an empty response at `warn`, failures
/// at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventListener;

impl TracingEventListener {
    pub fn new() -> Self {
        Self
    }
}

impl SolveEventListener for TracingEventListener {
    fn on_run_started(&self, run: &RunContext<'_>) {
        match run.kind {
            RunKind::Annealing { weights } => info!(
                event = "run_start",
                solver = "annealing",
                board_size = run.board_size,
                timeout_ms = timeout_ms(run),
                penalties = %weights,
            ),
            RunKind::Exact { model } => info!(
                event = "run_start",
                solver = "exact",
                board_size = run.board_size,
                timeout_ms = timeout_ms(run),
                model = model,
            ),
        }
    }

    fn on_annealing_finished(&self, result: &QuboRunResult) {
        let outcome = &result.outcome;
        info!(
            event = "run_end",
            solver = "annealing",
            board_size = result.board_size,
            status = %outcome.status,
            candidates = outcome.candidates_considered,
            best_energy = outcome.objective,
            valid = outcome.valid,
            any_valid = outcome.best_valid_found,
            reason = %outcome.reason,
            duration_ms = result.runtime.as_millis() as u64,
        );
    }

    fn on_exact_finished(&self, result: &CpRunResult) {
        info!(
            event = "run_end",
            solver = "exact",
            board_size = result.board_size,
            model = %result.model_name,
            status = %result.status,
            valid = result.is_valid(),
            reason = %result.reason(),
            queens = result.num_queens(),
            duration_ms = result.runtime.as_millis() as u64,
        );
        if !result.is_valid() {
            debug!(
                event = "violations",
                board_size = result.board_size,
                violations = %result.joined_violations(),
            );
        }
    }

    fn on_backend_failed(&self, run: &RunContext<'_>, message: &str) {
        error!(
            event = "backend_error",
            board_size = run.board_size,
            error = message,
        );
    }

    fn on_no_candidates(&self, run: &RunContext<'_>) {
        warn!(event = "no_candidates", board_size = run.board_size);
    }

    fn on_parse_failed(&self, run: &RunContext<'_>, error: &ParseError) {
        error!(
            event = "parse_error",
            board_size = run.board_size,
            error = %error,
        );
    }
}

/// A counting listener that tracks event occurrences.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    run_started_count: AtomicUsize,
    annealing_finished_count: AtomicUsize,
    exact_finished_count: AtomicUsize,
    backend_failed_count: AtomicUsize,
    no_candidates_count: AtomicUsize,
    parse_failed_count: AtomicUsize,
}

impl CountingEventListener {
    /// Creates a new counting listener.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_started_count(&self) -> usize {
        self.run_started_count.load(Ordering::SeqCst)
    }

    pub fn annealing_finished_count(&self) -> usize {
        self.annealing_finished_count.load(Ordering::SeqCst)
    }

    pub fn exact_finished_count(&self) -> usize {
        self.exact_finished_count.load(Ordering::SeqCst)
    }

    pub fn backend_failed_count(&self) -> usize {
        self.backend_failed_count.load(Ordering::SeqCst)
    }

    pub fn no_candidates_count(&self) -> usize {
        self.no_candidates_count.load(Ordering::SeqCst)
    }

    pub fn parse_failed_count(&self) -> usize {
        self.parse_failed_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        for counter in [
            &self.run_started_count,
            &self.annealing_finished_count,
            &self.exact_finished_count,
            &self.backend_failed_count,
            &self.no_candidates_count,
            &self.parse_failed_count,
        ] {
            counter.store(0, Ordering::SeqCst);
        }
    }
}

impl SolveEventListener for CountingEventListener {
    fn on_run_started(&self, _run: &RunContext<'_>) {
        self.run_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_annealing_finished(&self, _result: &QuboRunResult) {
        self.annealing_finished_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_exact_finished(&self, _result: &CpRunResult) {
        self.exact_finished_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_backend_failed(&self, _run: &RunContext<'_>, _message: &str) {
        self.backend_failed_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_no_candidates(&self, _run: &RunContext<'_>) {
        self.no_candidates_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_parse_failed(&self, _run: &RunContext<'_>, _error: &ParseError) {
        self.parse_failed_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
