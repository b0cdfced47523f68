//! Tests for the event system.

use std::sync::Mutex;

use super::*;
use queenbench_core::{validate, Outcome};

use crate::exact::ExactSolverStatus;

fn annealing_run() -> RunContext<'static> {
    RunContext {
        board_size: 4,
        timeout: Some(Duration::from_secs(1)),
        kind: RunKind::Annealing {
            weights: PenaltyWeights::default(),
        },
    }
}

fn qubo_result() -> QuboRunResult {
    QuboRunResult {
        board_size: 4,
        weights: PenaltyWeights::default(),
        timeout: None,
        outcome: Outcome::no_candidates(),
        runtime: Duration::from_millis(12),
    }
}

fn cp_result() -> CpRunResult {
    CpRunResult {
        board_size: 4,
        model_name: "classic".to_string(),
        timeout: Duration::from_secs(5),
        status: ExactSolverStatus::Timeout,
        runtime: Duration::from_secs(5),
        placement: Vec::new(),
        verdict: validate(&[], 4).unwrap(),
        parse_error: None,
    }
}

#[derive(Debug, Default)]
struct RecordingListener {
    events: Mutex<Vec<String>>,
}

impl RecordingListener {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl SolveEventListener for RecordingListener {
    fn on_run_started(&self, run: &RunContext<'_>) {
        self.push(format!("started:{}", run.board_size));
    }

    fn on_backend_failed(&self, _run: &RunContext<'_>, message: &str) {
        self.push(format!("failed:{message}"));
    }
}

#[test]
fn test_event_support_new() {
    let support = SolveEventSupport::new();

    assert_eq!(support.listener_count(), 0);
    assert!(!support.has_listeners());
}

#[test]
fn test_event_support_add_listeners() {
    let mut support = SolveEventSupport::new();
    support.add_listener(Arc::new(CountingEventListener::new()));
    support.add_listener(Arc::new(TracingEventListener::new()));

    assert_eq!(support.listener_count(), 2);
    assert!(support.has_listeners());
}

#[test]
fn test_event_support_fire_events() {
    let listener = Arc::new(CountingEventListener::new());
    let support = SolveEventSupport::with_listener(listener.clone());
    let run = annealing_run();

    support.fire_run_started(&run);
    support.fire_no_candidates(&run);
    support.fire_backend_failed(&run, "unreachable");
    support.fire_parse_failed(&run, &ParseError::MissingPositions);
    support.fire_annealing_finished(&qubo_result());
    support.fire_exact_finished(&cp_result());

    assert_eq!(listener.run_started_count(), 1);
    assert_eq!(listener.no_candidates_count(), 1);
    assert_eq!(listener.backend_failed_count(), 1);
    assert_eq!(listener.parse_failed_count(), 1);
    assert_eq!(listener.annealing_finished_count(), 1);
    assert_eq!(listener.exact_finished_count(), 1);
}

#[test]
fn test_event_support_clear_listeners() {
    let listener = Arc::new(CountingEventListener::new());
    let mut support = SolveEventSupport::with_listener(listener.clone());

    support.clear_listeners();
    support.fire_run_started(&annealing_run());

    assert!(!support.has_listeners());
    assert_eq!(listener.run_started_count(), 0);
}

#[test]
fn test_listeners_called_in_registration_order() {
    let first = Arc::new(RecordingListener::default());
    let second = Arc::new(RecordingListener::default());
    let mut support = SolveEventSupport::new();
    support.add_listener(first.clone());
    support.add_listener(second.clone());

    let run = annealing_run();
    support.fire_run_started(&run);
    support.fire_backend_failed(&run, "quota exceeded");
    // Not overridden by the recording listener.
    support.fire_no_candidates(&run);

    let expected = vec!["started:4".to_string(), "failed:quota exceeded".to_string()];
    assert_eq!(first.events(), expected);
    assert_eq!(second.events(), expected);
}

#[test]
fn test_counting_listener_reset() {
    let listener = CountingEventListener::new();
    let run = annealing_run();
    listener.on_run_started(&run);
    listener.on_no_candidates(&run);

    listener.reset();

    assert_eq!(listener.run_started_count(), 0);
    assert_eq!(listener.no_candidates_count(), 0);
}

#[test]
fn test_tracing_listener_handles_every_event() {
    let listener = TracingEventListener::new();
    let run = annealing_run();
    let exact_run = RunContext {
        board_size: 8,
        timeout: None,
        kind: RunKind::Exact { model: "pb" },
    };

    listener.on_run_started(&run);
    listener.on_run_started(&exact_run);
    listener.on_no_candidates(&run);
    listener.on_backend_failed(&run, "boom");
    listener.on_parse_failed(&exact_run, &ParseError::NoCoordinatePairs);
    listener.on_annealing_finished(&qubo_result());
    listener.on_exact_finished(&cp_result());
}

#[test]
fn test_debug_shows_listener_count() {
    let support = SolveEventSupport::with_listener(Arc::new(TracingEventListener));
    assert_eq!(format!("{support:?}"), "SolveEventSupport { listeners: 1 }");
}
