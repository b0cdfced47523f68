//! Colorful console output for run events.
//!
//! Provides a custom `tracing` layer that renders the records emitted by
//! [`TracingEventListener`](queenbench_runner::TracingEventListener) as one
//! line per event.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "queenbench_runner=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// directives are honored; runner events default to `info`.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        // Another global subscriber may already be installed; keep it.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RunConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats run events with colors.
pub struct RunConsoleLayer;

impl<S: Subscriber> Layer<S> for RunConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("queenbench_runner") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_run_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    solver: Option<String>,
    board_size: Option<u64>,
    timeout_ms: Option<u64>,
    penalties: Option<String>,
    model: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    error: Option<String>,
    violations: Option<String>,
    candidates: Option<u64>,
    queens: Option<u64>,
    duration_ms: Option<u64>,
    best_energy: Option<f64>,
    valid: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "solver" => self.solver = Some(value),
            "penalties" => self.penalties = Some(value),
            "model" => self.model = Some(value),
            "status" => self.status = Some(value),
            "reason" => self.reason = Some(value),
            "error" => self.error = Some(value),
            "violations" => self.violations = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "board_size" => self.board_size = Some(value),
            "timeout_ms" => self.timeout_ms = Some(value),
            "candidates" => self.candidates = Some(value),
            "queens" => self.queens = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "best_energy" {
            self.best_energy = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "valid" {
            self.valid = Some(value);
        }
    }
}

fn format_run_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("run_start") => format_run_start(v),
        Some("run_end") => format_run_end(v),
        Some("no_candidates") => format_line(
            "WARN".yellow().to_string(),
            v,
            "annealer returned no candidates".to_string(),
        ),
        Some("backend_error") => format_line(
            "ERROR".bright_red().to_string(),
            v,
            v.error.as_deref().unwrap_or("backend failed").to_string(),
        ),
        Some("parse_error") => format_line(
            "ERROR".bright_red().to_string(),
            v,
            format!(
                "unparseable solver output: {}",
                v.error.as_deref().unwrap_or("unknown")
            ),
        ),
        _ => String::new(),
    }
}

fn solver_tag(v: &EventVisitor) -> String {
    let name = match v.solver.as_deref() {
        Some("annealing") => "Annealing",
        Some("exact") => "Exact",
        _ => "Run",
    };
    format!("[{}]", name).bright_cyan().to_string()
}

fn format_line(level: String, v: &EventVisitor, text: String) -> String {
    format!(
        "{} {} {} N={} {}",
        timestamp().bright_black(),
        level,
        solver_tag(v),
        v.board_size.unwrap_or(0).yellow(),
        text
    )
}

fn format_run_start(v: &EventVisitor) -> String {
    let mut details = Vec::new();
    if let Some(model) = &v.model {
        details.push(format!("model {}", model.white().bold()));
    }
    if let Some(penalties) = &v.penalties {
        details.push(penalties.clone());
    }
    if let Some(ms) = v.timeout_ms {
        details.push(format!("timeout {}", format_duration_ms(ms)));
    }

    format_line(
        "INFO".bright_green().to_string(),
        v,
        format!("started ({})", details.join(", ")),
    )
}

fn format_run_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("N/A");
    let reason = v.reason.as_deref().unwrap_or("N/A");
    let verdict = if v.valid.unwrap_or(false) {
        "valid".bright_green().bold().to_string()
    } else {
        format!("invalid ({})", reason).bright_red().to_string()
    };

    let mut details = Vec::new();
    if let Some(candidates) = v.candidates {
        details.push(format!("{} candidates", candidates));
    }
    if let Some(energy) = v.best_energy {
        details.push(format!("best energy {}", energy));
    }
    if let Some(queens) = v.queens {
        details.push(format!("{} queens", queens));
    }
    if let Some(ms) = v.duration_ms {
        details.push(format!("time spent {}", format_duration_ms(ms).yellow()));
    }

    format_line(
        "INFO".bright_green().to_string(),
        v,
        format!("{}: {}, {}", status.white().bold(), verdict, details.join(", ")),
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_skipped() {
        let visitor = EventVisitor {
            event: Some("phase_start".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_run_event(&visitor).is_empty());
        assert!(format_run_event(&EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_run_start_line() {
        let visitor = EventVisitor {
            event: Some("run_start".to_string()),
            solver: Some("annealing".to_string()),
            board_size: Some(8),
            timeout_ms: Some(1000),
            penalties: Some("row=2 col=2 diag=4".to_string()),
            ..EventVisitor::default()
        };

        let line = format_run_event(&visitor);
        assert!(line.contains("Annealing"));
        assert!(line.contains("row=2 col=2 diag=4"));
        assert!(line.contains("timeout 1.00s"));
    }

    #[test]
    fn test_run_end_line() {
        let visitor = EventVisitor {
            event: Some("run_end".to_string()),
            solver: Some("exact".to_string()),
            board_size: Some(4),
            status: Some("TIMEOUT".to_string()),
            reason: Some("wrong_count".to_string()),
            valid: Some(false),
            queens: Some(0),
            ..EventVisitor::default()
        };

        let line = format_run_event(&visitor);
        assert!(line.contains("Exact"));
        assert!(line.contains("TIMEOUT"));
        assert!(line.contains("invalid (wrong_count)"));
        assert!(line.contains("0 queens"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
