//! Command-line exact solver.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use queenbench_config::ExperimentConfig;
use wait_timeout::ChildExt;

use crate::exact::{ExactSolver, ExactSolverOutput, ExactSolverStatus};

/// Runs `<binary> <model> -D N=<n>` and captures its output.
///
/// The process is killed once the timeout elapses. Exit code 0 maps to
/// `SAT`, any other exit or a failure to start maps to `ERROR`.
#[derive(Debug, Clone)]
pub struct MiniZincCommand {
    binary: PathBuf,
}

impl MiniZincCommand {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Uses the binary named by the configuration.
    pub fn from_config(config: &ExperimentConfig) -> Self {
        Self::new(&config.minizinc_binary)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, model: &Path, board_size: usize) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg(model)
            .arg("-D")
            .arg(format!("N={board_size}"))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl Default for MiniZincCommand {
    fn default() -> Self {
        Self::new("minizinc")
    }
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<String>> {
    stream.map(|mut stream| {
        thread::spawn(move || {
            let mut buffer = String::new();
            // A partial read still leaves whatever arrived in `buffer`.
            let _ = stream.read_to_string(&mut buffer);
            buffer
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl ExactSolver for MiniZincCommand {
    fn solve(&self, model: &Path, board_size: usize, timeout: Duration) -> ExactSolverOutput {
        let start = Instant::now();
        let mut child = match self.command(model, board_size).spawn() {
            Ok(child) => child,
            Err(err) => {
                return ExactSolverOutput::error(
                    start.elapsed(),
                    format!("failed to start {}: {err}", self.binary.display()),
                );
            }
        };

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let exit = child.wait_timeout(timeout);
        if !matches!(exit, Ok(Some(_))) {
            stop(&mut child);
        }
        let runtime = start.elapsed();

        let stdout = collect(stdout);
        let mut stderr = collect(stderr);

        let status = match exit {
            Ok(Some(status)) if status.success() => ExactSolverStatus::Sat,
            Ok(Some(status)) => {
                stderr.push_str(&format!("\nsolver exited with {status}"));
                ExactSolverStatus::Error
            }
            Ok(None) => ExactSolverStatus::Timeout,
            Err(err) => {
                stderr.push_str(&format!("\nfailed to wait for solver: {err}"));
                ExactSolverStatus::Error
            }
        };

        ExactSolverOutput::new(status, runtime, stdout, stderr)
    }

    fn name(&self) -> &str {
        "minizinc"
    }
}
