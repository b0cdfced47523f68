//! Configuration system for queenbench.
//!
//! Load experiment configuration from TOML or YAML files to switch between
//! a quick debugging sweep and the full benchmark without code changes.
//! Board sizes, timeouts and repetition counts come from the selected
//! [`Profile`] unless the file overrides them.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use queenbench_config::{ExperimentConfig, Profile};
//! use std::time::Duration;
//!
//! let config = ExperimentConfig::from_toml_str(r#"
//!     profile = "full_bench"
//!
//!     [qubo]
//!     num_samples = 50
//!
//!     [[qubo.penalty_sets]]
//!     row = 2.0
//!     col = 2.0
//!     diag = 4.0
//! "#).unwrap();
//!
//! assert_eq!(config.profile, Profile::FullBench);
//! assert_eq!(config.cp_board_sizes(), &[4, 8, 12, 16]);
//! assert_eq!(config.qubo_timeouts(), vec![Duration::from_secs(1), Duration::from_secs(3)]);
//! assert_eq!(config.qubo.penalty_sets.len(), 1);
//! assert!(config.validate().is_ok());
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use queenbench_config::ExperimentConfig;
//!
//! let config = ExperimentConfig::load("queenbench.toml").unwrap_or_default();
//! // Proceeds with the fast_debug profile if the file doesn't exist
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use queenbench_core::PenaltyWeights;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Named sweep presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Small boards and short timeouts for quick iteration.
    #[default]
    FastDebug,

    /// Larger boards until timeouts or degraded success rates show up.
    FullBench,
}

/// Sweep values a [`Profile`] supplies when the file leaves them out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSettings {
    pub cp_board_sizes: &'static [usize],
    /// Seconds.
    pub cp_timeouts: &'static [u64],
    pub qubo_board_sizes: &'static [usize],
    /// Seconds per annealing call.
    pub qubo_timeouts: &'static [f64],
    pub qubo_runs_per_config: usize,
}

const FAST_DEBUG: ProfileSettings = ProfileSettings {
    cp_board_sizes: &[4, 8],
    cp_timeouts: &[5],
    qubo_board_sizes: &[4, 8],
    qubo_timeouts: &[1.0],
    qubo_runs_per_config: 2,
};

const FULL_BENCH: ProfileSettings = ProfileSettings {
    cp_board_sizes: &[4, 8, 12, 16],
    cp_timeouts: &[5, 15],
    qubo_board_sizes: &[4, 8, 12],
    qubo_timeouts: &[1.0, 3.0],
    qubo_runs_per_config: 3,
};

impl Profile {
    pub const fn settings(&self) -> &'static ProfileSettings {
        match self {
            Profile::FastDebug => &FAST_DEBUG,
            Profile::FullBench => &FULL_BENCH,
        }
    }
}

/// Main experiment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExperimentConfig {
    /// Preset supplying the sweep values not set explicitly.
    #[serde(default)]
    pub profile: Profile,

    /// Exact-solver experiment settings.
    #[serde(default)]
    pub cp: CpConfig,

    /// Annealing experiment settings.
    #[serde(default)]
    pub qubo: QuboConfig,

    /// Executable invoked for the exact-solver runs.
    #[serde(default = "default_minizinc_binary")]
    pub minizinc_binary: String,

    /// Directory that receives the result CSV files.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

fn default_minizinc_binary() -> String {
    "minizinc".to_string()
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            cp: CpConfig::default(),
            qubo: QuboConfig::default(),
            minizinc_binary: default_minizinc_binary(),
            results_dir: default_results_dir(),
        }
    }
}

impl ExperimentConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration for `profile`.
    pub fn for_profile(profile: Profile) -> Self {
        Self::new().with_profile(profile)
    }

    /// Loads configuration from a file, choosing YAML for `.yaml`/`.yml`
    /// extensions and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Replaces the penalty sets swept by the annealing runs.
    pub fn with_penalty_sets(mut self, sets: impl IntoIterator<Item = PenaltyWeights>) -> Self {
        self.qubo.penalty_sets = sets.into_iter().collect();
        self
    }

    /// Sets the number of samples requested per annealing call.
    pub fn with_num_samples(mut self, num_samples: usize) -> Self {
        self.qubo.num_samples = num_samples;
        self
    }

    /// Sets the results directory.
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// Raw annealing results file, under `<results_dir>/raw`.
    pub fn qubo_results_path(&self) -> PathBuf {
        self.results_dir.join("raw").join("qubo_results.csv")
    }

    /// Raw exact-solver results file, under `<results_dir>/raw`.
    pub fn cp_results_path(&self) -> PathBuf {
        self.results_dir.join("raw").join("cp_results.csv")
    }

    /// Board sizes for the exact-solver runs.
    pub fn cp_board_sizes(&self) -> &[usize] {
        self.cp
            .board_sizes
            .as_deref()
            .unwrap_or(self.profile.settings().cp_board_sizes)
    }

    /// Timeouts for the exact-solver runs.
    pub fn cp_timeouts(&self) -> Vec<Duration> {
        self.cp
            .timeouts
            .as_deref()
            .unwrap_or(self.profile.settings().cp_timeouts)
            .iter()
            .copied()
            .map(Duration::from_secs)
            .collect()
    }

    /// Board sizes for the annealing runs.
    pub fn qubo_board_sizes(&self) -> &[usize] {
        self.qubo
            .board_sizes
            .as_deref()
            .unwrap_or(self.profile.settings().qubo_board_sizes)
    }

    /// Timeouts for the annealing runs, as configured in seconds.
    pub fn qubo_timeout_secs(&self) -> &[f64] {
        self.qubo
            .timeouts
            .as_deref()
            .unwrap_or(self.profile.settings().qubo_timeouts)
    }

    /// Timeouts for the annealing runs.
    ///
    /// Entries that are not a representable duration are skipped; call
    /// [`validate`](Self::validate) to reject them instead.
    pub fn qubo_timeouts(&self) -> Vec<Duration> {
        self.qubo_timeout_secs()
            .iter()
            .filter_map(|&secs| Duration::try_from_secs_f64(secs).ok())
            .collect()
    }

    /// Repetitions per (board size, timeout, penalty set) combination.
    pub fn qubo_runs_per_config(&self) -> usize {
        self.qubo
            .runs_per_config
            .unwrap_or(self.profile.settings().qubo_runs_per_config)
    }

    /// Checks the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero board size, a negative or
    /// non-finite penalty weight, a zero sample or repetition count, a
    /// non-positive timeout, or an empty token variable name.
    ///
    /// # Examples
    ///
    /// ```
    /// use queenbench_config::ExperimentConfig;
    ///
    /// let config = ExperimentConfig::new().with_num_samples(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut sizes = self.cp_board_sizes().iter().chain(self.qubo_board_sizes());
        if sizes.any(|&n| n == 0) {
            return Err(ConfigError::Invalid(
                "board sizes must be positive".to_string(),
            ));
        }

        if let Some(weights) = self.qubo.penalty_sets.iter().find(|w| !w.is_valid()) {
            return Err(ConfigError::Invalid(format!(
                "penalty weights must be finite and non-negative: {weights}"
            )));
        }

        if self.cp_timeouts().iter().any(Duration::is_zero) {
            return Err(ConfigError::Invalid(
                "exact-solver timeouts must be positive".to_string(),
            ));
        }

        if let Some(secs) = self
            .qubo_timeout_secs()
            .iter()
            .find(|secs| !(secs.is_finite() && **secs > 0.0))
        {
            return Err(ConfigError::Invalid(format!(
                "annealing timeouts must be positive, got {secs}"
            )));
        }

        if self.qubo.num_samples == 0 {
            return Err(ConfigError::Invalid(
                "num_samples must be at least 1".to_string(),
            ));
        }

        if self.qubo_runs_per_config() == 0 {
            return Err(ConfigError::Invalid(
                "runs_per_config must be at least 1".to_string(),
            ));
        }

        if self.qubo.token_env.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "token_env must name an environment variable".to_string(),
            ));
        }

        Ok(())
    }
}

/// Exact-solver experiment settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CpConfig {
    /// Overrides the profile's board sizes.
    pub board_sizes: Option<Vec<usize>>,

    /// Overrides the profile's timeouts, in seconds.
    pub timeouts: Option<Vec<u64>>,

    /// Model files keyed by model name.
    #[serde(default = "default_cp_models")]
    pub models: BTreeMap<String, PathBuf>,
}

fn default_cp_models() -> BTreeMap<String, PathBuf> {
    BTreeMap::from([
        (
            "classic".to_string(),
            PathBuf::from("models/queens_classic.mzn"),
        ),
        ("pb".to_string(), PathBuf::from("models/queens_pb.mzn")),
    ])
}

impl Default for CpConfig {
    fn default() -> Self {
        Self {
            board_sizes: None,
            timeouts: None,
            models: default_cp_models(),
        }
    }
}

/// Annealing experiment settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct QuboConfig {
    /// Overrides the profile's board sizes.
    pub board_sizes: Option<Vec<usize>>,

    /// Overrides the profile's timeouts, in seconds.
    pub timeouts: Option<Vec<f64>>,

    /// Overrides the profile's repetition count.
    pub runs_per_config: Option<usize>,

    /// Penalty weight sets swept per board size.
    #[serde(default = "default_penalty_sets")]
    pub penalty_sets: Vec<PenaltyWeights>,

    /// Samples requested per annealing call.
    #[serde(default = "default_num_samples")]
    pub num_samples: usize,

    /// Environment variable holding the annealing service token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_penalty_sets() -> Vec<PenaltyWeights> {
    vec![
        PenaltyWeights::new(4.0, 4.0, 4.0),
        PenaltyWeights::new(2.0, 2.0, 4.0),
        PenaltyWeights::new(1.0, 1.0, 2.0),
    ]
}

fn default_num_samples() -> usize {
    20
}

fn default_token_env() -> String {
    "AMPLIFY_TOKEN".to_string()
}

impl Default for QuboConfig {
    fn default() -> Self {
        Self {
            board_sizes: None,
            timeouts: None,
            runs_per_config: None,
            penalty_sets: default_penalty_sets(),
            num_samples: default_num_samples(),
            token_env: default_token_env(),
        }
    }
}
