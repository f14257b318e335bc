//! Configuration loading from convbench.toml
//!
//! ConvBench configuration can be specified in a `convbench.toml` file next to the
//! result directories. The configuration is automatically discovered by walking up
//! from the current directory. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up by [`ConvConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "convbench.toml";

/// ConvBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConvConfig {
    /// Where run files are read from
    #[serde(default)]
    pub data: DataConfig,
    /// Analysis parameters
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Explicit run selection
    #[serde(default)]
    pub runs: RunsConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Run file location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Directory holding the `NNN.<ext>` files
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    /// Keep only the first `max_iterations + 1` samples of every series
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            max_iterations: None,
        }
    }
}

fn default_base_dir() -> String {
    "stats/".to_string()
}

/// Analysis parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Metric analyses run on: "nrmse", "rmse", "mse" or "mae"
    #[serde(default = "default_metric")]
    pub metric: String,
    /// Threshold for time-to-reach in reports
    #[serde(default)]
    pub target_error: Option<f64>,
    /// Processing time (seconds) for error-at-time in reports
    #[serde(default)]
    pub at_time: Option<f64>,
    /// Collection position speedups are measured against
    #[serde(default)]
    pub reference: usize,
    /// Number of target errors probed by a sweep
    #[serde(default = "default_sweep_steps")]
    pub sweep_steps: usize,
    /// Collection position whose sweep speedup is maximized
    #[serde(default = "default_sweep_candidate")]
    pub sweep_candidate: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            metric: default_metric(),
            target_error: None,
            at_time: None,
            reference: 0,
            sweep_steps: default_sweep_steps(),
            sweep_candidate: default_sweep_candidate(),
        }
    }
}

fn default_metric() -> String {
    "mae".to_string()
}
fn default_sweep_steps() -> usize {
    convbench_stats::DEFAULT_SWEEP_STEPS
}
fn default_sweep_candidate() -> usize {
    1
}

/// Explicit run selection; empty means discover every run
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RunsConfig {
    /// External run indices, in comparison order
    #[serde(default)]
    pub indices: Vec<u32>,
    /// One label per index; empty strings fall back to the padded index
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory plot bundles are written to
    #[serde(default = "default_output_dir")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_output_dir(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_output_dir() -> String {
    "target/convbench".to_string()
}

impl ConvConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` and load the first `convbench.toml` found
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "ignoring unreadable config");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# ConvBench Configuration

[data]
# Directory holding 000.rmseFloat, 000.processingTimes, ...
base_dir = "stats/"
# Keep only the first N + 1 samples of every series (uncomment to enable)
# max_iterations = 512

[analysis]
# Metric: nrmse, rmse, mse (derived as rmse^2) or mae
metric = "mae"
# Target error for time-to-reach in reports (uncomment to enable)
# target_error = 0.01
# Processing time in seconds for error-at-time in reports (uncomment to enable)
# at_time = 60.0
# Collection position speedups are measured against
reference = 0
# Number of target errors probed by `convbench sweep`
sweep_steps = 1000
# Collection position whose speedup the sweep maximizes
sweep_candidate = 1

[runs]
# Explicit selection; leave empty to load 000, 001, ... until one is missing
indices = []
labels = []

[output]
# Default output format: human, json, csv
format = "human"
# Directory plot bundles are written to
directory = "target/convbench"
"#
        .to_string()
    }
}
