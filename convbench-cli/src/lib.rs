#![warn(missing_docs)]
//! ConvBench CLI Library
//!
//! Command-line driver over the convbench crates. Holds no analysis of its own:
//! it resolves settings (`convbench.toml` → CLI flags), selects runs, calls the
//! analyzer and writes the result in the requested format.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     convbench_cli::run()
//! }
//! ```

mod commands;
mod config;
mod formatting;
mod selection;

pub use config::*;
pub use formatting::{
    format_bounds, format_crossover, format_error_at_time, format_human_output,
    format_metric_rankings, format_ranking, format_run_list, format_sweep, format_time_to_reach,
};
pub use selection::{RunSelection, select_runs};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use convbench_core::{LoaderConfig, MetricKind};
use convbench_report::OutputFormat;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ConvBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "convbench")]
#[command(
    author,
    version,
    about = "ConvBench - compare convergence of iterative methods from per-run error and timing series"
)]
pub struct Cli {
    /// Optional subcommand; defaults to Report
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding NNN.rmseFloat, NNN.processingTimes, ...
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Metric: nrmse, rmse, mse, mae
    #[arg(short, long, global = true)]
    pub metric: Option<String>,

    /// Output format: human, json, csv
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Keep only runs whose label matches this regex
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Explicit run indices, comma separated (e.g. 0,3,7)
    #[arg(long, value_delimiter = ',', global = true)]
    pub runs: Vec<u32>,

    /// Labels for --runs, comma separated, same count
    #[arg(long, value_delimiter = ',', global = true)]
    pub labels: Vec<String>,

    /// Keep only the first N + 1 samples of every series
    #[arg(long, global = true)]
    pub max_iterations: Option<usize>,

    /// Configuration file (default: convbench.toml discovered upwards)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the selected runs
    List,
    /// Rank runs by final error
    Rank {
        /// Print the index ranking for every metric
        #[arg(long)]
        all_metrics: bool,
    },
    /// Time for every run to drop below a target error, with speedups
    Reach {
        /// Target error; a sample reaches it when strictly smaller
        target_error: f64,
        /// Collection position of the reference run
        #[arg(long)]
        reference: Option<usize>,
    },
    /// Error of every run at a processing time
    AtTime {
        /// Processing time in seconds
        time: f64,
    },
    /// Maximal initial and "minimal" final error
    Bounds,
    /// Leader changes between two runs
    Compare {
        /// External index of the first run
        first: u32,
        /// External index of the second run
        second: u32,
    },
    /// Find the target error with the best speedup of one run over another
    Sweep {
        /// Number of target errors probed
        #[arg(long)]
        steps: Option<usize>,
        /// Collection position of the reference run
        #[arg(long)]
        reference: Option<usize>,
        /// Collection position of the run whose speedup is maximized
        #[arg(long)]
        candidate: Option<usize>,
    },
    /// Write plot bundles (JSON) for an external renderer
    Plot {
        /// Which figure to build
        #[arg(long, value_enum, default_value = "time")]
        kind: PlotKind,
        /// Abscissa range, e.g. 0,120
        #[arg(long, value_delimiter = ',')]
        x_range: Option<Vec<f64>>,
        /// Ordinate range, e.g. 0,0.05
        #[arg(long, value_delimiter = ',')]
        y_range: Option<Vec<f64>>,
        /// Title shown above the legend
        #[arg(long)]
        legend_title: Option<String>,
        /// Logarithmic abscissa
        #[arg(long)]
        log_x: bool,
    },
    /// Full report (default)
    Report,
    /// Write a default convbench.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Figures the `plot` command can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotKind {
    /// Error against processing time
    Time,
    /// Error against iteration count
    Iterations,
    /// `1 / (error * time)` against iteration count
    Efficiency,
    /// Error change rate against processing time
    Derivative,
    /// All of the above
    All,
}

/// Settings after layering `convbench.toml` and CLI flags
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where runs are read from
    pub loader: LoaderConfig,
    /// Which runs are compared
    pub selection: RunSelection,
    /// Metric analyses run on
    pub metric: MetricKind,
    /// Output format
    pub format: OutputFormat,
    /// Output file, stdout when `None`
    pub output: Option<PathBuf>,
    /// Analysis parameters from the configuration file
    pub analysis: AnalysisConfig,
    /// Directory plot bundles are written to
    pub output_dir: PathBuf,
}

/// Build [`Settings`] by layering: convbench.toml defaults → CLI overrides.
pub fn build_settings(cli: &Cli, config: &ConvConfig) -> anyhow::Result<Settings> {
    let base_dir = cli
        .base_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.base_dir));
    let max_iterations = cli.max_iterations.or(config.data.max_iterations);

    let metric: MetricKind = cli
        .metric
        .as_deref()
        .unwrap_or(&config.analysis.metric)
        .parse()?;

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    // --runs replaces the configured selection, labels included
    let (indices, labels) = if cli.runs.is_empty() {
        (config.runs.indices.clone(), config.runs.labels.clone())
    } else {
        (cli.runs.clone(), cli.labels.clone())
    };

    let filter = cli
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("invalid --filter pattern")?;

    Ok(Settings {
        loader: LoaderConfig::new(base_dir).with_max_iterations(max_iterations),
        selection: RunSelection {
            indices,
            labels,
            filter,
        },
        metric,
        format,
        output: cli.output.clone(),
        analysis: config.analysis.clone(),
        output_dir: PathBuf::from(&config.output.directory),
    })
}

/// Run the ConvBench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the ConvBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    if let Some(Commands::Init { force }) = cli.command {
        return commands::init_config(force);
    }

    // Explicit --config wins over discovery (CLI flags override both)
    let config = match &cli.config {
        Some(path) => ConvConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConvConfig::discover().unwrap_or_default(),
    };
    let settings = build_settings(&cli, &config)?;

    let runs = select_runs(&settings.selection, &settings.loader).with_context(|| {
        format!(
            "failed to load runs from {}",
            settings.loader.base_dir.display()
        )
    })?;
    tracing::info!(runs = runs.len(), metric = %settings.metric, "runs selected");

    let command = cli.command.unwrap_or(Commands::Report);
    commands::execute(&command, &settings, &runs)
}

/// Install the stderr subscriber; `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "convbench=debug"
    } else {
        "convbench=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Write `content` to `path`, or to stdout when no path is given.
fn write_output(path: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    if let Some(path) = path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(content.as_bytes())?;
        eprintln!("Report written to: {}", path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}
