#![warn(missing_docs)]
//! # ConvBench
//!
//! Convergence comparison for iterative numerical methods (progressive
//! renderers, solvers) from the per-run statistics files they dump.
//!
//! - **Run loading**: `NNN.nrmseFloat`, `NNN.rmseFloat`, `NNN.absErrorFloat` and
//!   `NNN.processingTimes` become typed, immutable run records
//! - **Discovery**: probe `000`, `001`, … until the first absent run
//! - **Comparison**: time to reach a target error, speedups, error at a given
//!   time, rankings, leader changes, speedup sweeps
//! - **Curves**: error over time/iterations, efficiency, error derivative,
//!   exported as plot bundles for any renderer
//! - **Reports**: human, JSON and CSV output
//!
//! ## Quick Start
//!
//! ```ignore
//! use convbench::prelude::*;
//!
//! let runs = load_all(&LoaderConfig::new("stats/"))?;
//! let ranking = rank_by_final_error(&runs, MetricKind::Mae);
//! let reach = time_to_reach(&runs, MetricKind::Mae, 0.01, 0)?;
//! ```

// Re-export core types
pub use convbench_core::{
    LoadError, LoaderConfig, MetricKind, Rgb, RunCollection, RunRecord, Series, SeriesName,
    UnknownMetric, load_all, load_selected, load_series, parse_series, run_color,
};

// Re-export analysis
pub use convbench_stats::{
    AnalysisError, Crossover, ErrorBounds, LeaderChange, NOT_REACHED, SpeedupSweep, SweepConfig,
    TimeToReach, best_run, error_at_time, error_bounds, leader_changes, maximal_initial_error,
    minimal_final_error, rank_by_final_error, speedup_sweep, time_to_reach,
};

// Re-export reporting
pub use convbench_report::{
    OutputFormat, PlotOptions, PlotRequest, PlotSeries, Report, ReportMeta, derivative_plot,
    efficiency_plot, error_over_iterations_plot, error_over_time_plot, generate_csv_report,
    generate_json_report, generate_plot_json,
};

// Re-export CLI
pub use convbench_cli::{Cli, Commands, ConvConfig, run, run_with_cli};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        LoaderConfig, MetricKind, NOT_REACHED, RunCollection, RunRecord, best_run, error_at_time,
        load_all, load_selected, rank_by_final_error, time_to_reach,
    };
}
