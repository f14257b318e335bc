#![warn(missing_docs)]
//! ConvBench Report - Plot Bundles and Output Formats
//!
//! Turns loaded runs and analysis results into things other tools consume:
//! - `PlotRequest` bundles for an external chart renderer
//! - JSON (machine-readable, also used for plot bundles)
//! - CSV (one row per run, spreadsheet-compatible)
//!
//! Human-readable terminal output lives in the CLI.

mod csv;
mod json;
mod plot;
mod report;

pub use csv::generate_csv_report;
pub use json::{generate_json_report, generate_plot_json};
pub use plot::{
    DEFAULT_LINE_WIDTH, ERROR_LINE_WIDTH, PlotOptions, PlotRequest, PlotSeries, derivative_plot,
    efficiency_plot, error_over_iterations_plot, error_over_time_plot,
};
pub use report::{
    ErrorAtTime, MetricRanking, RankEntry, Report, ReportMeta, RunSummary, SCHEMA_VERSION, rank_entries,
    run_summaries,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
