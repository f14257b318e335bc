//! Plot Bundles
//!
//! Everything a chart renderer needs to draw one figure, with no rendering
//! done here. One `PlotSeries` per run, colored with the run's stable color.
//!
//! Efficiency curves can hold non-finite values (zero error or zero time);
//! JSON output writes those as `null`.

use convbench_core::{MetricKind, Rgb, RunCollection, RunRecord, Series};
use serde::{Deserialize, Serialize};

/// Line width of error curves
pub const ERROR_LINE_WIDTH: f64 = 1.5;

/// Line width of efficiency and derivative curves
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// One curve of a figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    /// Legend entry
    pub label: String,
    /// External index of the run drawn
    pub run_index: u32,
    /// Line color
    pub color: Rgb,
    /// Line color as `#rrggbb`
    pub color_hex: String,
    /// Line width in points
    pub line_width: f64,
    /// Abscissae
    pub x: Vec<f64>,
    /// Ordinates, same length as `x`
    pub y: Vec<f64>,
}

impl PlotSeries {
    fn new(run: &RunRecord, line_width: f64, x: Vec<f64>, y: Vec<f64>) -> Self {
        let color = run.color();
        Self {
            label: run.label().to_string(),
            run_index: run.index(),
            color,
            color_hex: color.to_hex(),
            line_width,
            x,
            y,
        }
    }
}

/// A complete figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    /// Figure title
    pub title: String,
    /// Abscissa label
    pub x_label: String,
    /// Ordinate label
    pub y_label: String,
    /// Fixed abscissa range, renderer's choice when `None`
    pub x_range: Option<[f64; 2]>,
    /// Fixed ordinate range, renderer's choice when `None`
    pub y_range: Option<[f64; 2]>,
    /// Title shown above the legend
    pub legend_title: Option<String>,
    /// Logarithmic abscissa
    pub log_x: bool,
    /// Draw a grid
    pub grid: bool,
    /// Curves in collection order
    pub series: Vec<PlotSeries>,
}

/// Caller-controlled figure settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotOptions {
    /// Abscissa range
    pub x_range: Option<[f64; 2]>,
    /// Ordinate range
    pub y_range: Option<[f64; 2]>,
    /// Legend title
    pub legend_title: Option<String>,
    /// Logarithmic abscissa
    pub log_x: bool,
}

impl PlotOptions {
    fn request(
        &self,
        title: String,
        x_label: &str,
        y_label: String,
        series: Vec<PlotSeries>,
    ) -> PlotRequest {
        PlotRequest {
            title,
            x_label: x_label.to_string(),
            y_label,
            x_range: self.x_range,
            y_range: self.y_range,
            legend_title: self.legend_title.clone(),
            log_x: self.log_x,
            grid: true,
            series,
        }
    }
}

/// Error against processing time, one curve per run
pub fn error_over_time_plot(
    runs: &RunCollection,
    kind: MetricKind,
    options: &PlotOptions,
) -> PlotRequest {
    let series = runs
        .iter()
        .map(|run| {
            let (times, errors) = run.error_curve_over_time(kind);
            PlotSeries::new(run, ERROR_LINE_WIDTH, times.to_vec(), errors.to_vec())
        })
        .collect();

    options.request(
        format!("{} over time", kind.axis_label()),
        "time (seconds)",
        kind.axis_label().to_string(),
        series,
    )
}

/// Error against iteration count, one curve per run
pub fn error_over_iterations_plot(
    runs: &RunCollection,
    kind: MetricKind,
    options: &PlotOptions,
) -> PlotRequest {
    let series = runs
        .iter()
        .map(|run| {
            let (iterations, errors) = run.error_curve_over_iterations(kind);
            PlotSeries::new(run, ERROR_LINE_WIDTH, iterations.to_vec(), errors.to_vec())
        })
        .collect();

    options.request(
        format!("{} over iterations", kind.axis_label()),
        "iteration count",
        kind.axis_label().to_string(),
        series,
    )
}

/// `1 / (error * time)` against iteration index.
///
/// With `iteration_limit` set, the abscissa is fixed to `[0, limit]`
/// unless `options` already fixes it.
pub fn efficiency_plot(
    runs: &RunCollection,
    kind: MetricKind,
    iteration_limit: Option<usize>,
    options: &PlotOptions,
) -> PlotRequest {
    let series = runs
        .iter()
        .map(|run| {
            let efficiency = run.efficiency_curve(kind);
            PlotSeries::new(
                run,
                DEFAULT_LINE_WIDTH,
                iteration_axis(efficiency.len()),
                efficiency.to_vec(),
            )
        })
        .collect();

    let mut request = options.request(
        format!("{} efficiency", kind.axis_label()),
        "iteration count",
        "1 / (error * time)".to_string(),
        series,
    );
    if request.x_range.is_none() {
        request.x_range = iteration_limit
            .filter(|&limit| limit > 0)
            .map(|limit| [0.0, limit as f64]);
    }
    request
}

/// Error change rate against processing time, starting at the second sample
pub fn derivative_plot(
    runs: &RunCollection,
    kind: MetricKind,
    options: &PlotOptions,
) -> PlotRequest {
    let series = runs
        .iter()
        .map(|run| {
            let derivative: Series = run.error_derivative(kind);
            let x = run
                .processing_times()
                .get(1..)
                .map(<[f64]>::to_vec)
                .unwrap_or_default();
            PlotSeries::new(run, DEFAULT_LINE_WIDTH, x, derivative.to_vec())
        })
        .collect();

    options.request(
        format!("{} derivative", kind.axis_label()),
        "time (seconds)",
        format!("d({}) / dt", kind.axis_label()),
        series,
    )
}

fn iteration_axis(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}
