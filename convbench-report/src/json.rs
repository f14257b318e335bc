//! JSON Output

use crate::plot::PlotRequest;
use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Serialize plot bundles for an external renderer.
///
/// Non-finite samples become `null`.
pub fn generate_plot_json(requests: &[PlotRequest]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(requests)
}
