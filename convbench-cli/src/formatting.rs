//! Output Formatting
//!
//! Human-readable output formatting for comparison reports.
//!
//! Each section of a [`Report`] has its own formatter so that subcommands can
//! print only what they computed; [`format_human_output`] prints every section
//! the report carries.

use convbench_report::{ErrorAtTime, MetricRanking, RankEntry, Report, RunSummary};
use convbench_stats::{Crossover, ErrorBounds, NOT_REACHED, SpeedupSweep, TimeToReach};

fn section(output: &mut String, title: &str) {
    output.push_str(&format!("\n{}\n", title));
    output.push_str(&"-".repeat(60));
    output.push('\n');
}

fn label_width(runs: &[RunSummary]) -> usize {
    runs.iter().map(|r| r.label.len()).max().unwrap_or(5).max(5)
}

fn label_of(runs: &[RunSummary], position: usize) -> &str {
    runs.get(position).map(|r| r.label.as_str()).unwrap_or("?")
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_else(|| "-".to_string())
}

fn seconds(value: f64) -> String {
    if value == NOT_REACHED {
        "not reached".to_string()
    } else {
        format!("{:.3} s", value)
    }
}

/// Table of the loaded runs
pub fn format_run_list(report: &Report) -> String {
    let mut output = String::new();
    section(
        &mut output,
        &format!("Runs ({})", report.meta.metric.axis_label()),
    );

    if report.runs.is_empty() {
        output.push_str(&format!("  No runs found in {}\n", report.meta.base_dir));
        return output;
    }

    let width = label_width(&report.runs);
    output.push_str(&format!(
        "  {:>5}  {:<width$}  {:>8}  {:>12}  {:>12}  {:>10}  {}\n",
        "Index",
        "Label",
        "Samples",
        "Initial",
        "Final",
        "Time",
        "Color",
        width = width
    ));
    for run in &report.runs {
        output.push_str(&format!(
            "  {:>5}  {:<width$}  {:>8}  {:>12}  {:>12}  {:>10}  {}\n",
            run.index,
            run.label,
            run.samples,
            optional(run.initial_error),
            optional(run.final_error),
            run.total_time
                .map(|t| format!("{:.3} s", t))
                .unwrap_or_else(|| "-".to_string()),
            run.color,
            width = width
        ));
    }
    output.push_str(&format!("  {} runs loaded.\n", report.runs.len()));
    output
}

/// Runs ordered by final error
pub fn format_ranking(report: &Report) -> String {
    let mut output = String::new();
    section(
        &mut output,
        &format!("Ranking by final {}", report.meta.metric.axis_label()),
    );
    let width = label_width(&report.runs);

    for RankEntry {
        rank,
        index,
        label,
        final_error,
        ..
    } in &report.ranking
    {
        let marker = if report.best_run == Some(*index) {
            " (best)"
        } else {
            ""
        };
        output.push_str(&format!(
            "  {:>3}. {:<width$}  [{:03}]  {}{}\n",
            rank,
            label,
            index,
            optional(*final_error),
            marker,
            width = width
        ));
    }
    output
}

/// One line of indices per metric
pub fn format_metric_rankings(rankings: &[MetricRanking]) -> String {
    let mut output = String::new();
    section(&mut output, "Index ranking per metric");
    for ranking in rankings {
        let indices: Vec<String> = ranking.indices.iter().map(u32::to_string).collect();
        output.push_str(&format!(
            "  {:<8} ({:<8}) = [{}]\n",
            ranking.metric.axis_label(),
            ranking.metric.name(),
            indices.join(", ")
        ));
    }
    output
}

/// Time to reach a target and speedups against the reference
pub fn format_time_to_reach(runs: &[RunSummary], reach: &TimeToReach) -> String {
    let mut output = String::new();
    section(
        &mut output,
        &format!(
            "Time to reach {} < {} (reference: {})",
            reach.metric.axis_label(),
            reach.target_error,
            label_of(runs, reach.reference)
        ),
    );
    let width = label_width(runs);

    for (position, &time) in reach.times.iter().enumerate() {
        let speedup = if reach.speedup_is_valid(position) {
            format!("{:.2}x", reach.speedups[position])
        } else {
            "-".to_string()
        };
        output.push_str(&format!(
            "  {:<width$}  {:>14}  {:>10}\n",
            label_of(runs, position),
            seconds(time),
            speedup,
            width = width
        ));
    }
    output
}

/// Error of every run at a processing time
pub fn format_error_at_time(runs: &[RunSummary], at: &ErrorAtTime) -> String {
    let mut output = String::new();
    section(&mut output, &format!("Error after {:.3} s", at.time));
    let width = label_width(runs);

    for (position, &error) in at.errors.iter().enumerate() {
        let value = if error == NOT_REACHED {
            "ended before".to_string()
        } else {
            format!("{:.6}", error)
        };
        output.push_str(&format!(
            "  {:<width$}  {:>14}\n",
            label_of(runs, position),
            value,
            width = width
        ));
    }
    output
}

/// Initial/final error range
pub fn format_bounds(bounds: &ErrorBounds) -> String {
    let mut output = String::new();
    section(&mut output, "Error bounds");
    output.push_str(&format!(
        "  maximal initial: {:.6}\n  minimal final:   {:.6}\n  span:            {:.6}\n",
        bounds.maximal_initial,
        bounds.minimal_final,
        bounds.span()
    ));
    output
}

/// Leader changes between two runs
pub fn format_crossover(runs: &[RunSummary], crossover: &Crossover) -> String {
    let mut output = String::new();
    section(
        &mut output,
        &format!(
            "Leader changes ({}, {} positions)",
            crossover.metric.axis_label(),
            crossover.compared_positions
        ),
    );

    let name = |index: u32| {
        runs.iter()
            .find(|r| r.index == index)
            .map(|r| r.label.clone())
            .unwrap_or_else(|| format!("{:03}", index))
    };

    for change in &crossover.changes {
        output.push_str(&format!(
            "  at position {:>6}: {} leads  (leader {:.3} s, trailer {:.3} s)\n",
            change.position,
            name(change.leader),
            change.leader_time,
            change.trailer_time
        ));
    }
    output
}

/// Best speedup found by a sweep
pub fn format_sweep(runs: &[RunSummary], sweep: &SpeedupSweep) -> String {
    let mut output = String::new();
    section(
        &mut output,
        &format!("Speedup sweep ({})", sweep.metric.axis_label()),
    );
    output.push_str(&format!(
        "  best speedup {:.2}x at error {:.6} (step {}, range {:.6} .. {:.6})\n",
        sweep.best_speedup,
        sweep.target_error,
        sweep.step,
        sweep.bounds.maximal_initial,
        sweep.bounds.minimal_final
    ));
    let width = label_width(runs);
    for (position, (&time, &speedup)) in sweep.times.iter().zip(&sweep.speedups).enumerate() {
        output.push_str(&format!(
            "  {:<width$}  {:>14}  {:>8.2}x\n",
            label_of(runs, position),
            seconds(time),
            speedup,
            width = width
        ));
    }
    output
}

/// Format a report for human-readable terminal display
///
/// Prints every section the report carries.
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("ConvBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  source: {}  metric: {}\n",
        report.meta.base_dir, report.meta.metric
    ));

    output.push_str(&format_run_list(report));
    if !report.ranking.is_empty() {
        output.push_str(&format_ranking(report));
    }
    if !report.metric_rankings.is_empty() {
        output.push_str(&format_metric_rankings(&report.metric_rankings));
    }
    if let Some(bounds) = &report.bounds {
        output.push_str(&format_bounds(bounds));
    }
    if let Some(reach) = &report.time_to_reach {
        output.push_str(&format_time_to_reach(&report.runs, reach));
    }
    if let Some(at) = &report.error_at_time {
        output.push_str(&format_error_at_time(&report.runs, at));
    }
    if let Some(crossover) = &report.crossover {
        output.push_str(&format_crossover(&report.runs, crossover));
    }
    if let Some(sweep) = &report.sweep {
        output.push_str(&format_sweep(&report.runs, sweep));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use convbench_core::{MetricKind, RunCollection, RunRecord};
    use convbench_report::ReportMeta;
    use convbench_stats::{best_run, time_to_reach};

    fn runs() -> RunCollection {
        let run = |index, label: &str, errors: &[f64], times: &[f64]| {
            RunRecord::from_series(
                index,
                Some(label),
                errors.to_vec().into(),
                errors.to_vec().into(),
                errors.to_vec().into(),
                times.to_vec().into(),
            )
            .unwrap()
        };
        RunCollection::from_runs(vec![
            run(0, "BPT", &[0.5, 0.3], &[1000.0, 2000.0]),
            run(3, "ICBPT", &[0.6, 0.1], &[1500.0, 2500.0]),
        ])
    }

    fn report() -> Report {
        let runs = runs();
        let mut report = Report::new(ReportMeta::new("stats/", MetricKind::Mae, None), &runs);
        report.best_run = best_run(&runs, MetricKind::Mae);
        report
    }

    #[test]
    fn test_human_output_sections() {
        let output = format_human_output(&report());
        assert!(output.contains("ConvBench Results"));
        assert!(output.contains("Runs (L1 error)"));
        assert!(output.contains("Ranking by final L1 error"));
        assert!(!output.contains("Speedup sweep"));
    }

    #[test]
    fn test_ranking_marks_best() {
        let output = format_ranking(&report());
        let first = output.lines().find(|l| l.contains("1. ")).unwrap();
        assert!(first.contains("ICBPT"));
        assert!(first.contains("[003]"));
        assert!(first.ends_with("(best)"));
    }

    #[test]
    fn test_reach_shows_unreached() {
        let report = report();
        let reach = time_to_reach(&runs(), MetricKind::Mae, 0.2, 0).unwrap();
        let output = format_time_to_reach(&report.runs, &reach);

        assert!(output.contains("reference: BPT"));
        assert!(output.contains("not reached"));
        assert!(output.contains("2.500 s"));
        // reference never reached, so no speedup is printed
        assert!(!output.lines().any(|l| l.trim_end().ends_with('x')));
    }

    #[test]
    fn test_empty_run_list() {
        let report = Report::new(
            ReportMeta::new("missing/", MetricKind::Rmse, None),
            &RunCollection::default(),
        );
        assert!(format_run_list(&report).contains("No runs found in missing/"));
    }
}
