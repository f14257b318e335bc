//! Command Handlers
//!
//! Every analysis command builds a [`Report`] holding the sections it
//! computed, then writes it in the selected format. Human output shows only
//! those sections; JSON and CSV carry the whole report.
//!
//! ```text
//! Settings + RunCollection
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │   analyze   │  convbench-stats, read-only
//!   └──────┬──────┘
//!          ▼
//!   ┌─────────────┐
//!   │   Report    │  runs, ranking + command sections
//!   └──────┬──────┘
//!          ▼
//!   human │ json │ csv  →  stdout or --output
//! ```

use crate::config::{CONFIG_FILE_NAME, ConvConfig};
use crate::formatting::{
    format_bounds, format_crossover, format_error_at_time, format_human_output,
    format_metric_rankings, format_ranking, format_run_list, format_sweep, format_time_to_reach,
};
use crate::{Commands, PlotKind, Settings, write_output};
use anyhow::Context;
use convbench_core::{MetricKind, RunCollection};
use convbench_report::{
    ErrorAtTime, MetricRanking, OutputFormat, PlotOptions, PlotRequest, Report, ReportMeta,
    derivative_plot, efficiency_plot, error_over_iterations_plot, error_over_time_plot,
    generate_csv_report, generate_json_report, generate_plot_json,
};
use convbench_stats::{
    SweepConfig, best_run, error_at_time, error_bounds, leader_changes, speedup_sweep,
    time_to_reach,
};
use std::path::{Path, PathBuf};

/// Run `command` on the selected runs
pub(crate) fn execute(
    command: &Commands,
    settings: &Settings,
    runs: &RunCollection,
) -> anyhow::Result<()> {
    let kind = settings.metric;
    let mut report = new_report(settings, runs);

    let human = match command {
        Commands::List => format_run_list(&report),
        Commands::Rank { all_metrics } => {
            report.best_run = best_run(runs, kind);
            let mut output = format_ranking(&report);
            if *all_metrics {
                report.metric_rankings = all_metric_rankings(runs);
                output.push_str(&format_metric_rankings(&report.metric_rankings));
            }
            output
        }
        Commands::Reach {
            target_error,
            reference,
        } => {
            let reference = reference.unwrap_or(settings.analysis.reference);
            let reach = time_to_reach(runs, kind, *target_error, reference)?;
            let output = format_time_to_reach(&report.runs, &reach);
            report.time_to_reach = Some(reach);
            output
        }
        Commands::AtTime { time } => {
            let at = ErrorAtTime {
                time: *time,
                errors: error_at_time(runs, kind, *time),
            };
            let output = format_error_at_time(&report.runs, &at);
            report.error_at_time = Some(at);
            output
        }
        Commands::Bounds => {
            let bounds = error_bounds(runs, kind).context("no runs to bound")?;
            report.bounds = Some(bounds);
            format_bounds(&bounds)
        }
        Commands::Compare { first, second } => {
            let lookup = |index: u32| {
                runs.find_index(index)
                    .with_context(|| format!("run {:03} is not in the selection", index))
            };
            let crossover = leader_changes(
                lookup(*first)?,
                lookup(*second)?,
                kind,
                settings.loader.max_iterations,
            );
            let output = format_crossover(&report.runs, &crossover);
            report.crossover = Some(crossover);
            output
        }
        Commands::Sweep {
            steps,
            reference,
            candidate,
        } => {
            let config = SweepConfig {
                steps: steps.unwrap_or(settings.analysis.sweep_steps),
                reference: reference.unwrap_or(settings.analysis.reference),
                candidate: candidate.unwrap_or(settings.analysis.sweep_candidate),
            };
            report.sweep = speedup_sweep(runs, kind, &config)?;
            match &report.sweep {
                Some(sweep) => format_sweep(&report.runs, sweep),
                None => "\nSpeedup sweep: no target error gives the candidate a speedup\n"
                    .to_string(),
            }
        }
        Commands::Plot {
            kind: plot_kind,
            x_range,
            y_range,
            legend_title,
            log_x,
        } => {
            let options = PlotOptions {
                x_range: axis_range("--x-range", x_range.as_deref())?,
                y_range: axis_range("--y-range", y_range.as_deref())?,
                legend_title: legend_title.clone(),
                log_x: *log_x,
            };
            return write_plots(settings, runs, *plot_kind, &options);
        }
        Commands::Report => {
            report = build_full_report(settings, runs)?;
            format_human_output(&report)
        }
        Commands::Init { force } => {
            return init_config(*force);
        }
    };

    emit(settings, &report, &human)
}

fn new_report(settings: &Settings, runs: &RunCollection) -> Report {
    let meta = ReportMeta::new(
        settings.loader.base_dir.display().to_string(),
        settings.metric,
        settings.loader.max_iterations,
    );
    Report::new(meta, runs)
}

fn all_metric_rankings(runs: &RunCollection) -> Vec<MetricRanking> {
    MetricKind::ALL
        .iter()
        .map(|&metric| MetricRanking::new(runs, metric))
        .collect()
}

/// Report with every analysis the configuration enables
pub(crate) fn build_full_report(
    settings: &Settings,
    runs: &RunCollection,
) -> anyhow::Result<Report> {
    let kind = settings.metric;
    let analysis = &settings.analysis;
    let mut report = new_report(settings, runs);

    report.best_run = best_run(runs, kind);
    report.metric_rankings = all_metric_rankings(runs);
    report.bounds = error_bounds(runs, kind);

    if let Some(target) = analysis.target_error {
        report.time_to_reach = Some(time_to_reach(runs, kind, target, analysis.reference)?);
    }
    if let Some(time) = analysis.at_time {
        report.error_at_time = Some(ErrorAtTime {
            time,
            errors: error_at_time(runs, kind, time),
        });
    }

    // Reference against the best other run
    if let Some(reference) = runs.get(analysis.reference) {
        let challenger = report
            .ranking
            .iter()
            .find(|entry| entry.position != analysis.reference)
            .and_then(|entry| runs.get(entry.position));
        if let Some(challenger) = challenger {
            report.crossover = Some(leader_changes(
                reference,
                challenger,
                kind,
                settings.loader.max_iterations,
            ));
        }
    }

    if analysis.sweep_candidate < runs.len() && analysis.reference < runs.len() {
        let config = SweepConfig {
            steps: analysis.sweep_steps,
            reference: analysis.reference,
            candidate: analysis.sweep_candidate,
        };
        report.sweep = speedup_sweep(runs, kind, &config)?;
    }

    Ok(report)
}

fn emit(settings: &Settings, report: &Report, human: &str) -> anyhow::Result<()> {
    let output = match settings.format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => generate_csv_report(report),
        OutputFormat::Human => human.to_string(),
    };
    write_output(settings.output.as_ref(), &output)
}

fn axis_range(flag: &str, values: Option<&[f64]>) -> anyhow::Result<Option<[f64; 2]>> {
    match values {
        None => Ok(None),
        Some(&[lo, hi]) => Ok(Some([lo, hi])),
        Some(other) => anyhow::bail!("{} takes two values, got {}", flag, other.len()),
    }
}

fn plot_requests(
    runs: &RunCollection,
    metric: MetricKind,
    plot_kind: PlotKind,
    options: &PlotOptions,
) -> Vec<PlotRequest> {
    // Efficiency plots default to the shortest run's length
    let iteration_limit = runs.min_sample_count();

    match plot_kind {
        PlotKind::Time => vec![error_over_time_plot(runs, metric, options)],
        PlotKind::Iterations => vec![error_over_iterations_plot(runs, metric, options)],
        PlotKind::Efficiency => vec![efficiency_plot(runs, metric, iteration_limit, options)],
        PlotKind::Derivative => vec![derivative_plot(runs, metric, options)],
        PlotKind::All => vec![
            error_over_time_plot(runs, metric, options),
            error_over_iterations_plot(runs, metric, options),
            efficiency_plot(runs, metric, iteration_limit, options),
            derivative_plot(runs, metric, options),
        ],
    }
}

fn plot_file_name(plot_kind: PlotKind, metric: MetricKind) -> String {
    let stem = match plot_kind {
        PlotKind::Time => "error-over-time",
        PlotKind::Iterations => "error-over-iterations",
        PlotKind::Efficiency => "efficiency",
        PlotKind::Derivative => "derivative",
        PlotKind::All => "all",
    };
    format!("{}-{}.json", stem, metric.name())
}

fn write_plots(
    settings: &Settings,
    runs: &RunCollection,
    plot_kind: PlotKind,
    options: &PlotOptions,
) -> anyhow::Result<()> {
    let requests = plot_requests(runs, settings.metric, plot_kind, options);
    let json = generate_plot_json(&requests)?;

    let path: PathBuf = settings
        .output
        .clone()
        .unwrap_or_else(|| settings.output_dir.join(plot_file_name(plot_kind, settings.metric)));
    tracing::debug!(figures = requests.len(), path = %path.display(), "writing plot bundles");
    write_output(Some(&path), &json)
}

/// Write a default `convbench.toml` in the current directory
pub(crate) fn init_config(force: bool) -> anyhow::Result<()> {
    let dir = std::env::current_dir()?;
    let path = init_config_in(&dir, force)?;
    println!("Created {}", path.display());
    Ok(())
}

fn init_config_in(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::write(&path, ConvConfig::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
