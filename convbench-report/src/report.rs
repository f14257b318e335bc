//! Report Data Structures

use chrono::{DateTime, Utc};
use convbench_core::{MetricKind, RunCollection, RunRecord};
use convbench_stats::{Crossover, ErrorBounds, SpeedupSweep, TimeToReach, rank_by_final_error};
use serde::{Deserialize, Serialize};

/// Version of the report layout
pub const SCHEMA_VERSION: u32 = 1;

/// Complete comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub runs: Vec<RunSummary>,
    pub ranking: Vec<RankEntry>,
    /// External indices ranked on other metrics
    pub metric_rankings: Vec<MetricRanking>,
    /// External index of the best run; `null` in JSON when no run qualifies,
    /// where a `-1` index might be expected
    pub best_run: Option<u32>,
    pub time_to_reach: Option<TimeToReach>,
    pub error_at_time: Option<ErrorAtTime>,
    pub bounds: Option<ErrorBounds>,
    pub crossover: Option<Crossover>,
    pub sweep: Option<SpeedupSweep>,
}

impl Report {
    /// Report with run summaries and ranking only; analyses are added by the
    /// caller.
    pub fn new(meta: ReportMeta, runs: &RunCollection) -> Self {
        let kind = meta.metric;
        Self {
            meta,
            runs: run_summaries(runs, kind),
            ranking: rank_entries(runs, kind),
            metric_rankings: Vec::new(),
            best_run: None,
            time_to_reach: None,
            error_at_time: None,
            bounds: None,
            crossover: None,
            sweep: None,
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub base_dir: String,
    pub metric: MetricKind,
    pub max_iterations: Option<usize>,
}

impl ReportMeta {
    /// Metadata stamped with the current UTC time
    pub fn new(
        base_dir: impl Into<String>,
        metric: MetricKind,
        max_iterations: Option<usize>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            base_dir: base_dir.into(),
            metric,
            max_iterations,
        }
    }
}

/// One line per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub index: u32,
    pub label: String,
    pub color: String,
    pub samples: usize,
    pub initial_error: Option<f64>,
    pub final_error: Option<f64>,
    /// Seconds
    pub total_time: Option<f64>,
}

impl RunSummary {
    /// Summary of `run` on `kind`
    pub fn from_run(run: &RunRecord, kind: MetricKind) -> Self {
        Self {
            index: run.index(),
            label: run.label().to_string(),
            color: run.color().to_hex(),
            samples: run.sample_count(),
            initial_error: run.initial_error(kind),
            final_error: run.final_error(kind),
            total_time: run.total_time(),
        }
    }
}

/// Position of a run in the final-error ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    /// 1-based rank
    pub rank: usize,
    /// Collection position
    pub position: usize,
    pub index: u32,
    pub label: String,
    pub final_error: Option<f64>,
}

/// External indices ordered by final error on one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRanking {
    pub metric: MetricKind,
    pub indices: Vec<u32>,
}

impl MetricRanking {
    /// Rank `runs` on `metric`
    pub fn new(runs: &RunCollection, metric: MetricKind) -> Self {
        Self {
            metric,
            indices: rank_by_final_error(runs, metric)
                .into_iter()
                .map(|position| runs[position].index())
                .collect(),
        }
    }
}

/// Error of every run at a given processing time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorAtTime {
    /// Seconds
    pub time: f64,
    /// One value per run, `-1` when the run ended before `time`
    pub errors: Vec<f64>,
}

/// Summaries of every run, in collection order
pub fn run_summaries(runs: &RunCollection, kind: MetricKind) -> Vec<RunSummary> {
    runs.iter().map(|r| RunSummary::from_run(r, kind)).collect()
}

/// Runs ordered by final error, best first
pub fn rank_entries(runs: &RunCollection, kind: MetricKind) -> Vec<RankEntry> {
    rank_by_final_error(runs, kind)
        .into_iter()
        .enumerate()
        .map(|(rank, position)| {
            let run = &runs[position];
            RankEntry {
                rank: rank + 1,
                position,
                index: run.index(),
                label: run.label().to_string(),
                final_error: run.final_error(kind),
            }
        })
        .collect()
}
