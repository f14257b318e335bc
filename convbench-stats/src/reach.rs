//! Time-to-Reach and Error-at-Time
//!
//! Both lookups scan a run's samples in stored order and stop at the first
//! qualifying position. Error series are not assumed to be monotonic.

use crate::NOT_REACHED;
use crate::error::AnalysisError;
use convbench_core::{MetricKind, RunCollection, RunRecord};
use serde::{Deserialize, Serialize};

/// Time each run needs to drop below a target error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeToReach {
    /// Metric the threshold applies to
    pub metric: MetricKind,
    /// Threshold; a sample reaches it when strictly smaller
    pub target_error: f64,
    /// Collection position of the reference run
    pub reference: usize,
    /// Seconds per run, [`NOT_REACHED`] when never reached
    pub times: Vec<f64>,
    /// `times[reference] / times[i]`.
    ///
    /// Computed for every run, including sentinels; the value is
    /// meaningless unless both times were reached.
    pub speedups: Vec<f64>,
}

impl TimeToReach {
    /// Whether the run at `position` reached the target
    pub fn reached(&self, position: usize) -> bool {
        self.times.get(position).is_some_and(|&t| t != NOT_REACHED)
    }

    /// Whether the speedup at `position` compares two reached times
    pub fn speedup_is_valid(&self, position: usize) -> bool {
        self.reached(position) && self.reached(self.reference)
    }
}

/// Processing time at the first sample of `run` strictly below `target_error`
fn first_time_below(run: &RunRecord, kind: MetricKind, target_error: f64) -> f64 {
    let errors = run.error_values(kind);
    errors
        .iter()
        .position(|&e| e < target_error)
        .and_then(|i| run.processing_times().get(i).copied())
        .unwrap_or(NOT_REACHED)
}

/// Time for every run to reach `target_error`, and speedups against the run
/// at collection position `reference`.
///
/// # Errors
/// [`AnalysisError::ReferenceOutOfRange`] if the collection is not empty and
/// `reference` is not a valid position.
pub fn time_to_reach(
    runs: &RunCollection,
    kind: MetricKind,
    target_error: f64,
    reference: usize,
) -> Result<TimeToReach, AnalysisError> {
    let times: Vec<f64> = runs
        .iter()
        .map(|run| first_time_below(run, kind, target_error))
        .collect();

    let speedups = if times.is_empty() {
        Vec::new()
    } else {
        let reference_time = *times
            .get(reference)
            .ok_or(AnalysisError::ReferenceOutOfRange {
                reference,
                len: times.len(),
            })?;
        times.iter().map(|&t| reference_time / t).collect()
    };

    Ok(TimeToReach {
        metric: kind,
        target_error,
        reference,
        times,
        speedups,
    })
}

/// Error of every run at the first sample whose processing time is strictly
/// greater than `time` (seconds); [`NOT_REACHED`] when no sample is.
pub fn error_at_time(runs: &RunCollection, kind: MetricKind, time: f64) -> Vec<f64> {
    runs.iter()
        .map(|run| {
            run.processing_times()
                .iter()
                .position(|&t| t > time)
                .and_then(|i| run.error_values(kind).get(i).copied())
                .unwrap_or(NOT_REACHED)
        })
        .collect()
}
