//! Ranking by Final Error

use convbench_core::{MetricKind, RunCollection};
use std::cmp::Ordering;

/// External index of the run with the strictly smallest final `kind` sample.
///
/// Ties keep the first run seen; a NaN final never wins. Returns `None` for an
/// empty collection, or when no final sample is below `f64::MAX`. Reports
/// serialize `None` as `null` where a plain `-1` index might be expected.
pub fn best_run(runs: &RunCollection, kind: MetricKind) -> Option<u32> {
    let mut best_error = f64::MAX;
    let mut best = None;

    for (run, error) in runs.iter().zip(runs.final_errors(kind)) {
        if let Some(error) = error {
            if error < best_error {
                best_error = error;
                best = Some(run.index());
            }
        }
    }

    best
}

/// Collection positions sorted by final `kind` sample, ascending.
///
/// The sort is stable: runs with equal final errors keep collection order.
/// Runs without samples follow every finite final, and NaN finals come last.
pub fn rank_by_final_error(runs: &RunCollection, kind: MetricKind) -> Vec<usize> {
    let finals: Vec<f64> = runs
        .final_errors(kind)
        .into_iter()
        .map(|e| e.unwrap_or(f64::INFINITY))
        .collect();

    let mut positions: Vec<usize> = (0..finals.len()).collect();
    // NaN is split off first so the remaining comparison is a total order
    positions.sort_by(|&a, &b| {
        let (x, y) = (finals[a], finals[b]);
        x.is_nan()
            .cmp(&y.is_nan())
            .then_with(|| x.partial_cmp(&y).unwrap_or(Ordering::Equal))
    });
    positions
}
