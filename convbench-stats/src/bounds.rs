//! Error Bounds
//!
//! Worst starting error and the "minimal" final error of a set of runs,
//! used to pick the range of target errors for a speedup sweep.
//!
//! `minimal_final_error` reduces the final samples with a MAXIMUM, matching
//! the sweeps already computed for existing result sets.

use convbench_core::{MetricKind, RunCollection};
use serde::{Deserialize, Serialize};

/// Bounds of the error range covered by a collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorBounds {
    /// Largest first sample over all runs
    pub maximal_initial: f64,
    /// Largest last sample over all runs
    pub minimal_final: f64,
}

impl ErrorBounds {
    /// Absolute width of the range
    pub fn span(&self) -> f64 {
        (self.maximal_initial - self.minimal_final).abs()
    }
}

/// Running maximum that only replaces the current value when strictly greater.
fn first_max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.fold(None, |best, v| match best {
        Some(b) if v > b => Some(v),
        None => Some(v),
        kept => kept,
    })
}

/// Largest first sample of `kind` over all runs; `None` for an empty collection
pub fn maximal_initial_error(runs: &RunCollection, kind: MetricKind) -> Option<f64> {
    first_max(runs.iter().filter_map(|r| r.initial_error(kind)))
}

/// Largest LAST sample of `kind` over all runs; `None` for an empty collection.
///
/// Despite the name this is a maximum, not a minimum.
pub fn minimal_final_error(runs: &RunCollection, kind: MetricKind) -> Option<f64> {
    first_max(runs.iter().filter_map(|r| r.final_error(kind)))
}

/// Both bounds at once
pub fn error_bounds(runs: &RunCollection, kind: MetricKind) -> Option<ErrorBounds> {
    Some(ErrorBounds {
        maximal_initial: maximal_initial_error(runs, kind)?,
        minimal_final: minimal_final_error(runs, kind)?,
    })
}
