#![warn(missing_docs)]
//! ConvBench Comparative Analysis
//!
//! Cross-run statistics over a read-only [`RunCollection`]:
//! - Time to reach a target error, and speedups against a reference run
//! - Error at a given processing time
//! - Initial/final error bounds
//! - Best run and ranking by final error
//! - Leader changes between two runs
//! - Speedup sweep over a range of target errors
//!
//! Lookups are exact-sample: no interpolation between sample positions.
//! Outcomes that are expected in batch comparisons ("never reached", "no
//! sample past that time") are reported with the [`NOT_REACHED`] sentinel
//! instead of an error.
//!
//! [`RunCollection`]: convbench_core::RunCollection

mod bounds;
mod crossover;
mod error;
mod ranking;
mod reach;
mod sweep;

pub use bounds::{ErrorBounds, error_bounds, maximal_initial_error, minimal_final_error};
pub use crossover::{Crossover, LeaderChange, leader_changes};
pub use error::AnalysisError;
pub use ranking::{best_run, rank_by_final_error};
pub use reach::{TimeToReach, error_at_time, time_to_reach};
pub use sweep::{SpeedupSweep, SweepConfig, speedup_sweep};

/// Sentinel for "threshold never reached" and "no sample past the given time"
pub const NOT_REACHED: f64 = -1.0;

/// Default number of target errors probed by a speedup sweep
pub const DEFAULT_SWEEP_STEPS: usize = 1000;

#[cfg(test)]
pub(crate) mod fixtures {
    use convbench_core::{RunCollection, RunRecord};

    /// Run whose three loaded metrics all equal `errors`; `times_ms` are raw
    /// milliseconds.
    pub fn run(index: u32, errors: &[f64], times_ms: &[f64]) -> RunRecord {
        RunRecord::from_series(
            index,
            None,
            errors.to_vec().into(),
            errors.to_vec().into(),
            errors.to_vec().into(),
            times_ms.to_vec().into(),
        )
        .unwrap()
    }

    pub fn collection(runs: Vec<RunRecord>) -> RunCollection {
        RunCollection::from_runs(runs)
    }
}
