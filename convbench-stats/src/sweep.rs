//! Speedup Sweep
//!
//! Probes `steps` target errors evenly spaced downwards from the collection's
//! maximal initial error and keeps the one where a candidate run gains the
//! most over the reference run.

use crate::DEFAULT_SWEEP_STEPS;
use crate::bounds::{ErrorBounds, error_bounds};
use crate::error::AnalysisError;
use crate::reach::time_to_reach;
use convbench_core::{MetricKind, RunCollection};
use serde::{Deserialize, Serialize};

/// Sweep parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of target errors probed
    pub steps: usize,
    /// Collection position speedups are measured against
    pub reference: usize,
    /// Collection position whose speedup is maximized
    pub candidate: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_SWEEP_STEPS,
            reference: 0,
            candidate: 1,
        }
    }
}

/// Target error with the best candidate speedup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedupSweep {
    /// Metric swept
    pub metric: MetricKind,
    /// Target error at the best step
    pub target_error: f64,
    /// Step number of the best target, 0 being the maximal initial error
    pub step: usize,
    /// Range the targets were drawn from
    pub bounds: ErrorBounds,
    /// Time to reach `target_error` for every run
    pub times: Vec<f64>,
    /// Speedups against the reference for every run
    pub speedups: Vec<f64>,
    /// Candidate speedup at the best step
    pub best_speedup: f64,
}

/// Sweep target errors and keep the one where the candidate's speedup over
/// the reference is strictly greatest.
///
/// Targets where either the reference or the candidate never reaches the
/// threshold are skipped. Returns `Ok(None)` when no target yields a
/// positive speedup.
///
/// # Errors
/// - [`AnalysisError::EmptyCollection`] for an empty collection
/// - [`AnalysisError::ZeroSteps`] when `config.steps` is 0
/// - [`AnalysisError::CandidateOutOfRange`] /
///   [`AnalysisError::ReferenceOutOfRange`] for invalid positions
pub fn speedup_sweep(
    runs: &RunCollection,
    kind: MetricKind,
    config: &SweepConfig,
) -> Result<Option<SpeedupSweep>, AnalysisError> {
    if config.steps == 0 {
        return Err(AnalysisError::ZeroSteps);
    }
    let bounds = error_bounds(runs, kind).ok_or(AnalysisError::EmptyCollection)?;
    if config.candidate >= runs.len() {
        return Err(AnalysisError::CandidateOutOfRange {
            candidate: config.candidate,
            len: runs.len(),
        });
    }

    let delta = bounds.span() / config.steps as f64;
    let mut best: Option<SpeedupSweep> = None;
    let mut best_speedup = 0.0;

    for step in 0..config.steps {
        let target_error = bounds.maximal_initial - step as f64 * delta;
        let reach = time_to_reach(runs, kind, target_error, config.reference)?;

        if !reach.speedup_is_valid(config.candidate) {
            continue;
        }
        let speedup = reach.speedups[config.candidate];
        if speedup > best_speedup {
            best_speedup = speedup;
            best = Some(SpeedupSweep {
                metric: kind,
                target_error,
                step,
                bounds,
                times: reach.times,
                speedups: reach.speedups,
                best_speedup: speedup,
            });
        }
    }

    tracing::debug!(
        steps = config.steps,
        best_step = best.as_ref().map(|b| b.step),
        "speedup sweep done"
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NOT_REACHED;
    use crate::fixtures::{collection, run};

    fn baseline_and_fast() -> RunCollection {
        collection(vec![
            run(0, &[1.0, 0.5, 0.25, 0.2], &[1000.0, 2000.0, 3000.0, 4000.0]),
            run(1, &[1.0, 0.5, 0.25, 0.2], &[1000.0, 1000.0, 1000.0, 1000.0]),
        ])
    }

    #[test]
    fn test_sweep_finds_best_target() {
        let config = SweepConfig {
            steps: 4,
            ..SweepConfig::default()
        };
        let sweep = speedup_sweep(&baseline_and_fast(), MetricKind::Mae, &config)
            .unwrap()
            .unwrap();

        // bounds: initial max 1.0, "minimal" final 0.2, delta 0.2
        assert!((sweep.bounds.span() - 0.8).abs() < 1e-12);
        // targets 1.0, 0.8, 0.6, 0.4; run 0 reaches 0.4 at 3s, run 1 at 1s
        assert_eq!(sweep.step, 3);
        assert!((sweep.target_error - 0.4).abs() < 1e-12);
        assert!((sweep.best_speedup - 3.0).abs() < 1e-12);
        assert_eq!(sweep.times, vec![3.0, 1.0]);
    }

    #[test]
    fn test_sweep_skips_unreached_targets() {
        let runs = collection(vec![
            run(0, &[1.0, 0.9], &[1000.0, 2000.0]),
            run(1, &[1.0, 1.0], &[1000.0, 2000.0]),
        ]);
        let config = SweepConfig {
            steps: 2,
            ..SweepConfig::default()
        };
        // every target is 1.0: run 0 reaches it, the candidate never does
        let reach = time_to_reach(&runs, MetricKind::Mae, 1.0, 0).unwrap();
        assert_eq!(reach.times, vec![2.0, NOT_REACHED]);

        assert!(speedup_sweep(&runs, MetricKind::Mae, &config).unwrap().is_none());
    }

    #[test]
    fn test_sweep_errors() {
        let runs = baseline_and_fast();
        let zero = SweepConfig {
            steps: 0,
            ..SweepConfig::default()
        };
        assert_eq!(
            speedup_sweep(&runs, MetricKind::Mae, &zero).unwrap_err(),
            AnalysisError::ZeroSteps
        );

        let bad_candidate = SweepConfig {
            candidate: 2,
            ..SweepConfig::default()
        };
        assert_eq!(
            speedup_sweep(&runs, MetricKind::Mae, &bad_candidate).unwrap_err(),
            AnalysisError::CandidateOutOfRange {
                candidate: 2,
                len: 2
            }
        );

        assert_eq!(
            speedup_sweep(&RunCollection::default(), MetricKind::Mae, &SweepConfig::default())
                .unwrap_err(),
            AnalysisError::EmptyCollection
        );
    }
}
