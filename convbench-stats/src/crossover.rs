//! Leader Changes
//!
//! Walks two runs sample by sample and records every position where the
//! trailing run drops strictly below the current leader.

use convbench_core::{MetricKind, RunRecord};
use serde::{Deserialize, Serialize};

/// One change of lead between two runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderChange {
    /// Sample position at which the new leader took over
    pub position: usize,
    /// External index of the new leader
    pub leader: u32,
    /// Leader's processing time at `position`, in seconds
    pub leader_time: f64,
    /// Trailing run's processing time at `position`, in seconds
    pub trailer_time: f64,
}

/// Result of comparing two runs sample by sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crossover {
    /// Metric compared
    pub metric: MetricKind,
    /// Number of positions scanned after the initial one
    pub compared_positions: usize,
    /// Leader at position 0 first, then every change in position order
    pub changes: Vec<LeaderChange>,
}

impl Crossover {
    /// Leader after the last scanned position
    pub fn final_leader(&self) -> Option<u32> {
        self.changes.last().map(|c| c.leader)
    }
}

/// Compare `first` and `second` on `kind`.
///
/// The leader at position 0 is `first` if its error is strictly smaller,
/// otherwise `second`. Positions `0..limit` are scanned, with `limit` the
/// shorter run's last position, capped by `max_iterations`.
pub fn leader_changes(
    first: &RunRecord,
    second: &RunRecord,
    kind: MetricKind,
    max_iterations: Option<usize>,
) -> Crossover {
    let pair = [first, second];
    let errors = [first.error_values(kind), second.error_values(kind)];
    let times = [first.processing_times(), second.processing_times()];

    let limit = errors
        .iter()
        .map(|e| e.len().saturating_sub(1))
        .chain(max_iterations)
        .min()
        .unwrap_or(0);

    let change = |position: usize, leader: usize| LeaderChange {
        position,
        leader: pair[leader].index(),
        leader_time: times[leader].get(position).copied().unwrap_or(f64::NAN),
        trailer_time: times[1 - leader].get(position).copied().unwrap_or(f64::NAN),
    };

    let mut changes = Vec::new();
    let mut leader = match (errors[0].first(), errors[1].first()) {
        (Some(a), Some(b)) if a < b => 0,
        (Some(_), Some(_)) => 1,
        _ => {
            return Crossover {
                metric: kind,
                compared_positions: 0,
                changes,
            };
        }
    };
    changes.push(change(0, leader));

    for i in 0..limit {
        let trailer = 1 - leader;
        if errors[trailer][i] < errors[leader][i] {
            leader = trailer;
            changes.push(change(i, leader));
        }
    }

    Crossover {
        metric: kind,
        compared_positions: limit,
        changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::run;

    #[test]
    fn test_single_crossing() {
        let a = run(3, &[0.4, 0.3, 0.2, 0.1], &[1000.0, 2000.0, 3000.0, 4000.0]);
        let b = run(8, &[0.5, 0.2, 0.1, 0.05], &[500.0, 1500.0, 2500.0, 3500.0]);

        let result = leader_changes(&a, &b, MetricKind::Rmse, None);
        assert_eq!(result.compared_positions, 3);
        assert_eq!(result.changes.len(), 2);

        assert_eq!(result.changes[0].position, 0);
        assert_eq!(result.changes[0].leader, 3);
        assert!((result.changes[0].leader_time - 1.0).abs() < 1e-12);
        assert!((result.changes[0].trailer_time - 0.5).abs() < 1e-12);

        assert_eq!(result.changes[1].position, 1);
        assert_eq!(result.changes[1].leader, 8);
        assert!((result.changes[1].leader_time - 1.5).abs() < 1e-12);
        assert_eq!(result.final_leader(), Some(8));
    }

    #[test]
    fn test_tie_at_start_favors_second() {
        let a = run(0, &[0.5, 0.5], &[1.0, 2.0]);
        let b = run(1, &[0.5, 0.5], &[1.0, 2.0]);

        let result = leader_changes(&a, &b, MetricKind::Mae, None);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.final_leader(), Some(1));
    }

    #[test]
    fn test_limit_uses_shorter_run_and_cap() {
        let a = run(0, &[0.9, 0.8, 0.1, 0.05, 0.01], &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = run(1, &[0.5, 0.4, 0.3, 0.2], &[1.0, 2.0, 3.0, 4.0]);

        let full = leader_changes(&a, &b, MetricKind::Mae, None);
        assert_eq!(full.compared_positions, 3);
        assert_eq!(full.final_leader(), Some(0));

        // position 2 is where `a` overtakes; a cap of 2 never scans it
        let capped = leader_changes(&a, &b, MetricKind::Mae, Some(2));
        assert_eq!(capped.compared_positions, 2);
        assert_eq!(capped.final_leader(), Some(1));
    }

    #[test]
    fn test_single_sample_runs() {
        let a = run(0, &[0.1], &[1.0]);
        let b = run(1, &[0.2], &[1.0]);

        let result = leader_changes(&a, &b, MetricKind::Nrmse, None);
        assert_eq!(result.compared_positions, 0);
        assert_eq!(result.final_leader(), Some(0));
    }
}
