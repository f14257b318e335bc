//! Run Selection
//!
//! Decides which runs a command works on.
//!
//! - Explicit indices (with optional labels) load exactly those runs
//! - Otherwise every run is discovered from `000` upwards
//! - A regex on labels then narrows the collection, keeping its order

use convbench_core::{LoadError, LoaderConfig, RunCollection, load_all, load_selected};
use regex::Regex;

/// Which runs to load
#[derive(Debug, Clone, Default)]
pub struct RunSelection {
    /// External indices; empty means discover every run
    pub indices: Vec<u32>,
    /// One label per index, or empty to use padded indices
    pub labels: Vec<String>,
    /// Keep only runs whose label matches
    pub filter: Option<Regex>,
}

/// Load the runs described by `selection`
pub fn select_runs(
    selection: &RunSelection,
    loader: &LoaderConfig,
) -> Result<RunCollection, LoadError> {
    let runs = if selection.indices.is_empty() {
        load_all(loader)?
    } else if selection.labels.is_empty() {
        let labels = vec![""; selection.indices.len()];
        load_selected(&selection.indices, &labels, loader)?
    } else {
        load_selected(&selection.indices, &selection.labels, loader)?
    };

    let runs = match &selection.filter {
        Some(re) => {
            let before = runs.len();
            let kept = runs.filtered(|r| re.is_match(r.label()));
            tracing::debug!(pattern = %re, before, after = kept.len(), "label filter applied");
            kept
        }
        None => runs,
    };

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_run(dir: &Path, index: u32) {
        let stem = format!("{:03}", index);
        for ext in ["nrmseFloat", "rmseFloat", "absErrorFloat"] {
            std::fs::write(dir.join(format!("{stem}.{ext}")), "0.5 0.25").unwrap();
        }
        std::fs::write(dir.join(format!("{stem}.processingTimes")), "100 200").unwrap();
    }

    fn populated(count: u32) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for index in 0..count {
            write_run(dir.path(), index);
        }
        dir
    }

    #[test]
    fn test_discovers_without_indices() {
        let dir = populated(3);
        let runs = select_runs(&RunSelection::default(), &LoaderConfig::new(dir.path())).unwrap();
        assert_eq!(runs.indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_explicit_indices_default_labels() {
        let dir = populated(3);
        let selection = RunSelection {
            indices: vec![2, 1],
            ..RunSelection::default()
        };
        let runs = select_runs(&selection, &LoaderConfig::new(dir.path())).unwrap();
        assert_eq!(runs.indices(), vec![2, 1]);
        assert_eq!(runs[0].label(), "002");
    }

    #[test]
    fn test_label_filter_keeps_order() {
        let dir = populated(3);
        let selection = RunSelection {
            indices: vec![0, 1, 2],
            labels: vec!["BPT".into(), "SkelBPT".into(), "ICBPT".into()],
            filter: Some(Regex::new("^(BPT|ICBPT)$").unwrap()),
        };
        let runs = select_runs(&selection, &LoaderConfig::new(dir.path())).unwrap();
        assert_eq!(runs.indices(), vec![0, 2]);
    }

    #[test]
    fn test_label_count_mismatch() {
        let dir = populated(2);
        let selection = RunSelection {
            indices: vec![0, 1],
            labels: vec!["BPT".into()],
            filter: None,
        };
        let err = select_runs(&selection, &LoaderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, LoadError::LabelCountMismatch { .. }));
    }
}
