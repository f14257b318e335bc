//! Run Collections
//!
//! Runs are discovered by probing indices `000`, `001`, … until the first
//! absent run, or loaded from an explicit list of indices and labels.
//!
//! ```text
//! 000.*  001.*  002.*  (003 missing)  004.*
//!  ok     ok     ok     stop           never probed
//! ```

use crate::error::LoadError;
use crate::metric::MetricKind;
use crate::record::RunRecord;
use std::path::PathBuf;

/// Where and how runs are loaded from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory holding the `NNN.<ext>` sources
    pub base_dir: PathBuf,
    /// Keep only the first `n + 1` samples of every series
    pub max_iterations: Option<usize>,
}

impl LoaderConfig {
    /// Loader reading every sample from `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_iterations: None,
        }
    }

    /// Limit every series to `max_iterations + 1` samples
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Ordered set of runs.
///
/// Position 0 is the default reference for speedups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunCollection {
    runs: Vec<RunRecord>,
}

impl RunCollection {
    /// Wrap already built records, keeping their order
    pub fn from_runs(runs: Vec<RunRecord>) -> Self {
        Self { runs }
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the collection holds no run
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Run at collection position `position`
    pub fn get(&self, position: usize) -> Option<&RunRecord> {
        self.runs.get(position)
    }

    /// Run with external index `index`
    pub fn find_index(&self, index: u32) -> Option<&RunRecord> {
        self.runs.iter().find(|r| r.index() == index)
    }

    /// Runs in collection order
    pub fn iter(&self) -> std::slice::Iter<'_, RunRecord> {
        self.runs.iter()
    }

    /// Runs as a slice
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// External indices in collection order
    pub fn indices(&self) -> Vec<u32> {
        self.runs.iter().map(|r| r.index()).collect()
    }

    /// New collection holding copies of the runs at `positions`, in that order.
    ///
    /// Returns `None` if any position is out of range.
    pub fn subset(&self, positions: &[usize]) -> Option<Self> {
        positions
            .iter()
            .map(|&p| self.runs.get(p).cloned())
            .collect::<Option<Vec<_>>>()
            .map(Self::from_runs)
    }

    /// Keep the runs matching `keep`, preserving order
    pub fn filtered(self, keep: impl Fn(&RunRecord) -> bool) -> Self {
        Self {
            runs: self.runs.into_iter().filter(|r| keep(r)).collect(),
        }
    }

    /// Smallest sample count among the runs
    pub fn min_sample_count(&self) -> Option<usize> {
        self.runs.iter().map(|r| r.sample_count()).min()
    }

    /// Final sample of `kind` for every run, in collection order
    pub fn final_errors(&self, kind: MetricKind) -> Vec<Option<f64>> {
        self.runs.iter().map(|r| r.final_error(kind)).collect()
    }
}

impl<'a> IntoIterator for &'a RunCollection {
    type Item = &'a RunRecord;
    type IntoIter = std::slice::Iter<'a, RunRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

impl std::ops::Index<usize> for RunCollection {
    type Output = RunRecord;

    fn index(&self, position: usize) -> &RunRecord {
        &self.runs[position]
    }
}

/// Load runs `000`, `001`, … until the first absent one.
///
/// An absent run ends discovery and is not reported. Any other failure
/// (unreadable file, series of unequal length) is returned.
pub fn load_all(config: &LoaderConfig) -> Result<RunCollection, LoadError> {
    let mut runs = Vec::new();

    for index in 0u32.. {
        match RunRecord::load(index, None, config) {
            Ok(record) => runs.push(record),
            Err(e) if e.is_absent() => {
                tracing::debug!(index, reason = %e, "run absent, discovery stops");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        runs = runs.len(),
        base_dir = %config.base_dir.display(),
        "discovered runs"
    );
    Ok(RunCollection::from_runs(runs))
}

/// Load exactly `indices` with matching `labels`, in the given order.
///
/// Every listed run must exist. Empty labels fall back to the padded index.
pub fn load_selected<S: AsRef<str>>(
    indices: &[u32],
    labels: &[S],
    config: &LoaderConfig,
) -> Result<RunCollection, LoadError> {
    if indices.len() != labels.len() {
        return Err(LoadError::LabelCountMismatch {
            indices: indices.len(),
            labels: labels.len(),
        });
    }

    let runs = indices
        .iter()
        .zip(labels)
        .map(|(&index, label)| RunRecord::load(index, Some(label.as_ref()), config))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RunCollection::from_runs(runs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_run(dir: &Path, index: u32, errors: &str, times: &str) {
        let stem = format!("{:03}", index);
        for ext in ["nrmseFloat", "rmseFloat", "absErrorFloat"] {
            std::fs::write(dir.join(format!("{stem}.{ext}")), errors).unwrap();
        }
        std::fs::write(dir.join(format!("{stem}.processingTimes")), times).unwrap();
    }

    #[test]
    fn test_load_all_stops_at_first_absent() {
        let dir = tempfile::tempdir().unwrap();
        for index in [0, 1, 2, 4] {
            write_run(dir.path(), index, "0.5 0.25", "100 200");
        }

        let runs = load_all(&LoaderConfig::new(dir.path())).unwrap();
        assert_eq!(runs.indices(), vec![0, 1, 2]);
        assert_eq!(runs[1].label(), "001");
    }

    #[test]
    fn test_load_all_incomplete_run_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), 0, "0.5", "100");
        std::fs::write(dir.path().join("001.rmseFloat"), "0.5").unwrap();

        let runs = load_all(&LoaderConfig::new(dir.path())).unwrap();
        assert_eq!(runs.len(), 1);
    }

    #[test]
    fn test_load_all_unparseable_run_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), 0, "0.5 0.25", "100 200");
        write_run(dir.path(), 1, "0.5 0.25", "n/a");
        write_run(dir.path(), 2, "0.5 0.25", "100 200");

        let err = RunRecord::load(1, None, &LoaderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, LoadError::ParseFailure { .. }));
        assert!(err.is_absent());

        let runs = load_all(&LoaderConfig::new(dir.path())).unwrap();
        assert_eq!(runs.indices(), vec![0]);
    }

    #[test]
    fn test_load_all_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let runs = load_all(&LoaderConfig::new(dir.path())).unwrap();
        assert!(runs.is_empty());
    }

    #[test]
    fn test_load_all_propagates_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), 0, "0.5 0.25", "100 200");
        write_run(dir.path(), 1, "0.5 0.25 0.1", "100 200");

        let err = load_all(&LoaderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, LoadError::LengthMismatch { index: 1, .. }));
    }

    #[test]
    fn test_max_iterations_truncates() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), 0, "0.5 0.25 0.1 0.05", "100 200 300 400");

        let config = LoaderConfig::new(dir.path()).with_max_iterations(Some(1));
        let runs = load_all(&config).unwrap();
        assert_eq!(runs[0].sample_count(), 2);
        assert_eq!(runs[0].final_error(MetricKind::Mae), Some(0.25));
    }

    #[test]
    fn test_load_selected() {
        let dir = tempfile::tempdir().unwrap();
        for index in 0..3 {
            write_run(dir.path(), index, "0.5", "100");
        }

        let config = LoaderConfig::new(dir.path());
        let runs = load_selected(&[2, 0], &["SkelBPT", "BPT"], &config).unwrap();
        assert_eq!(runs.indices(), vec![2, 0]);
        assert_eq!(runs[0].label(), "SkelBPT");
        assert_eq!(runs[1].label(), "BPT");
    }

    #[test]
    fn test_load_selected_label_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_selected(&[0, 1], &["a"], &LoaderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            LoadError::LabelCountMismatch {
                indices: 2,
                labels: 1
            }
        ));
    }

    #[test]
    fn test_load_selected_missing_run_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), 0, "0.5", "100");

        let err = load_selected(&[0, 5], &["", ""], &LoaderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, LoadError::SourceNotFound { .. }));
    }

    #[test]
    fn test_subset_and_filter() {
        let dir = tempfile::tempdir().unwrap();
        for index in 0..3 {
            write_run(dir.path(), index, "0.5", "100");
        }
        let runs = load_all(&LoaderConfig::new(dir.path())).unwrap();

        let sub = runs.subset(&[2, 0]).unwrap();
        assert_eq!(sub.indices(), vec![2, 0]);
        assert!(runs.subset(&[3]).is_none());

        let odd = runs.clone().filtered(|r| r.index() % 2 == 1);
        assert_eq!(odd.indices(), vec![1]);
        assert!(runs.find_index(2).is_some());
    }
}
