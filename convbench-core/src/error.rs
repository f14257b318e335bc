//! Load Errors

use crate::metric::MetricKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading series, run records and collections
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Series source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("No numeric samples in {}", path.display())]
    ParseFailure { path: PathBuf },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Run {index:03} has no samples")]
    EmptyRun { index: u32 },

    #[error("Run {index:03}: {series} has {actual} samples, expected {expected}")]
    LengthMismatch {
        index: u32,
        series: SeriesName,
        expected: usize,
        actual: usize,
    },

    #[error("{indices} run indices but {labels} labels")]
    LabelCountMismatch { indices: usize, labels: usize },
}

impl LoadError {
    /// Whether this error means the run simply does not exist (yet).
    ///
    /// Missing sources and sources without a single number (a run whose
    /// statistics were never flushed) both count as absent. Everything else
    /// is a real failure.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            LoadError::SourceNotFound { .. } | LoadError::ParseFailure { .. }
        )
    }
}

/// Which series of a run a length check refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesName {
    /// An error metric series
    Metric(MetricKind),
    /// The processing-time series
    ProcessingTimes,
}

impl std::fmt::Display for SeriesName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesName::Metric(kind) => write!(f, "{}", kind),
            SeriesName::ProcessingTimes => write!(f, "processing times"),
        }
    }
}

/// Metric name outside the closed set {nrmse, rmse, mse, mae}
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown metric kind: '{0}' (expected nrmse, rmse, mse or mae)")]
pub struct UnknownMetric(pub String);
