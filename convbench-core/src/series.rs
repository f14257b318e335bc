//! Series Loading
//!
//! A series is one line of whitespace-separated numbers written by the
//! renderer's statistics dumper. Only the first line of a source is read;
//! tokens that do not parse as `f64` (stray labels, separators) are skipped.

use crate::error::LoadError;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::Path;

/// Immutable sequence of samples indexed by sample position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series(Vec<f64>);

impl Series {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Samples as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Copy of the samples, for handing to a renderer
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.clone()
    }

    /// Keep at most the first `len` samples.
    pub(crate) fn truncated(mut self, len: usize) -> Self {
        self.0.truncate(len);
        self
    }

    /// Elementwise map into a new series.
    pub(crate) fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self(self.0.iter().map(|&v| f(v)).collect())
    }
}

impl Deref for Series {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromIterator<f64> for Series {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse the first line of `text` into a series.
///
/// Returns `None` when the line holds no numeric token.
pub fn parse_series(text: &str) -> Option<Series> {
    let first_line = text.lines().next()?;
    let values: Vec<f64> = first_line
        .split_whitespace()
        .filter_map(|token| token.parse::<f64>().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(Series(values))
    }
}

/// Read a series from `path`.
///
/// Every call re-reads the file.
pub fn load_series(path: impl AsRef<Path>) -> Result<Series, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_series(&text).ok_or_else(|| LoadError::ParseFailure {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_non_numeric_tokens() {
        let series = parse_series("0.5 nrmse 0.25  x 0.125\n").unwrap();
        assert_eq!(series.as_slice(), &[0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_parse_reads_first_line_only() {
        let series = parse_series("1 2 3\n4 5 6\n").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[2], 3.0);
    }

    #[test]
    fn test_parse_no_numbers() {
        assert!(parse_series("").is_none());
        assert!(parse_series("rmse values missing\n1 2 3").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_series(dir.path().join("000.rmseFloat")).unwrap_err();
        assert!(matches!(err, LoadError::SourceNotFound { .. }));
        assert!(err.is_absent());
    }

    #[test]
    fn test_load_empty_file_is_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("000.rmseFloat");
        std::fs::File::create(&path).unwrap();

        let err = load_series(&path).unwrap_err();
        assert!(matches!(err, LoadError::ParseFailure { .. }));
    }

    #[test]
    fn test_load_rereads_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("000.rmseFloat");
        std::fs::write(&path, "1 2").unwrap();
        assert_eq!(load_series(&path).unwrap().len(), 2);

        let mut file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.write_all(b"1 2 3").unwrap();
        drop(file);
        assert_eq!(load_series(&path).unwrap().len(), 3);
    }
}
