//! Run Records
//!
//! A run record holds every series recorded for one execution of the method
//! under study: three loaded error metrics, the derived MSE, and processing
//! times converted to seconds. All series share the same sample-position
//! axis, which is checked once at construction.

use crate::collection::LoaderConfig;
use crate::color::{Rgb, run_color};
use crate::error::{LoadError, SeriesName};
use crate::metric::MetricKind;
use crate::series::{Series, load_series};
use std::path::PathBuf;

/// Raw processing times are milliseconds; records store seconds.
pub const TIME_DIVISOR: f64 = 1000.0;

/// File extension of the processing-time source
pub const PROCESSING_TIMES_EXTENSION: &str = "processingTimes";

/// Zero-padded file stem for a run index (`7` → `"007"`)
pub fn run_stem(index: u32) -> String {
    format!("{:03}", index)
}

/// All series recorded for a single run
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    index: u32,
    label: String,
    nrmse: Series,
    rmse: Series,
    mse: Series,
    mae: Series,
    processing_times: Series,
}

impl RunRecord {
    /// Build a record from already loaded series.
    ///
    /// `processing_times_ms` are raw milliseconds. MSE is derived from RMSE.
    /// An empty or unset label falls back to the zero-padded index.
    pub fn from_series(
        index: u32,
        label: Option<&str>,
        nrmse: Series,
        rmse: Series,
        mae: Series,
        processing_times_ms: Series,
    ) -> Result<Self, LoadError> {
        let expected = processing_times_ms.len();
        if expected == 0 {
            return Err(LoadError::EmptyRun { index });
        }

        for (kind, series) in [
            (MetricKind::Nrmse, &nrmse),
            (MetricKind::Rmse, &rmse),
            (MetricKind::Mae, &mae),
        ] {
            if series.len() != expected {
                return Err(LoadError::LengthMismatch {
                    index,
                    series: SeriesName::Metric(kind),
                    expected,
                    actual: series.len(),
                });
            }
        }

        let label = match label {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => run_stem(index),
        };

        Ok(Self {
            index,
            label,
            mse: rmse.map(|v| v * v),
            nrmse,
            rmse,
            mae,
            processing_times: processing_times_ms.map(|t| t / TIME_DIVISOR),
        })
    }

    /// Load the run `index` from the directory in `config`.
    pub fn load(index: u32, label: Option<&str>, config: &LoaderConfig) -> Result<Self, LoadError> {
        let read = |extension: &str| -> Result<Series, LoadError> {
            let series = load_series(source_path(config, index, extension))?;
            Ok(match config.max_iterations {
                Some(n) => series.truncated(n.saturating_add(1)),
                None => series,
            })
        };

        let nrmse = read(extension_of(MetricKind::Nrmse))?;
        let rmse = read(extension_of(MetricKind::Rmse))?;
        let mae = read(extension_of(MetricKind::Mae))?;
        let times = read(PROCESSING_TIMES_EXTENSION)?;

        let record = Self::from_series(index, label, nrmse, rmse, mae, times)?;
        tracing::debug!(
            index,
            label = %record.label,
            samples = record.sample_count(),
            "loaded run"
        );
        Ok(record)
    }

    /// Same record under another label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// External run index
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Plot color derived from the index
    pub fn color(&self) -> Rgb {
        run_color(self.index)
    }

    /// Number of sample positions shared by all series
    pub fn sample_count(&self) -> usize {
        self.processing_times.len()
    }

    /// Processing times in seconds
    pub fn processing_times(&self) -> &Series {
        &self.processing_times
    }

    /// Stored or derived series for `kind`
    pub fn error_values(&self, kind: MetricKind) -> &Series {
        match kind {
            MetricKind::Nrmse => &self.nrmse,
            MetricKind::Rmse => &self.rmse,
            MetricKind::Mse => &self.mse,
            MetricKind::Mae => &self.mae,
        }
    }

    /// Error at sample position 0
    pub fn initial_error(&self, kind: MetricKind) -> Option<f64> {
        self.error_values(kind).first().copied()
    }

    /// Error at the last sample position
    pub fn final_error(&self, kind: MetricKind) -> Option<f64> {
        self.error_values(kind).last().copied()
    }

    /// Processing time at the last sample position
    pub fn total_time(&self) -> Option<f64> {
        self.processing_times.last().copied()
    }

    /// `(time, error)` pairs sharing sample positions
    pub fn error_curve_over_time(&self, kind: MetricKind) -> (&Series, &Series) {
        (&self.processing_times, self.error_values(kind))
    }

    /// `(position, error)` pairs, positions `0..n`
    pub fn error_curve_over_iterations(&self, kind: MetricKind) -> (Series, &Series) {
        let errors = self.error_values(kind);
        let positions = (0..errors.len()).map(|i| i as f64).collect();
        (positions, errors)
    }

    /// Elementwise `1 / (error * time)`.
    ///
    /// A zero product yields a non-finite value (`inf`, or `NaN` for `0/0`
    /// inputs) at that position; it is kept, not dropped, so positions stay
    /// aligned with the other series.
    pub fn efficiency_curve(&self, kind: MetricKind) -> Series {
        self.error_values(kind)
            .iter()
            .zip(self.processing_times.iter())
            .map(|(&e, &t)| 1.0 / (e * t))
            .collect()
    }

    /// First differences of the error, each divided by the successor's
    /// timestamp: `(error[i + 1] - error[i]) / time[i + 1]`.
    ///
    /// Length is `n - 1`. The divisor is the absolute time of the later
    /// sample, not the time delta.
    pub fn error_derivative(&self, kind: MetricKind) -> Series {
        let errors = self.error_values(kind);
        errors
            .windows(2)
            .zip(self.processing_times.iter().skip(1))
            .map(|(pair, &t)| (pair[1] - pair[0]) / t)
            .collect()
    }
}

fn extension_of(kind: MetricKind) -> &'static str {
    // Only called for loaded metrics.
    kind.file_extension().unwrap_or_default()
}

fn source_path(config: &LoaderConfig, index: u32, extension: &str) -> PathBuf {
    config
        .base_dir
        .join(format!("{}.{}", run_stem(index), extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(errors: Vec<f64>, times_ms: Vec<f64>) -> RunRecord {
        RunRecord::from_series(
            0,
            None,
            errors.clone().into(),
            errors.clone().into(),
            errors.into(),
            times_ms.into(),
        )
        .unwrap()
    }

    #[test]
    fn test_mse_is_rmse_squared() {
        let r = RunRecord::from_series(
            3,
            None,
            vec![0.9, 0.8, 0.7].into(),
            vec![0.5, 0.3, 0.1].into(),
            vec![0.2, 0.1, 0.05].into(),
            vec![10.0, 20.0, 30.0].into(),
        )
        .unwrap();

        let rmse = r.error_values(MetricKind::Rmse);
        let mse = r.error_values(MetricKind::Mse);
        for i in 0..rmse.len() {
            assert_eq!(mse[i], rmse[i] * rmse[i]);
        }
    }

    #[test]
    fn test_times_scaled_to_seconds() {
        let r = record(vec![1.0, 0.5], vec![500.0, 2000.0]);
        assert_eq!(r.processing_times().as_slice(), &[0.5, 2.0]);
        assert_eq!(r.total_time(), Some(2.0));
    }

    #[test]
    fn test_default_label_is_padded_index() {
        let r = RunRecord::from_series(
            7,
            Some(""),
            vec![1.0].into(),
            vec![1.0].into(),
            vec![1.0].into(),
            vec![1.0].into(),
        )
        .unwrap();
        assert_eq!(r.label(), "007");
        assert_eq!(r.clone().with_label("BPT").label(), "BPT");
        assert_eq!(r.index(), 7);
    }

    #[test]
    fn test_length_mismatch() {
        let err = RunRecord::from_series(
            2,
            None,
            vec![1.0, 0.5].into(),
            vec![1.0, 0.5, 0.25].into(),
            vec![1.0, 0.5].into(),
            vec![1.0, 2.0].into(),
        )
        .unwrap_err();

        match err {
            LoadError::LengthMismatch {
                index,
                series,
                expected,
                actual,
            } => {
                assert_eq!(index, 2);
                assert_eq!(series, SeriesName::Metric(MetricKind::Rmse));
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_run_rejected() {
        let err = RunRecord::from_series(
            1,
            None,
            Series::default(),
            Series::default(),
            Series::default(),
            Series::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::EmptyRun { index: 1 }));
        assert!(!err.is_absent());
    }

    #[test]
    fn test_error_derivative_uses_successor_time() {
        // Times given in ms so the stored seconds are [0, 2, 6].
        let r = record(vec![1.0, 0.5, 0.25], vec![0.0, 2000.0, 6000.0]);
        let d = r.error_derivative(MetricKind::Mae);

        assert_eq!(d.len(), 2);
        assert!((d[0] - (-0.25)).abs() < 1e-12);
        assert!((d[1] - (-0.25 / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_error_derivative_single_sample() {
        let r = record(vec![1.0], vec![1.0]);
        assert!(r.error_derivative(MetricKind::Mae).is_empty());
    }

    #[test]
    fn test_efficiency_curve() {
        let r = record(vec![0.5, 0.25], vec![1000.0, 4000.0]);
        let eff = r.efficiency_curve(MetricKind::Mae);
        assert!((eff[0] - 2.0).abs() < 1e-12);
        assert!((eff[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_efficiency_zero_product_propagates() {
        let r = record(vec![0.5, 0.0], vec![0.0, 1000.0]);
        let eff = r.efficiency_curve(MetricKind::Mae);
        assert_eq!(eff.len(), 2);
        assert!(eff[0].is_infinite());
        assert!(eff[1].is_infinite());
    }

    #[test]
    fn test_curves() {
        let r = record(vec![0.3, 0.2, 0.1], vec![100.0, 200.0, 300.0]);

        let (times, errors) = r.error_curve_over_time(MetricKind::Rmse);
        assert_eq!(times.as_slice(), &[0.1, 0.2, 0.3]);
        assert_eq!(errors.as_slice(), &[0.3, 0.2, 0.1]);

        let (positions, errors) = r.error_curve_over_iterations(MetricKind::Rmse);
        assert_eq!(positions.as_slice(), &[0.0, 1.0, 2.0]);
        assert_eq!(errors.len(), 3);

        assert_eq!(r.initial_error(MetricKind::Nrmse), Some(0.3));
        assert_eq!(r.final_error(MetricKind::Nrmse), Some(0.1));
    }
}
