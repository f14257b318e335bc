//! Error Metric Kinds

use crate::error::UnknownMetric;
use serde::{Deserialize, Serialize};

/// Error measure recorded per sample position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Normalized root mean square error
    Nrmse,
    /// Root mean square error
    Rmse,
    /// Mean square error, always derived as `rmse²`
    Mse,
    /// Mean absolute error
    Mae,
}

impl MetricKind {
    /// All metric kinds, in reporting order
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Mae,
        MetricKind::Mse,
        MetricKind::Rmse,
        MetricKind::Nrmse,
    ];

    /// Short lowercase name, as accepted by [`str::parse`]
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Nrmse => "nrmse",
            MetricKind::Rmse => "rmse",
            MetricKind::Mse => "mse",
            MetricKind::Mae => "mae",
        }
    }

    /// Axis label used on error plots
    pub fn axis_label(self) -> &'static str {
        match self {
            MetricKind::Nrmse => "NRMSE",
            MetricKind::Rmse => "RMSE",
            MetricKind::Mse => "L2 error",
            MetricKind::Mae => "L1 error",
        }
    }

    /// File extension of the source this metric is loaded from.
    ///
    /// `None` for derived metrics.
    pub fn file_extension(self) -> Option<&'static str> {
        match self {
            MetricKind::Nrmse => Some("nrmseFloat"),
            MetricKind::Rmse => Some("rmseFloat"),
            MetricKind::Mae => Some("absErrorFloat"),
            MetricKind::Mse => None,
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for MetricKind {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nrmse" => Ok(MetricKind::Nrmse),
            "rmse" => Ok(MetricKind::Rmse),
            "mse" => Ok(MetricKind::Mse),
            "mae" => Ok(MetricKind::Mae),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.name().parse::<MetricKind>().unwrap(), kind);
        }
        assert_eq!("MAE".parse::<MetricKind>().unwrap(), MetricKind::Mae);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "psnr".parse::<MetricKind>().unwrap_err();
        assert_eq!(err, UnknownMetric("psnr".to_string()));
    }

    #[test]
    fn test_only_mse_is_derived() {
        assert!(MetricKind::Mse.file_extension().is_none());
        assert_eq!(MetricKind::Mae.file_extension(), Some("absErrorFloat"));
        assert_eq!(MetricKind::Mse.axis_label(), "L2 error");
    }
}
