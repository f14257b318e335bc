#![warn(missing_docs)]
//! ConvBench Core - Series and Run Records
//!
//! This crate turns the statistics files dumped by an iterative renderer into
//! typed, immutable run records:
//! - `Series` loading from whitespace-separated text
//! - `RunRecord` with per-metric accessors and single-run derived curves
//! - `RunCollection` discovery (probe until the first absent run) or
//!   explicit selection
//! - Deterministic per-run plot colors

mod collection;
mod color;
mod error;
mod metric;
mod record;
mod series;

pub use collection::{LoaderConfig, RunCollection, load_all, load_selected};
pub use color::{Rgb, run_color};
pub use error::{LoadError, SeriesName, UnknownMetric};
pub use metric::MetricKind;
pub use record::{PROCESSING_TIMES_EXTENSION, RunRecord, TIME_DIVISOR, run_stem};
pub use series::{Series, load_series, parse_series};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!((TIME_DIVISOR - 1000.0).abs() < f64::EPSILON);
        assert_eq!(run_stem(7), "007");
        assert_eq!(run_stem(1234), "1234");
    }
}
