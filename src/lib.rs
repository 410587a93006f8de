// ============================================================================
// Decimal Series Library
// Exact decimal vectors and time series with built-in statistics
// ============================================================================

//! # Decimal Series
//!
//! Exact (non-floating-point) decimal containers for financial and
//! scientific work where binary rounding error is unacceptable.
//!
//! ## Features
//!
//! - **ExactDecimal** values with a fixed significant-digit precision
//! - **DecimalVector** with sequence algebra and descriptive/inferential
//!   statistics (moments, variance, covariance, sums of squares)
//! - **TimeSeries** keyed by Unix timestamp with a lazily restored chronology
//!   and interval inference
//! - **DualSeriesIterator** aligning two series by shared timestamp with
//!   bounded lookahead and lookbehind
//!
//! ## Example
//!
//! ```rust
//! use decimal_series::prelude::*;
//!
//! let prices = DecimalVector::from_integers([1, 2, 3, 4]);
//! assert_eq!(prices.mean().unwrap(), "2.5".parse().unwrap());
//!
//! let mut spot = TimeSeries::new();
//! let mut futures = TimeSeries::new();
//! for (t, s, f) in [(60, 100, 101), (0, 99, 100)] {
//!     spot.set(t, ExactDecimal::from_integer(s)).unwrap();
//!     futures.set(t, ExactDecimal::from_integer(f)).unwrap();
//! }
//!
//! // Basis at every shared timestamp, in chronological order
//! let basis: Vec<_> = spot
//!     .dual_iter(&futures)
//!     .map(|pair| pair.diff().unwrap())
//!     .collect();
//! assert_eq!(basis, vec![ExactDecimal::ONE, ExactDecimal::ONE]);
//! ```

pub mod domain;
pub mod errors;
pub mod interfaces;
pub mod numeric;
pub mod series;
pub mod utils;
pub mod vector;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{DatedDecimalPair, DecimalConfig, DecimalPair, IngestMode};
    pub use crate::errors::{ErrorKind, SeriesError, SeriesResult};
    pub use crate::interfaces::IntoTimestamp;
    pub use crate::numeric::{ExactDecimal, NumericError, NumericResult};
    pub use crate::series::{
        DualSeriesIterator, SeriesIterator, SeriesKey, SeriesKeyMode, TimeSeries,
    };
    pub use crate::vector::{DecimalVector, MeanSource};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use chrono::{DateTime, TimeDelta};

    fn d(s: &str) -> ExactDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_end_to_end_statistics() {
        let v = DecimalVector::from_integers([1, 2, 3, 4]);
        assert_eq!(v.mean().unwrap(), d("2.5"));

        let var = v.var().unwrap();
        assert_eq!(var, d("1.666666666666666666666666667"));
        assert_eq!(v.stdev().unwrap(), var.sqrt().unwrap());
        assert_eq!(v.central_moment(2, true).unwrap(), var);
    }

    #[test]
    fn test_series_values_feed_statistics() {
        let config = DecimalConfig::strict(12);
        let series = TimeSeries::try_from_raw(
            [
                ("2024-01-03T00:00:00Z", "103.5"),
                ("2024-01-01T00:00:00Z", "100"),
                ("2024-01-02T00:00:00Z", "101"),
            ],
            &config,
        )
        .unwrap();

        let values = series.values();
        assert_eq!(values.to_vec(), vec![d("100"), d("101"), d("103.5")]);
        assert_eq!(values.delta().unwrap().to_vec(), vec![d("1"), d("2.5")]);
        assert_eq!(values.rdelta().unwrap()[0], d("0.01"));
        assert_eq!(series.min_date_interval(), Some(TimeDelta::days(1)));
        assert_eq!(series.date_period().unwrap().len(), 3);
    }

    #[test]
    fn test_dual_iteration_over_sparse_series() {
        let t1 = DateTime::from_timestamp(1_704_067_200, 0).unwrap();
        let t2 = t1 + TimeDelta::hours(1);
        let t3 = t2 + TimeDelta::hours(1);

        let mut x = TimeSeries::new();
        let mut y = TimeSeries::new();
        for (t, v) in [(t1, 1), (t2, 2), (t3, 3)] {
            x.set(t, ExactDecimal::from_integer(v)).unwrap();
        }
        for (t, v) in [(t1, 10), (t3, 30)] {
            y.set(t, ExactDecimal::from_integer(v)).unwrap();
        }

        let mut iter = x.dual_iter(&y);
        let walked: Vec<DatedDecimalPair> = iter.by_ref().collect();
        assert_eq!(walked.len(), 1);
        assert_eq!(walked[0].instant, t1);
        assert_eq!(walked[0].pair, DecimalPair::new(d("1"), d("10")));
        assert!(!iter.valid());

        assert_eq!(iter.peek(-1).unwrap().instant, t3);
        let relative: Vec<ExactDecimal> = iter
            .aligned()
            .iter()
            .map(|p| p.pair.ratio().unwrap())
            .collect();
        assert_eq!(relative, vec![d("10"), d("10")]);
    }

    #[test]
    fn test_vectors_from_two_series_correlate() {
        let mut a = TimeSeries::new();
        let mut b = TimeSeries::new();
        for t in 0..6_i64 {
            a.set(t * 60, ExactDecimal::from_integer(t)).unwrap();
            b.set(t * 60, ExactDecimal::from_integer(3 * t + 1)).unwrap();
        }
        let x = a.values();
        let y = b.values();
        let r = x.correl(&y).unwrap();
        assert!(r.checked_sub(ExactDecimal::ONE).unwrap().abs() < d("0.000000001"));
        assert_eq!(
            x.diff(&y.slice(..3).unwrap()).unwrap_err().kind(),
            ErrorKind::LengthMismatch
        );
    }
}
