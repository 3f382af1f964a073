// =============================================================================
// Indicator Engine — closing prices in, IndicatorSet out
// =============================================================================
//
// The engine always works on the most recent `WINDOW` closes:
//
//   ma5     = mean of the last 5 closes
//   ma20    = mean of the last 20 closes
//   rsi14   = cumulative RSI over every delta in the window
//   upper   = mean + 2σ,  lower = mean - 2σ  (population σ)
//
// Internal math is full precision; every field of the returned set is rounded
// to two decimals. A series shorter than the window is rejected before any
// computation starts.
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bollinger::bollinger_bands;
use super::rsi::cumulative_rsi;
use super::sma::{average, round2};

/// Number of closes the engine needs (and uses).
pub const WINDOW: usize = 20;
/// Short moving-average length.
pub const SHORT_WINDOW: usize = 5;
/// Bollinger band half-width in standard deviations.
pub const BAND_STD: f64 = 2.0;

/// The only error the engine raises.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("insufficient price history: need {required} closes, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

/// Chronological (oldest first) closing prices.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries(Vec<f64>);

impl PriceSeries {
    pub fn from_closes(closes: Vec<f64>) -> Self {
        Self(closes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Most recent close, if any.
    pub fn latest(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// The trailing `n` closes (all of them when the series is shorter).
    pub fn recent(&self, n: usize) -> &[f64] {
        &self.0[self.0.len().saturating_sub(n)..]
    }
}

/// Indicator values, each rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub ma5: f64,
    pub ma20: f64,
    pub rsi14: f64,
    pub boll_upper: f64,
    pub boll_lower: f64,
}

/// Derive the indicator set for `series`.
///
/// Fails with [`IndicatorError::InsufficientData`] when fewer than
/// [`WINDOW`] closes are available.
pub fn compute_indicators(series: &PriceSeries) -> Result<IndicatorSet, IndicatorError> {
    if series.len() < WINDOW {
        return Err(IndicatorError::InsufficientData {
            required: WINDOW,
            actual: series.len(),
        });
    }

    let window = series.recent(WINDOW);
    let ma5 = average(&window[WINDOW - SHORT_WINDOW..]);
    let ma20 = average(window);
    let rsi14 = cumulative_rsi(window);
    let (upper, lower) = match bollinger_bands(window, BAND_STD) {
        Some(bb) => (bb.upper, bb.lower),
        None => (f64::NAN, f64::NAN),
    };

    Ok(IndicatorSet {
        ma5: round2(ma5),
        ma20: round2(ma20),
        rsi14: round2(rsi14),
        boll_upper: round2(upper),
        boll_lower: round2(lower),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(closes: impl IntoIterator<Item = f64>) -> PriceSeries {
        PriceSeries::from_closes(closes.into_iter().collect())
    }

    #[test]
    fn nineteen_closes_rejected() {
        let err = compute_indicators(&series((1..=19).map(|x| x as f64))).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                required: 20,
                actual: 19
            }
        );
        assert!(err.to_string().contains("need 20"));
    }

    #[test]
    fn twenty_closes_accepted() {
        assert!(compute_indicators(&series((1..=20).map(|x| x as f64))).is_ok());
    }

    #[test]
    fn empty_series_rejected() {
        assert!(compute_indicators(&series(Vec::new())).is_err());
    }

    #[test]
    fn rising_series_values() {
        let ind = compute_indicators(&series((1..=20).map(|x| x as f64))).unwrap();
        assert_eq!(ind.ma5, 18.0);
        assert_eq!(ind.ma20, 10.5);
        assert_eq!(ind.rsi14, 100.0);
        assert_eq!(ind.boll_upper, 22.03);
        assert_eq!(ind.boll_lower, -1.03);
    }

    #[test]
    fn falling_series_rsi_zero() {
        let ind = compute_indicators(&series((1..=20).rev().map(|x| x as f64))).unwrap();
        assert_eq!(ind.rsi14, 0.0);
    }

    #[test]
    fn constant_series_bands_collapse() {
        let ind = compute_indicators(&series(vec![88.8; 20])).unwrap();
        assert_eq!(ind.boll_upper, ind.boll_lower);
        assert_eq!(ind.boll_upper, ind.ma20);
        assert_eq!(ind.ma20, 88.8);
    }

    #[test]
    fn longer_series_uses_trailing_window() {
        let mut closes: Vec<f64> = vec![1_000.0; 15];
        closes.extend((1..=20).map(|x| x as f64));
        let long = compute_indicators(&series(closes)).unwrap();
        let exact = compute_indicators(&series((1..=20).map(|x| x as f64))).unwrap();
        assert_eq!(long, exact);
    }

    #[test]
    fn recent_and_latest() {
        let s = series([1.0, 2.0, 3.0]);
        assert_eq!(s.recent(2), &[2.0, 3.0]);
        assert_eq!(s.recent(10), &[1.0, 2.0, 3.0]);
        assert_eq!(s.latest(), Some(3.0));
        assert_eq!(series(Vec::new()).latest(), None);
    }

    #[test]
    fn outputs_are_rounded() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64 * 0.737).sin() * 3.333).collect();
        let ind = compute_indicators(&series(closes)).unwrap();
        for v in [ind.ma5, ind.ma20, ind.rsi14, ind.boll_upper, ind.boll_lower] {
            assert_eq!(round2(v), v);
        }
    }

    proptest! {
        #[test]
        fn same_input_same_bits(closes in prop::collection::vec(10.0..900.0_f64, 20..40)) {
            let s = PriceSeries::from_closes(closes);
            let a = compute_indicators(&s).unwrap();
            let b = compute_indicators(&s).unwrap();
            prop_assert_eq!(a.ma5.to_bits(), b.ma5.to_bits());
            prop_assert_eq!(a.ma20.to_bits(), b.ma20.to_bits());
            prop_assert_eq!(a.rsi14.to_bits(), b.rsi14.to_bits());
            prop_assert_eq!(a.boll_upper.to_bits(), b.boll_upper.to_bits());
            prop_assert_eq!(a.boll_lower.to_bits(), b.boll_lower.to_bits());
        }

        #[test]
        fn upper_band_never_below_lower(closes in prop::collection::vec(10.0..900.0_f64, 20..40)) {
            let ind = compute_indicators(&PriceSeries::from_closes(closes)).unwrap();
            prop_assert!(ind.boll_upper >= ind.boll_lower);
            prop_assert!((0.0..=100.0).contains(&ind.rsi14));
        }
    }
}
