// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band = mean of the window, upper/lower = middle ± k·σ where σ is the
// population standard deviation (divisor N).

use serde::Serialize;

/// Result of a Bollinger Band calculation, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands over the whole `window`.
///
/// Returns `None` for an empty window.
pub fn bollinger_bands(window: &[f64], num_std: f64) -> Option<BollingerBands> {
    if window.is_empty() {
        return None;
    }

    let n = window.len() as f64;
    let middle = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    Some(BollingerBands {
        upper: middle + num_std * std_dev,
        middle,
        lower: middle - num_std * std_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bollinger_population_variance() {
        // 1..=20: mean 10.5, population variance (n² - 1) / 12 = 33.25
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = bollinger_bands(&closes, 2.0).unwrap();
        let sd = 33.25_f64.sqrt();
        assert!((bb.middle - 10.5).abs() < 1e-12);
        assert!((bb.upper - (10.5 + 2.0 * sd)).abs() < 1e-9);
        assert!((bb.lower - (10.5 - 2.0 * sd)).abs() < 1e-9);
    }

    #[test]
    fn bollinger_flat_collapses() {
        let bb = bollinger_bands(&[100.0; 20], 2.0).unwrap();
        assert_eq!(bb.upper, 100.0);
        assert_eq!(bb.middle, 100.0);
        assert_eq!(bb.lower, 100.0);
    }

    #[test]
    fn bollinger_empty_window() {
        assert!(bollinger_bands(&[], 2.0).is_none());
    }

    proptest! {
        #[test]
        fn bands_bracket_the_mean(closes in prop::collection::vec(1.0..1000.0_f64, 1..40)) {
            let bb = bollinger_bands(&closes, 2.0).unwrap();
            prop_assert!(bb.lower <= bb.middle + 1e-9);
            prop_assert!(bb.middle <= bb.upper + 1e-9);
        }
    }
}
