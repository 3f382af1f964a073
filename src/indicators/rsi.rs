// =============================================================================
// Relative Strength Index (RSI) — cumulative window form
// =============================================================================
//
// Unlike Wilder's smoothed RSI, this variant sums every day-over-day delta in
// the window it is given:
//
//   gains  = Σ positive deltas
//   losses = Σ |negative deltas|
//   RS     = gains / losses      (a zero loss sum is replaced by 1)
//   RSI    = 100 - 100 / (1 + RS), clamped to [0, 100]
//
// A window with gains and no losses saturates at 100. A flat window has no
// gains, so the substituted denominator drives RSI to 0.
//
// Thresholds:  RSI > 70 => overbought,  RSI < 30 => oversold.
// =============================================================================

pub const OVERBOUGHT: f64 = 70.0;
pub const OVERSOLD: f64 = 30.0;

/// Compute the RSI of the whole `closes` window.
///
/// Fewer than two closes produce no deltas and therefore 0.0. NaN closes
/// propagate to a NaN result. Gains with zero losses return 100 directly so a
/// strictly rising window saturates instead of stopping at the value the
/// substituted denominator would give.
pub fn cumulative_rsi(closes: &[f64]) -> f64 {
    let (gains, losses) = closes
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0_f64, 0.0_f64), |(g, l), d| {
            if d >= 0.0 {
                (g + d, l)
            } else {
                (g, l - d)
            }
        });

    if losses == 0.0 && gains > 0.0 {
        return 100.0;
    }

    let denominator = if losses == 0.0 { 1.0 } else { losses };
    let rs = gains / denominator;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rsi_strictly_rising_is_100() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        assert_eq!(cumulative_rsi(&closes), 100.0);
    }

    #[test]
    fn rsi_small_steps_rising_is_100() {
        let closes: Vec<f64> = (0..20).map(|x| 50.0 + x as f64 * 0.01).collect();
        assert_eq!(cumulative_rsi(&closes), 100.0);
    }

    #[test]
    fn rsi_strictly_falling_is_0() {
        let closes: Vec<f64> = (1..=20).rev().map(|x| x as f64).collect();
        assert_eq!(cumulative_rsi(&closes), 0.0);
    }

    #[test]
    fn rsi_flat_window_is_0() {
        assert_eq!(cumulative_rsi(&[100.0; 20]), 0.0);
    }

    #[test]
    fn rsi_mixed_window() {
        // gains = 2 + 3 = 5, losses = 1 + 4 = 5 => RS = 1 => RSI = 50
        let closes = [10.0, 12.0, 11.0, 14.0, 10.0];
        assert!((cumulative_rsi(&closes) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn rsi_uses_every_delta() {
        // gains = 3, losses = 1 => RS = 3 => RSI = 75
        let closes = [10.0, 11.0, 12.0, 11.0, 12.0];
        assert!((cumulative_rsi(&closes) - 75.0).abs() < 1e-12);
    }

    #[test]
    fn rsi_too_short_is_0() {
        assert_eq!(cumulative_rsi(&[]), 0.0);
        assert_eq!(cumulative_rsi(&[42.0]), 0.0);
    }

    #[test]
    fn rsi_nan_propagates() {
        assert!(cumulative_rsi(&[1.0, f64::NAN, 2.0]).is_nan());
    }

    proptest! {
        #[test]
        fn rsi_always_within_bounds(closes in prop::collection::vec(1.0..1000.0_f64, 2..60)) {
            let rsi = cumulative_rsi(&closes);
            prop_assert!((0.0..=100.0).contains(&rsi), "RSI {} out of range", rsi);
        }
    }
}
