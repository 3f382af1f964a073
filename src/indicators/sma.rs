// =============================================================================
// Simple Moving Average & display rounding
// =============================================================================

/// Arithmetic mean of `window`.
///
/// An empty window yields NaN; the engine never calls this with one.
pub fn average(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Round to two decimal places (the engine's output precision).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a price or indicator value the way reports show it.
pub fn format_price(value: f64) -> String {
    format!("{value:.2}")
}
