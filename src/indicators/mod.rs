// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator math. The engine turns a closing-price
// window into the `IndicatorSet` consumed by the advisory classifier; the
// primitives below it never allocate state across calls.

pub mod bollinger;
pub mod engine;
pub mod rsi;
pub mod sma;

pub use engine::{compute_indicators, IndicatorError, IndicatorSet, PriceSeries};
