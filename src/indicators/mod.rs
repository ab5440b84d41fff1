// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the fixed indicator set used by
// the daily screener.  Every public function returns `Option<T>` so callers
// are forced to handle insufficient-data and numerical-edge-case scenarios.
//
// All inputs are ordered oldest-first.

pub mod bollinger;
pub mod candle_pattern;
pub mod disparity;
pub mod ema;
pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod stochastic;

/// Round `value` to `decimals` places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
