// =============================================================================
// Stochastic Oscillator (%K 14 / %D 3)
// =============================================================================
//
//   %K = (close - lowest_low) / (highest_high - lowest_low) * 100
//
// over the trailing `k_period` bars, for the latest bar only.
//
// %D here is the SMA of the last `d_period` *closes*, not of %K.  It is a
// price level rather than an oscillator value; downstream consumers only
// display it.

use crate::market_data::Bar;

use super::moving_average::calculate_sma;

pub const K_PERIOD: usize = 14;
pub const D_PERIOD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticResult {
    pub percent_k: f64,
    pub percent_d: f64,
}

/// Compute %K / %D for the latest bar.
///
/// A flat range (`highest_high == lowest_low`) yields `%K = 0` instead of a
/// division by zero; a flat market is a normal condition, not a data fault.
///
/// Returns `None` when fewer than `max(k_period, d_period)` bars are given or
/// either period is zero.
pub fn calculate_stochastic(bars: &[Bar], k_period: usize, d_period: usize) -> Option<StochasticResult> {
    if k_period == 0 || d_period == 0 || bars.len() < k_period.max(d_period) {
        return None;
    }

    let window = &bars[bars.len() - k_period..];
    let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let close = bars[bars.len() - 1].close;

    let range = highest - lowest;
    let percent_k = if range == 0.0 {
        0.0
    } else {
        (close - lowest) / range * 100.0
    };

    let closes: Vec<f64> = bars[bars.len() - d_period..].iter().map(|b| b.close).collect();
    let percent_d = calculate_sma(&closes, d_period)?;

    percent_k.is_finite().then_some(StochasticResult { percent_k, percent_d })
}
