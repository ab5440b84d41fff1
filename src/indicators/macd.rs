// =============================================================================
// MACD (12 / 26 / 9)
// =============================================================================
//
//   macd_t   = EMA12_t - EMA26_t
//   signal_t = EMA9(macd)_t
//
// All three EMAs are first-value seeded and span the full close series, so
// the latest value depends on every bar supplied, not just the last 26.

use super::ema::calculate_ema;
use super::round_to;

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SIGNAL_PERIOD: usize = 9;

/// Latest MACD reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdResult {
    /// MACD line, rounded to two decimals.
    pub macd: f64,
    /// Signal line, rounded to two decimals.
    pub signal: f64,
    /// MACD above its signal line (compared on the rounded values).
    pub golden: bool,
}

/// Compute the latest MACD reading for `closes`.
///
/// Returns `None` on empty input or when any EMA stage truncates on a
/// non-finite value.
pub fn calculate_macd(closes: &[f64]) -> Option<MacdResult> {
    let fast = calculate_ema(closes, FAST_PERIOD);
    let slow = calculate_ema(closes, SLOW_PERIOD);
    if fast.is_empty() || fast.len() != closes.len() || slow.len() != closes.len() {
        return None;
    }

    let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_series = calculate_ema(&line, SIGNAL_PERIOD);
    if signal_series.len() != line.len() {
        return None;
    }

    let macd = round_to(*line.last()?, 2);
    let signal = round_to(*signal_series.last()?, 2);

    Some(MacdResult {
        macd,
        signal,
        golden: macd > signal,
    })
}
