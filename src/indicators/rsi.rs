// =============================================================================
// Relative Strength Index (RSI) — rolling-mean variant
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Over the trailing `period` deltas:
//            avg_gain = mean(max(delta, 0))
//            avg_loss = mean(max(-delta, 0))
// Step 3 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// This is a plain rolling mean, not Wilder's smoothing.  The screener's
// thresholds were tuned against this variant, so it is reproduced as-is.
//
// Thresholds:  RSI > 70 => overbought,  RSI < 30 => oversold.
// =============================================================================

use super::round_to;

/// RSI of the latest close over the trailing `period` deltas, rounded to two
/// decimal places.
///
/// # Edge cases
/// - `period == 0` => `None`
/// - `closes.len() < period + 1` => `None` (need `period` deltas)
/// - Only gains (average loss zero) => 100.0
/// - No movement at all => 50.0
pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let window = &closes[closes.len() - period - 1..];
    let (sum_gain, sum_loss) = window.windows(2).map(|w| w[1] - w[0]).fold(
        (0.0_f64, 0.0_f64),
        |(g, l), d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l + d.abs())
            }
        },
    );

    let period_f = period as f64;
    let rsi = rsi_from_averages(sum_gain / period_f, sum_loss / period_f)?;
    Some(round_to(rsi, 2))
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    let rsi = if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    rsi.is_finite().then_some(rsi)
}
