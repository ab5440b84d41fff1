// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Unweighted mean of the trailing `period` values.  The screener uses SMA-5
// (short-term breakout line) and SMA-20 (Bollinger middle band, disparity
// base), plus SMA-3 of closes for the stochastic %D line.

/// Mean of the last `period` values.
///
/// Returns `None` when `period == 0`, the input is shorter than `period`, or
/// the mean is non-finite.
pub fn calculate_sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let window = &values[values.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;

    mean.is_finite().then_some(mean)
}
