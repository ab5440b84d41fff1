// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_0      = close_0
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The recursion is seeded with the first value (not an SMA of the first
// `period` values) and runs over the whole input, so the output has exactly
// one element per input element.  No bias-adjustment term is applied.
// =============================================================================

/// Compute the EMA series for `values` with span `period`.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - empty input => empty vec
/// - A non-finite intermediate value truncates the series at that point.
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.is_empty() {
        return Vec::new();
    }

    let multiplier = 2.0 / (period + 1) as f64;

    let mut result = Vec::with_capacity(values.len());
    let mut prev_ema = values[0];
    if !prev_ema.is_finite() {
        return result;
    }
    result.push(prev_ema);

    for &value in &values[1..] {
        let ema = value * multiplier + prev_ema * (1.0 - multiplier);
        if !ema.is_finite() {
            break;
        }
        result.push(ema);
        prev_ema = ema;
    }

    result
}
