// =============================================================================
// Disparity Index
// =============================================================================
//
//   disparity = price / SMA20 * 100
//
// 100 means the price sits exactly on its moving average; above 105 is
// treated as overheated, below 95 as approaching a low.

use super::round_to;

/// Disparity of `price` against `moving_average`, rounded to two decimals.
///
/// Returns `None` when the average is zero or the ratio is non-finite.
pub fn calculate_disparity(price: f64, moving_average: f64) -> Option<f64> {
    if moving_average == 0.0 {
        return None;
    }
    let ratio = price / moving_average * 100.0;
    ratio.is_finite().then(|| round_to(ratio, 2))
}
