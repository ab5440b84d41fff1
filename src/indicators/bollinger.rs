// =============================================================================
// Bollinger Bands (20, 2σ)
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ).  σ is the *sample* standard deviation
// (n - 1 denominator) of the window.

use crate::types::BollPosition;

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerResult {
    /// Classify `price` against the envelope.  Touching a band counts as
    /// inside it.
    pub fn position(&self, price: f64) -> BollPosition {
        if price > self.upper {
            BollPosition::AboveUpper
        } else if price < self.lower {
            BollPosition::BelowLower
        } else {
            BollPosition::Mid
        }
    }
}

/// Calculate Bollinger Bands over the last `period` closes.
///
/// Returns `None` when:
/// - `period < 2` (sample deviation undefined).
/// - Fewer than `period` data points.
/// - Any band is non-finite.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> Option<BollingerResult> {
    if period < 2 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let middle = window.iter().sum::<f64>() / period as f64;

    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / (period - 1) as f64;
    let std_dev = variance.sqrt();

    let upper = middle + num_std * std_dev;
    let lower = middle - num_std * std_dev;

    if upper.is_finite() && lower.is_finite() {
        Some(BollingerResult { upper, middle, lower })
    } else {
        None
    }
}
