// =============================================================================
// Single-candle pattern classifier
// =============================================================================
//
// Hammer:          bullish body, lower shadow more than twice the body.
// Inverted hammer: bearish body, upper reach (high - close) more than twice
//                  the body.
//
// Both comparisons are strict; exact ties classify as neutral.

use crate::market_data::Bar;
use crate::types::CandlePattern;

pub fn classify_candle(bar: &Bar) -> CandlePattern {
    let (open, close, high, low) = (bar.open, bar.close, bar.high, bar.low);

    if close > open && (open - low) > 2.0 * (close - open) {
        CandlePattern::Hammer
    } else if open > close && (high - close) > 2.0 * (open - close) {
        CandlePattern::InvertedHammer
    } else {
        CandlePattern::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn long_lower_shadow_on_up_day_is_hammer() {
        assert_eq!(classify_candle(&candle(100.0, 102.0, 95.0, 102.0)), CandlePattern::Hammer);
    }

    #[test]
    fn long_upper_reach_on_down_day_is_inverted_hammer() {
        assert_eq!(classify_candle(&candle(100.0, 106.0, 97.0, 98.0)), CandlePattern::InvertedHammer);
    }

    #[test]
    fn exact_tie_is_neutral() {
        // open - low == 2 * body
        assert_eq!(classify_candle(&candle(100.0, 102.0, 96.0, 102.0)), CandlePattern::Neutral);
        // high - close == 2 * body
        assert_eq!(classify_candle(&candle(100.0, 102.0, 97.0, 98.0)), CandlePattern::Neutral);
    }

    #[test]
    fn doji_is_neutral() {
        assert_eq!(classify_candle(&candle(100.0, 105.0, 95.0, 100.0)), CandlePattern::Neutral);
    }
}
