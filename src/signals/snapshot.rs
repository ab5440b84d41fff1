// =============================================================================
// Indicator Snapshot — one immutable analysis record per instrument
// =============================================================================
//
// Pipeline:
//   1. Compute every indicator family from the validated history
//   2. Fold the equity rule table into a score + tier
//   3. Derive strategy notes from the same readings
//
// The snapshot is built once and never mutated; `ScoredInstrument` pairs it
// with the quote it was computed for.
// =============================================================================

use serde::Serialize;

use super::strategy_notes::{annotate, join_notes, StrategyNote};
use super::weighted_score::{EquityFactors, RuleContribution, EQUITY_PROFILE};
use crate::error::AnalysisError;
use crate::indicators::bollinger::calculate_bollinger;
use crate::indicators::candle_pattern::classify_candle;
use crate::indicators::disparity::calculate_disparity;
use crate::indicators::macd::calculate_macd;
use crate::indicators::moving_average::calculate_sma;
use crate::indicators::rsi::calculate_rsi;
use crate::indicators::stochastic::{calculate_stochastic, D_PERIOD, K_PERIOD};
use crate::indicators::round_to;
use crate::market_data::{BarHistory, InstrumentQuote};
use crate::types::{BollPosition, CandlePattern, Tier};

const SHORT_MA: usize = 5;
const LONG_MA: usize = 20;
const RSI_PERIOD: usize = 14;
const BOLLINGER_STD: f64 = 2.0;

/// Raw indicator values for one instrument, before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorReadings {
    pub sma5: f64,
    pub sma20: f64,
    pub sma5_breakout: bool,
    pub rsi14: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_golden: bool,
    pub boll_upper: f64,
    pub boll_lower: f64,
    pub boll_position: BollPosition,
    pub percent_k: f64,
    pub percent_d: f64,
    pub disparity: f64,
    pub candle_pattern: CandlePattern,
    pub volume_change_pct: f64,
}

impl IndicatorReadings {
    /// Compute all indicator families from `history` against `current_price`.
    ///
    /// A `None` from any indicator means the history cannot support it and is
    /// reported as `InsufficientHistory`.
    pub fn compute(history: &BarHistory, current_price: f64) -> Result<Self, AnalysisError> {
        let insufficient = || AnalysisError::insufficient(history.len());
        let closes = history.closes();

        let sma5 = calculate_sma(&closes, SHORT_MA).ok_or_else(insufficient)?;
        let sma20 = calculate_sma(&closes, LONG_MA).ok_or_else(insufficient)?;
        let rsi14 = calculate_rsi(&closes, RSI_PERIOD).ok_or_else(insufficient)?;
        let macd = calculate_macd(&closes).ok_or_else(insufficient)?;
        let bands = calculate_bollinger(&closes, LONG_MA, BOLLINGER_STD).ok_or_else(insufficient)?;
        let stoch = calculate_stochastic(history.bars(), K_PERIOD, D_PERIOD).ok_or_else(insufficient)?;
        let disparity = calculate_disparity(current_price, sma20).ok_or_else(insufficient)?;

        Ok(Self {
            sma5,
            sma20,
            sma5_breakout: current_price > sma5,
            rsi14,
            macd: macd.macd,
            macd_signal: macd.signal,
            macd_golden: macd.golden,
            boll_upper: round_to(bands.upper, 2),
            boll_lower: round_to(bands.lower, 2),
            boll_position: bands.position(current_price),
            percent_k: stoch.percent_k,
            percent_d: stoch.percent_d,
            disparity,
            candle_pattern: classify_candle(history.latest()),
            volume_change_pct: history.volume_change_pct(),
        })
    }
}

/// Complete per-instrument analysis: readings, score, tier, and notes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    #[serde(flatten)]
    pub readings: IndicatorReadings,
    pub score: f64,
    pub tier: Tier,
    pub contributions: Vec<RuleContribution>,
    pub notes: Vec<StrategyNote>,
}

impl IndicatorSnapshot {
    pub fn build(history: &BarHistory, quote: &InstrumentQuote) -> Result<Self, AnalysisError> {
        let readings = IndicatorReadings::compute(history, quote.current_price)?;

        let factors = EquityFactors {
            change_pct: quote.change_pct,
            volume_change_pct: readings.volume_change_pct,
            sma5_breakout: readings.sma5_breakout,
            rsi14: readings.rsi14,
            macd_golden: readings.macd_golden,
        };
        let card = EQUITY_PROFILE.score(&factors);

        Ok(Self {
            readings,
            score: card.score,
            tier: card.tier,
            contributions: card.contributions,
            notes: annotate(&readings),
        })
    }

    /// Notes joined for single-line display.
    pub fn notes_text(&self) -> String {
        join_notes(&self.notes)
    }
}

/// Quote ⊕ snapshot, tagged with the instrument's input rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredInstrument {
    pub rank: usize,
    #[serde(flatten)]
    pub quote: InstrumentQuote,
    #[serde(flatten)]
    pub snapshot: IndicatorSnapshot,
    pub notes_text: String,
}

impl ScoredInstrument {
    pub fn new(rank: usize, quote: InstrumentQuote, snapshot: IndicatorSnapshot) -> Self {
        let notes_text = snapshot.notes_text();
        Self {
            rank,
            quote,
            snapshot,
            notes_text,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::Bar;
    use chrono::NaiveDate;

    const CLOSES: [f64; 20] = [
        100.0, 101.0, 99.0, 102.0, 105.0, 107.0, 106.0, 108.0, 110.0, 112.0, 111.0, 113.0, 115.0,
        117.0, 116.0, 118.0, 120.0, 119.0, 121.0, 123.0,
    ];

    fn history_from_closes(closes: &[f64]) -> BarHistory {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar {
                date: start + chrono::Duration::days(i as i64),
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 1000.0,
            })
            .collect();
        BarHistory::from_bars(bars).unwrap()
    }

    fn quote(price: f64, change: f64) -> InstrumentQuote {
        InstrumentQuote {
            symbol: "Example".into(),
            code: "000001".into(),
            current_price: price,
            change_pct: change,
            volume: 1_000_000.0,
        }
    }

    #[test]
    fn reference_series_moving_averages_and_disparity() {
        let history = history_from_closes(&CLOSES);
        let r = IndicatorReadings::compute(&history, 123.0).unwrap();
        assert!((r.sma20 - 111.15).abs() < 1e-10);
        assert!((r.sma5 - 120.2).abs() < 1e-10);
        assert!(r.sma5_breakout);
        assert_eq!(r.disparity, 110.66);
        assert!(r.boll_upper >= r.boll_lower);
        assert!((0.0..=100.0).contains(&r.rsi14));
        assert_eq!(r.volume_change_pct, 0.0);
    }

    #[test]
    fn reference_series_fires_overheated_note() {
        let history = history_from_closes(&CLOSES);
        let snap = IndicatorSnapshot::build(&history, &quote(123.0, 1.0)).unwrap();
        assert!(snap.notes.contains(&StrategyNote::OverheatedCaution));
        assert!(!snap.notes.contains(&StrategyNote::InsufficientConfirmation));
    }

    #[test]
    fn reference_series_rsi() {
        // Last 14 deltas: -1,+2,+2,+2,-1,+2,+2,+2,-1,+2,+2,-1,+2,+2
        // gains 20 / 14, losses 4 / 14 => RS = 5 => 83.33
        let history = history_from_closes(&CLOSES);
        let r = IndicatorReadings::compute(&history, 123.0).unwrap();
        assert_eq!(r.rsi14, 83.33);
    }

    #[test]
    fn flat_history_clamps_oscillator_and_stays_neutral() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..25)
            .map(|i| Bar {
                date: start + chrono::Duration::days(i),
                open: 50.0,
                high: 50.0,
                low: 50.0,
                close: 50.0,
                volume: 10.0,
            })
            .collect();
        let history = BarHistory::from_bars(bars).unwrap();
        let snap = IndicatorSnapshot::build(&history, &quote(50.0, 0.0)).unwrap();
        assert_eq!(snap.readings.percent_k, 0.0);
        assert_eq!(snap.readings.rsi14, 50.0);
        assert_eq!(snap.readings.boll_upper, snap.readings.boll_lower);
        assert_eq!(snap.readings.boll_position, BollPosition::Mid);
        assert_eq!(snap.readings.disparity, 100.0);
        assert!(!snap.readings.macd_golden);
        assert_eq!(snap.score, 1.5); // only the RSI band rule (50 is inside 50..=70)
        assert_eq!(snap.tier, Tier::Hold);
        // %K = 0 < 20 fires the oscillator-oversold note.
        assert_eq!(snap.notes, vec![StrategyNote::OscillatorOversold]);
    }

    #[test]
    fn score_reflects_quote_change() {
        let history = history_from_closes(&CLOSES);
        let below = IndicatorSnapshot::build(&history, &quote(123.0, 4.9)).unwrap();
        let at = IndicatorSnapshot::build(&history, &quote(123.0, 5.0)).unwrap();
        assert!((at.score - below.score - 2.5).abs() < 1e-10);
    }

    #[test]
    fn build_is_deterministic() {
        let history = history_from_closes(&CLOSES);
        let a = IndicatorSnapshot::build(&history, &quote(123.0, 2.0)).unwrap();
        let b = IndicatorSnapshot::build(&history, &quote(123.0, 2.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.readings.macd.to_bits(), b.readings.macd.to_bits());
    }

    #[test]
    fn price_above_upper_band() {
        let history = history_from_closes(&CLOSES);
        let r = IndicatorReadings::compute(&history, 500.0).unwrap();
        assert_eq!(r.boll_position, BollPosition::AboveUpper);
        let r = IndicatorReadings::compute(&history, 50.0).unwrap();
        assert_eq!(r.boll_position, BollPosition::BelowLower);
        assert!(!r.sma5_breakout);
    }

    #[test]
    fn scored_instrument_serialises_flat() {
        let history = history_from_closes(&CLOSES);
        let q = quote(123.0, 6.0);
        let snap = IndicatorSnapshot::build(&history, &q).unwrap();
        let scored = ScoredInstrument::new(1, q, snap);
        let value = serde_json::to_value(&scored).unwrap();
        for field in [
            "rank", "symbol", "code", "current_price", "sma5", "sma20", "rsi14", "macd",
            "macd_signal", "macd_golden", "boll_upper", "boll_lower", "boll_position",
            "percent_k", "percent_d", "disparity", "candle_pattern", "volume_change_pct",
            "score", "tier", "notes", "notes_text",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert!(value["notes_text"].as_str().unwrap().contains("Disparity overheated"));
    }
}
