// =============================================================================
// Strategy Notes — advisory rationale attached to every scored instrument
// =============================================================================
//
// Each rule fires independently; the output keeps rule order.  When nothing
// fires a single neutral note is emitted, so the list is never empty.

use serde::{Serialize, Serializer};

use super::snapshot::IndicatorReadings;
use crate::types::CandlePattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyNote {
    OversoldBuyOpportunity,
    OverboughtCaution,
    BullishCrossover,
    OscillatorOversold,
    OscillatorOverbought,
    UndervaluedApproach,
    OverheatedCaution,
    ReboundSignal,
    InsufficientConfirmation,
}

impl StrategyNote {
    pub fn message(&self) -> &'static str {
        match self {
            Self::OversoldBuyOpportunity => "RSI oversold → possible buying opportunity",
            Self::OverboughtCaution => "RSI overbought → caution, selling pressure likely",
            Self::BullishCrossover => "MACD golden cross → bullish reversal signal",
            Self::OscillatorOversold => "Stochastic oversold → rebound possible",
            Self::OscillatorOverbought => "Stochastic overbought → sell signal",
            Self::UndervaluedApproach => "Disparity low → approaching a bottom",
            Self::OverheatedCaution => "Disparity overheated → correction risk",
            Self::ReboundSignal => "Hammer candle → rebound signal",
            Self::InsufficientConfirmation => "Neutral: trend confirmation needed",
        }
    }
}

impl std::fmt::Display for StrategyNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for StrategyNote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

type NoteRule = (fn(&IndicatorReadings) -> bool, StrategyNote);

static NOTE_RULES: [NoteRule; 8] = [
    (|r: &IndicatorReadings| r.rsi14 < 30.0, StrategyNote::OversoldBuyOpportunity),
    (|r: &IndicatorReadings| r.rsi14 > 70.0, StrategyNote::OverboughtCaution),
    (|r: &IndicatorReadings| r.macd_golden, StrategyNote::BullishCrossover),
    (|r: &IndicatorReadings| r.percent_k < 20.0, StrategyNote::OscillatorOversold),
    (|r: &IndicatorReadings| r.percent_k > 80.0, StrategyNote::OscillatorOverbought),
    (|r: &IndicatorReadings| r.disparity < 95.0, StrategyNote::UndervaluedApproach),
    (|r: &IndicatorReadings| r.disparity > 105.0, StrategyNote::OverheatedCaution),
    (|r: &IndicatorReadings| r.candle_pattern == CandlePattern::Hammer, StrategyNote::ReboundSignal),
];

/// Evaluate every note rule against `readings`, in table order.
pub fn annotate(readings: &IndicatorReadings) -> Vec<StrategyNote> {
    let notes: Vec<StrategyNote> = NOTE_RULES
        .iter()
        .filter(|(fires, _)| fires(readings))
        .map(|(_, note)| *note)
        .collect();

    if notes.is_empty() {
        vec![StrategyNote::InsufficientConfirmation]
    } else {
        notes
    }
}

/// Join notes for single-line display.
pub fn join_notes(notes: &[StrategyNote]) -> String {
    notes
        .iter()
        .map(StrategyNote::message)
        .collect::<Vec<_>>()
        .join(" / ")
}
