// =============================================================================
// Signals Module
// =============================================================================
//
// Turns indicator readings into the screener's output record:
// - Ordered weighted rule tables (equity + market-asset profiles)
// - Strategy note annotation
// - Immutable per-instrument snapshot assembly

pub mod snapshot;
pub mod strategy_notes;
pub mod weighted_score;

pub use snapshot::{IndicatorSnapshot, ScoredInstrument};
pub use weighted_score::{RuleContribution, MARKET_PROFILE};
