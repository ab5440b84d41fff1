// =============================================================================
// Shared types used across the daily screener
// =============================================================================

use serde::{Deserialize, Serialize};

/// Discrete recommendation tier derived from a composite score.
///
/// Equities land in `StrongBuy` / `Buy` / `Hold`; market assets use `Watch`
/// as their lowest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    StrongBuy,
    Buy,
    Hold,
    Watch,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongBuy => write!(f, "Strong Buy"),
            Self::Buy => write!(f, "Buy"),
            Self::Hold => write!(f, "Hold"),
            Self::Watch => write!(f, "Watch"),
        }
    }
}

/// Where the current price sits relative to the Bollinger envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BollPosition {
    AboveUpper,
    BelowLower,
    Mid,
}

impl std::fmt::Display for BollPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AboveUpper => write!(f, "Above Upper Band"),
            Self::BelowLower => write!(f, "Below Lower Band"),
            Self::Mid => write!(f, "Near Middle"),
        }
    }
}

/// Single-bar candle shape of the latest session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandlePattern {
    Hammer,
    InvertedHammer,
    Neutral,
}

impl Default for CandlePattern {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for CandlePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hammer => write!(f, "Hammer (rebound signal)"),
            Self::InvertedHammer => write!(f, "Inverted Hammer (decline signal)"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}
