// =============================================================================
// Per-instrument analysis errors
// =============================================================================
//
// Every variant is recoverable at the instrument boundary: the screener logs
// the reason, records the instrument as skipped, and carries on with the rest
// of the batch.

use thiserror::Error;

/// Minimum number of valid bars required by the slowest indicator window
/// (SMA-20 / Bollinger-20).
pub const MIN_HISTORY_BARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Not enough valid bars remained after normalization.
    #[error("insufficient history: need {required} bars, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// A raw bar row had a missing or malformed field.
    #[error("invalid bar data in field `{field}`: {reason}")]
    InvalidBarData { field: &'static str, reason: String },

    /// The history collaborator could not supply bars for this instrument.
    #[error("history unavailable for {code}: {reason}")]
    HistoryUnavailable { code: String, reason: String },

    /// Fetch + compute exceeded the per-instrument budget.
    #[error("timed out after {secs}s evaluating {code}")]
    Timeout { code: String, secs: u64 },
}

impl AnalysisError {
    pub fn insufficient(actual: usize) -> Self {
        Self::InsufficientHistory {
            required: MIN_HISTORY_BARS,
            actual,
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidBarData {
            field,
            reason: reason.into(),
        }
    }
}
