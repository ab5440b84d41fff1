use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, MIN_HISTORY_BARS};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single validated daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// One row of a daily-price page as the fetch collaborator hands it over.
///
/// Fields may be missing, null, plain numbers, or strings with thousands
/// separators (`"70,100"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBarRow {
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(default)]
    pub open: Option<serde_json::Value>,
    #[serde(default)]
    pub high: Option<serde_json::Value>,
    #[serde(default)]
    pub low: Option<serde_json::Value>,
    #[serde(default)]
    pub close: Option<serde_json::Value>,
    #[serde(default)]
    pub volume: Option<serde_json::Value>,
}

impl RawBarRow {
    /// Coerce the row into a [`Bar`], checking the OHLC invariants.
    pub fn parse(&self) -> Result<Bar, AnalysisError> {
        let bar = Bar {
            date: parse_date(self.date.as_ref())?,
            open: parse_price(self.open.as_ref(), "open")?,
            high: parse_price(self.high.as_ref(), "high")?,
            low: parse_price(self.low.as_ref(), "low")?,
            close: parse_price(self.close.as_ref(), "close")?,
            volume: parse_number(self.volume.as_ref(), "volume")?,
        };
        bar.validate()?;
        Ok(bar)
    }
}

impl Bar {
    /// `high >= max(open, close, low)`, `low <= min(open, close, high)`,
    /// `volume >= 0`.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.volume < 0.0 {
            return Err(AnalysisError::invalid("volume", format!("negative volume {}", self.volume)));
        }
        if self.high < self.open.max(self.close).max(self.low) {
            return Err(AnalysisError::invalid(
                "high",
                format!("high {} below open/close/low", self.high),
            ));
        }
        if self.low > self.open.min(self.close).min(self.high) {
            return Err(AnalysisError::invalid(
                "low",
                format!("low {} above open/close/high", self.low),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BarHistory -- ascending, de-duplicated, validated
// ---------------------------------------------------------------------------

/// Validated bar sequence in strictly ascending date order.
///
/// Construction is the only place ordering is enforced; every indicator
/// downstream assumes `bars[0]` is the oldest session and `bars[len-1]` the
/// latest.
#[derive(Debug, Clone, PartialEq)]
pub struct BarHistory {
    bars: Vec<Bar>,
}

impl BarHistory {
    /// Merge raw fetch pages into a history.
    ///
    /// Pages arrive newest-first and may overlap. Malformed rows are dropped;
    /// for a duplicated date the first occurrence in fetch order wins.
    pub fn from_pages<I>(pages: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator,
        I::Item: IntoIterator<Item = RawBarRow>,
    {
        let mut dropped = 0usize;
        let candidates = pages.into_iter().flatten().filter_map(|row| match row.parse() {
            Ok(bar) => Some(bar),
            Err(e) => {
                dropped += 1;
                debug!(error = %e, "dropping bar row");
                None
            }
        });
        let history = Self::collect(candidates);
        if dropped > 0 {
            debug!(dropped, kept = history.bars.len(), "bar rows dropped during normalization");
        }
        history.ensure_minimum()
    }

    /// Build a history from already-typed bars, applying the same
    /// validation, ordering, and de-duplication.
    #[cfg(test)]
    pub fn from_bars(bars: Vec<Bar>) -> Result<Self, AnalysisError> {
        Self::collect(bars.into_iter().filter(|b| b.validate().is_ok())).ensure_minimum()
    }

    fn collect(bars: impl Iterator<Item = Bar>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Bar> = BTreeMap::new();
        for bar in bars {
            by_date.entry(bar.date).or_insert(bar);
        }
        Self {
            bars: by_date.into_values().collect(),
        }
    }

    fn ensure_minimum(self) -> Result<Self, AnalysisError> {
        if self.bars.len() < MIN_HISTORY_BARS {
            return Err(AnalysisError::insufficient(self.bars.len()));
        }
        Ok(self)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// The latest session. Always present: construction guarantees at least
    /// [`MIN_HISTORY_BARS`] bars.
    pub fn latest(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    /// Percentage change of the latest session's volume versus the session
    /// before. Zero when the previous session traded nothing.
    pub fn volume_change_pct(&self) -> f64 {
        let n = self.bars.len();
        let prev = self.bars[n - 2].volume;
        let curr = self.bars[n - 1].volume;
        if prev == 0.0 {
            0.0
        } else {
            (curr - prev) / prev * 100.0
        }
    }
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

fn parse_date(val: Option<&serde_json::Value>) -> Result<NaiveDate, AnalysisError> {
    let raw = match val {
        Some(serde_json::Value::String(s)) => s.trim(),
        Some(serde_json::Value::Null) | None => {
            return Err(AnalysisError::invalid("date", "missing"));
        }
        Some(other) => {
            return Err(AnalysisError::invalid("date", format!("unexpected JSON type: {other}")));
        }
    };
    NaiveDate::parse_from_str(raw, "%Y.%m.%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|e| AnalysisError::invalid("date", format!("{raw}: {e}")))
}

/// Numbers may come as JSON numbers or as strings with `,` separators.
fn parse_number(val: Option<&serde_json::Value>, name: &'static str) -> Result<f64, AnalysisError> {
    let value = match val {
        Some(serde_json::Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| AnalysisError::invalid(name, format!("not a valid f64: {n}")))?,
        Some(serde_json::Value::String(s)) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            cleaned
                .parse::<f64>()
                .map_err(|_| AnalysisError::invalid(name, format!("not a number: {s}")))?
        }
        Some(serde_json::Value::Null) | None => return Err(AnalysisError::invalid(name, "missing")),
        Some(other) => {
            return Err(AnalysisError::invalid(name, format!("unexpected JSON type: {other}")));
        }
    };
    if !value.is_finite() {
        return Err(AnalysisError::invalid(name, "non-finite"));
    }
    Ok(value)
}

fn parse_price(val: Option<&serde_json::Value>, name: &'static str) -> Result<f64, AnalysisError> {
    let price = parse_number(val, name)?;
    if price <= 0.0 {
        return Err(AnalysisError::invalid(name, format!("non-positive price {price}")));
    }
    Ok(price)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
