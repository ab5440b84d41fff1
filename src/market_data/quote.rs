use serde::{Deserialize, Serialize};

/// Current quote for a ranked equity, supplied once per evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentQuote {
    /// Display name of the instrument.
    pub symbol: String,
    /// Exchange code used to look up the bar history.
    pub code: String,
    pub current_price: f64,
    pub change_pct: f64,
    pub volume: f64,
}

/// Snapshot quote for a market asset (coin) that has no bar history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub name: String,
    pub symbol: String,
    pub price: f64,
    /// 24h price change in percent.
    pub change_pct_24h: f64,
    /// 24h traded volume in quote currency (USD).
    pub total_volume: f64,
    #[serde(default)]
    pub image: Option<String>,
}
