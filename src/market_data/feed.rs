// =============================================================================
// Market Feed — input snapshot handed over by the fetch collaborator
// =============================================================================
//
// The screener never talks to the network itself.  Whatever scraped the
// ranked quotes and the paginated daily prices drops them into one JSON
// document; this module loads it and serves bar pages through the
// `HistorySource` seam the batch runner depends on.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::bar_history::RawBarRow;
use super::quote::{InstrumentQuote, MarketQuote};

/// Supplies raw daily-price pages for one instrument code, newest page first.
#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn fetch_pages(&self, code: &str) -> Result<Vec<Vec<RawBarRow>>>;
}

/// One evaluation run's worth of input data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketFeed {
    /// Ranked equities, best rank first.
    #[serde(default)]
    pub quotes: Vec<InstrumentQuote>,

    /// Instrument code -> fetch pages -> raw rows.
    #[serde(default)]
    pub histories: HashMap<String, Vec<Vec<RawBarRow>>>,

    /// Market assets ranked by traded volume.
    #[serde(default)]
    pub market_assets: Vec<MarketQuote>,
}

impl MarketFeed {
    /// Load a feed snapshot from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read market feed from {}", path.display()))?;

        let feed: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse market feed from {}", path.display()))?;

        info!(
            path = %path.display(),
            quotes = feed.quotes.len(),
            histories = feed.histories.len(),
            market_assets = feed.market_assets.len(),
            "market feed loaded"
        );

        Ok(feed)
    }
}

#[async_trait]
impl HistorySource for MarketFeed {
    async fn fetch_pages(&self, code: &str) -> Result<Vec<Vec<RawBarRow>>> {
        self.histories
            .get(code)
            .cloned()
            .with_context(|| format!("no daily price pages for code {code}"))
    }
}
