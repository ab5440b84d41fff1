// =============================================================================
// Screen Report — the persisted result of one evaluation run
// =============================================================================
//
// Written to `<report_dir>/<YYYY-MM-DD>.json`.  The file is first written
// next to its destination and then renamed, so a reader never observes a
// half-written report.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::screener::{BatchOutcome, ScoredMarketAsset, SkippedInstrument};
use crate::signals::ScoredInstrument;
use crate::types::Tier;

#[derive(Debug, Clone, Serialize)]
pub struct ScreenReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub stocks: Vec<ScoredInstrument>,
    pub market_assets: Vec<ScoredMarketAsset>,
    pub skipped: Vec<SkippedInstrument>,
}

impl ScreenReport {
    pub fn new(outcome: BatchOutcome, market_assets: Vec<ScoredMarketAsset>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            stocks: outcome.scored,
            market_assets,
            skipped: outcome.skipped,
        }
    }

    /// `YYYY-MM-DD.json`, taken from the generation timestamp.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.generated_at.format("%Y-%m-%d"))
    }

    /// Number of stocks per tier, in tier order.
    pub fn tier_counts(&self) -> [(Tier, usize); 3] {
        let count = |tier: Tier| self.stocks.iter().filter(|s| s.snapshot.tier == tier).count();
        [
            (Tier::StrongBuy, count(Tier::StrongBuy)),
            (Tier::Buy, count(Tier::Buy)),
            (Tier::Hold, count(Tier::Hold)),
        ]
    }

    /// Serialize into `dir`, creating it if needed.  Returns the final path.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create report directory {}", dir.display()))?;

        let path = dir.join(self.file_name());
        let tmp = dir.join(format!(".{}.{}.tmp", self.file_name(), self.id));

        let body = serde_json::to_string_pretty(self).context("failed to serialize screen report")?;
        std::fs::write(&tmp, body)
            .with_context(|| format!("failed to write report to {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("failed to move report into {}", path.display()))?;

        info!(
            id = %self.id,
            path = %path.display(),
            stocks = self.stocks.len(),
            market_assets = self.market_assets.len(),
            skipped = self.skipped.len(),
            "screen report written"
        );

        Ok(path)
    }
}
