// =============================================================================
// Daily Screener — Main Entry Point
// =============================================================================
//
// One run = load config, load the feed snapshot, evaluate the ranked
// equities under a bounded worker pool, score the market assets, and write
// the dated report.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod error;
mod indicators;
mod market_data;
mod report;
mod runtime_config;
mod screener;
mod signals;
mod types;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::market_data::MarketFeed;
use crate::report::ScreenReport;
use crate::runtime_config::ScreenerConfig;
use crate::screener::{run_batch, score_market_assets, BatchLimits};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Daily screener starting");

    let mut config = ScreenerConfig::load("screener_config.json").unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        ScreenerConfig::default()
    });
    config.apply_overrides(|key| std::env::var(key).ok());

    info!(
        feed = %config.feed_path.display(),
        top_n = config.top_n,
        max_concurrency = config.max_concurrency,
        timeout_secs = config.instrument_timeout_secs,
        "Screener configured"
    );

    // ── 2. Input snapshot ────────────────────────────────────────────────
    let feed = MarketFeed::load(&config.feed_path)?;
    let quotes: Vec<_> = feed.quotes.iter().take(config.top_n).cloned().collect();
    let market_assets = score_market_assets(&feed.market_assets, config.market_top_n);

    // ── 3. Equity batch ──────────────────────────────────────────────────
    let limits = BatchLimits {
        max_concurrency: config.max_concurrency,
        instrument_timeout: Duration::from_secs(config.instrument_timeout_secs),
    };
    let outcome = run_batch(quotes, Arc::new(feed), limits).await;

    // ── 4. Report ────────────────────────────────────────────────────────
    let report = ScreenReport::new(outcome, market_assets);
    for (tier, count) in report.tier_counts() {
        info!(tier = %tier, count, "Tier summary");
    }
    for stock in report.stocks.iter().take(5) {
        info!(
            rank = stock.rank,
            symbol = %stock.quote.symbol,
            score = stock.snapshot.score,
            tier = %stock.snapshot.tier,
            notes = %stock.notes_text,
            "Top pick"
        );
    }

    let path = report.write_to(&config.report_dir)?;
    info!(path = %path.display(), "Daily screener finished");

    Ok(())
}
