// =============================================================================
// Screener — bounded, fault-isolated batch evaluation
// =============================================================================
//
// Evaluates every ranked instrument independently:
//
//   1. Acquire a permit (at most `max_concurrency` instruments in flight)
//   2. Fetch raw daily-price pages through the `HistorySource` seam
//   3. Normalize into a `BarHistory`
//   4. Build the `IndicatorSnapshot`
//
// Steps 2-4 share one per-instrument timeout.  A failure, timeout, or panic
// in one instrument is recorded as a skip and never touches its siblings.
// Results come back in input rank order.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::error::AnalysisError;
use crate::market_data::{BarHistory, HistorySource, InstrumentQuote, MarketQuote};
use crate::signals::{IndicatorSnapshot, RuleContribution, ScoredInstrument, MARKET_PROFILE};
use crate::types::Tier;

/// An instrument that was excluded from the output, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedInstrument {
    pub rank: usize,
    pub symbol: String,
    pub code: String,
    pub reason: String,
}

/// Everything one batch run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    /// Successfully scored instruments, ascending by rank.
    pub scored: Vec<ScoredInstrument>,
    /// Excluded instruments, ascending by rank.
    pub skipped: Vec<SkippedInstrument>,
}

/// Limits applied to a batch run.
#[derive(Debug, Clone, Copy)]
pub struct BatchLimits {
    pub max_concurrency: usize,
    pub instrument_timeout: Duration,
}

/// Fetch, normalize, and analyse one instrument.
pub async fn evaluate_instrument(
    source: &dyn HistorySource,
    quote: &InstrumentQuote,
) -> Result<IndicatorSnapshot, AnalysisError> {
    let pages = source
        .fetch_pages(&quote.code)
        .await
        .map_err(|e| AnalysisError::HistoryUnavailable {
            code: quote.code.clone(),
            reason: format!("{e:#}"),
        })?;

    let history = BarHistory::from_pages(pages)?;
    IndicatorSnapshot::build(&history, quote)
}

/// Evaluate `quotes` (rank = position + 1) with bounded concurrency.
pub async fn run_batch(
    quotes: Vec<InstrumentQuote>,
    source: Arc<dyn HistorySource>,
    limits: BatchLimits,
) -> BatchOutcome {
    let total = quotes.len();
    let semaphore = Arc::new(Semaphore::new(limits.max_concurrency.max(1)));
    let timeout = limits.instrument_timeout;

    let mut meta = Vec::with_capacity(total);
    let mut handles = Vec::with_capacity(total);

    for (idx, quote) in quotes.into_iter().enumerate() {
        let rank = idx + 1;
        meta.push((rank, quote.symbol.clone(), quote.code.clone()));

        let semaphore = Arc::clone(&semaphore);
        let source = Arc::clone(&source);

        handles.push(tokio::spawn(async move {
            // The semaphore is never closed, so acquisition only waits.
            let _permit = semaphore.acquire_owned().await.ok();

            let result = match tokio::time::timeout(timeout, evaluate_instrument(source.as_ref(), &quote)).await {
                Ok(result) => result,
                Err(_) => Err(AnalysisError::Timeout {
                    code: quote.code.clone(),
                    secs: timeout.as_secs(),
                }),
            };
            result.map(|snapshot| ScoredInstrument::new(rank, quote, snapshot))
        }));
    }

    let mut outcome = BatchOutcome::default();

    for ((rank, symbol, code), joined) in meta.into_iter().zip(join_all(handles).await) {
        let reason = match joined {
            Ok(Ok(scored)) => {
                debug!(
                    rank,
                    symbol = %symbol,
                    score = scored.snapshot.score,
                    tier = %scored.snapshot.tier,
                    "instrument scored"
                );
                outcome.scored.push(scored);
                continue;
            }
            Ok(Err(e)) => {
                warn!(rank, symbol = %symbol, code = %code, error = %e, "instrument skipped");
                e.to_string()
            }
            Err(e) => {
                error!(rank, symbol = %symbol, code = %code, error = %e, "instrument task failed");
                format!("evaluation task failed: {e}")
            }
        };
        outcome.skipped.push(SkippedInstrument {
            rank,
            symbol,
            code,
            reason,
        });
    }

    outcome.scored.sort_by_key(|s| s.rank);
    outcome.skipped.sort_by_key(|s| s.rank);

    info!(
        total,
        scored = outcome.scored.len(),
        skipped = outcome.skipped.len(),
        "batch evaluation complete"
    );

    outcome
}

// =============================================================================
// Market assets
// =============================================================================

/// A market asset scored with the reduced quote-only rule table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMarketAsset {
    #[serde(flatten)]
    pub quote: MarketQuote,
    pub score: f64,
    pub tier: Tier,
    pub contributions: Vec<RuleContribution>,
}

/// Score the first `top_n` market assets, keeping input order.
pub fn score_market_assets(assets: &[MarketQuote], top_n: usize) -> Vec<ScoredMarketAsset> {
    let scored: Vec<ScoredMarketAsset> = assets
        .iter()
        .take(top_n)
        .map(|asset| {
            let quote = MarketQuote {
                symbol: asset.symbol.to_uppercase(),
                ..asset.clone()
            };
            let card = MARKET_PROFILE.score(&quote);
            ScoredMarketAsset {
                quote,
                score: card.score,
                tier: card.tier,
                contributions: card.contributions,
            }
        })
        .collect();

    info!(
        profile = MARKET_PROFILE.name,
        count = scored.len(),
        "market assets scored"
    );

    scored
}
