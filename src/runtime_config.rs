// =============================================================================
// Runtime Configuration — screener settings loaded from JSON + environment
// =============================================================================
//
// Every field carries `#[serde(default)]` so that adding new fields never
// breaks loading an older config file.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_feed_path() -> PathBuf {
    PathBuf::from("market_feed.json")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_top_n() -> usize {
    30
}

fn default_market_top_n() -> usize {
    20
}

fn default_max_concurrency() -> usize {
    8
}

fn default_instrument_timeout_secs() -> u64 {
    10
}

// =============================================================================
// ScreenerConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// JSON snapshot produced by the fetch collaborator.
    #[serde(default = "default_feed_path")]
    pub feed_path: PathBuf,

    /// Directory the dated report JSON is written to.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// How many ranked equities to evaluate.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// How many market assets to score.
    #[serde(default = "default_market_top_n")]
    pub market_top_n: usize,

    /// Upper bound on instruments evaluated at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-instrument budget for fetch + compute.
    #[serde(default = "default_instrument_timeout_secs")]
    pub instrument_timeout_secs: u64,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            feed_path: default_feed_path(),
            report_dir: default_report_dir(),
            top_n: default_top_n(),
            market_top_n: default_market_top_n(),
            max_concurrency: default_max_concurrency(),
            instrument_timeout_secs: default_instrument_timeout_secs(),
        }
    }
}

impl ScreenerConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read screener config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse screener config from {}", path.display()))?;

        info!(
            path = %path.display(),
            top_n = config.top_n,
            max_concurrency = config.max_concurrency,
            "screener config loaded"
        );

        Ok(config)
    }

    /// Apply `SCREENER_*` overrides from a variable lookup (normally
    /// `std::env::var`).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(feed) = lookup("SCREENER_FEED") {
            self.feed_path = PathBuf::from(feed);
        }
        if let Some(dir) = lookup("SCREENER_REPORT_DIR") {
            self.report_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("SCREENER_CONCURRENCY") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.max_concurrency = n,
                _ => warn!(value = %raw, "ignoring invalid SCREENER_CONCURRENCY"),
            }
        }
        // A zero-permit semaphore would never let a task through.
        self.max_concurrency = self.max_concurrency.max(1);
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = ScreenerConfig::default();
        assert_eq!(cfg.feed_path, PathBuf::from("market_feed.json"));
        assert_eq!(cfg.report_dir, PathBuf::from("reports"));
        assert_eq!(cfg.top_n, 30);
        assert_eq!(cfg.market_top_n, 20);
        assert_eq!(cfg.max_concurrency, 8);
        assert_eq!(cfg.instrument_timeout_secs, 10);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: ScreenerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.top_n, 30);
        assert_eq!(cfg.instrument_timeout_secs, 10);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "top_n": 5, "report_dir": "out" }"#;
        let cfg: ScreenerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.top_n, 5);
        assert_eq!(cfg.report_dir, PathBuf::from("out"));
        assert_eq!(cfg.max_concurrency, 8);
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("SCREENER_FEED", "/tmp/feed.json"),
            ("SCREENER_CONCURRENCY", "3"),
        ]
        .into_iter()
        .collect();
        let mut cfg = ScreenerConfig::default();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.feed_path, PathBuf::from("/tmp/feed.json"));
        assert_eq!(cfg.max_concurrency, 3);
        assert_eq!(cfg.report_dir, PathBuf::from("reports"));
    }

    #[test]
    fn invalid_concurrency_is_ignored_and_zero_is_lifted() {
        let mut cfg = ScreenerConfig::default();
        cfg.apply_overrides(|k| (k == "SCREENER_CONCURRENCY").then(|| "zero".to_string()));
        assert_eq!(cfg.max_concurrency, 8);

        let mut cfg: ScreenerConfig = serde_json::from_str(r#"{ "max_concurrency": 0 }"#).unwrap();
        cfg.apply_overrides(|_| None);
        assert_eq!(cfg.max_concurrency, 1);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(ScreenerConfig::load("/no/such/screener_config.json").is_err());
    }
}
