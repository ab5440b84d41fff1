// =============================================================================
// Weighted Rule Scorer — ordered (condition, weight) tables folded into a tier
// =============================================================================
//
// A `ScoringProfile` is a fixed, ordered rule table plus the tier thresholds
// it maps onto.  Two profiles exist:
//
//   EQUITY_PROFILE:  full indicator set, max 10.0
//     change >= 5%            +2.5
//     volume change >= 150%   +2.5
//     price above SMA-5       +2.0
//     50 <= RSI <= 70         +1.5
//     MACD golden             +1.5
//     tiers: >= 6.5 StrongBuy, >= 5.0 Buy, else Hold
//
//   MARKET_PROFILE:  quote-only assets without bar history, max 5.0
//     change >= 5%            +2
//     volume > $1B            +2
//     change > 0%             +1
//     tiers: >= 4 StrongBuy, >= 3 Buy, else Watch
//
// Scoring is total: any finite input yields exactly one tier.
// =============================================================================

use serde::Serialize;

use crate::indicators::round_to;
use crate::market_data::MarketQuote;
use crate::types::Tier;

/// One row of a rule table.
pub struct ScoreRule<T> {
    pub name: &'static str,
    pub weight: f64,
    pub applies: fn(&T) -> bool,
}

/// A rule that fired and the weight it added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleContribution {
    pub rule: &'static str,
    pub weight: f64,
}

/// Result of running a profile over one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    /// Sum of fired weights, rounded to one decimal.
    pub score: f64,
    pub tier: Tier,
    pub contributions: Vec<RuleContribution>,
}

/// Rule table plus tier thresholds (inclusive lower bounds).
pub struct ScoringProfile<T: 'static> {
    pub name: &'static str,
    pub rules: &'static [ScoreRule<T>],
    pub strong_buy_at: f64,
    pub buy_at: f64,
    /// Tier assigned below `buy_at`.
    pub floor: Tier,
}

impl<T> ScoringProfile<T> {
    /// Fold the rule table over `input` in table order.
    pub fn score(&self, input: &T) -> ScoreCard {
        let contributions: Vec<RuleContribution> = self
            .rules
            .iter()
            .filter(|rule| (rule.applies)(input))
            .map(|rule| RuleContribution {
                rule: rule.name,
                weight: rule.weight,
            })
            .collect();

        let total: f64 = contributions.iter().map(|c| c.weight).sum();
        let score = round_to(total, 1);

        ScoreCard {
            score,
            tier: self.tier_for(score),
            contributions,
        }
    }

    /// Thresholds are checked high to low; first match wins.
    pub fn tier_for(&self, score: f64) -> Tier {
        if score >= self.strong_buy_at {
            Tier::StrongBuy
        } else if score >= self.buy_at {
            Tier::Buy
        } else {
            self.floor
        }
    }
}

// =============================================================================
// Equity profile
// =============================================================================

/// The subset of quote + indicator readings the equity rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityFactors {
    pub change_pct: f64,
    pub volume_change_pct: f64,
    pub sma5_breakout: bool,
    pub rsi14: f64,
    pub macd_golden: bool,
}

fn price_surge(f: &EquityFactors) -> bool {
    f.change_pct >= 5.0
}

fn volume_surge(f: &EquityFactors) -> bool {
    f.volume_change_pct >= 150.0
}

fn sma5_breakout(f: &EquityFactors) -> bool {
    f.sma5_breakout
}

fn rsi_healthy(f: &EquityFactors) -> bool {
    (50.0..=70.0).contains(&f.rsi14)
}

fn macd_golden(f: &EquityFactors) -> bool {
    f.macd_golden
}

static EQUITY_RULES: [ScoreRule<EquityFactors>; 5] = [
    ScoreRule { name: "price_surge", weight: 2.5, applies: price_surge },
    ScoreRule { name: "volume_surge", weight: 2.5, applies: volume_surge },
    ScoreRule { name: "sma5_breakout", weight: 2.0, applies: sma5_breakout },
    ScoreRule { name: "rsi_healthy", weight: 1.5, applies: rsi_healthy },
    ScoreRule { name: "macd_golden", weight: 1.5, applies: macd_golden },
];

pub static EQUITY_PROFILE: ScoringProfile<EquityFactors> = ScoringProfile {
    name: "equity",
    rules: &EQUITY_RULES,
    strong_buy_at: 6.5,
    buy_at: 5.0,
    floor: Tier::Hold,
};

// =============================================================================
// Market-asset profile
// =============================================================================

fn market_surge(q: &MarketQuote) -> bool {
    q.change_pct_24h >= 5.0
}

fn market_liquid(q: &MarketQuote) -> bool {
    q.total_volume > 1e9
}

fn market_positive(q: &MarketQuote) -> bool {
    q.change_pct_24h > 0.0
}

static MARKET_RULES: [ScoreRule<MarketQuote>; 3] = [
    ScoreRule { name: "price_surge", weight: 2.0, applies: market_surge },
    ScoreRule { name: "billion_volume", weight: 2.0, applies: market_liquid },
    ScoreRule { name: "positive_change", weight: 1.0, applies: market_positive },
];

pub static MARKET_PROFILE: ScoringProfile<MarketQuote> = ScoringProfile {
    name: "market",
    rules: &MARKET_RULES,
    strong_buy_at: 4.0,
    buy_at: 3.0,
    floor: Tier::Watch,
};

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> EquityFactors {
        EquityFactors {
            change_pct: 0.0,
            volume_change_pct: 0.0,
            sma5_breakout: false,
            rsi14: 40.0,
            macd_golden: false,
        }
    }

    fn coin(change: f64, volume: f64) -> MarketQuote {
        MarketQuote {
            name: "Bitcoin".into(),
            symbol: "BTC".into(),
            price: 65_000.0,
            change_pct_24h: change,
            total_volume: volume,
            image: None,
        }
    }

    // ---- individual equity rules ------------------------------------------

    #[test]
    fn price_surge_boundary() {
        assert!(!price_surge(&EquityFactors { change_pct: 4.99, ..quiet() }));
        assert!(price_surge(&EquityFactors { change_pct: 5.0, ..quiet() }));
    }

    #[test]
    fn volume_surge_boundary() {
        assert!(!volume_surge(&EquityFactors { volume_change_pct: 149.9, ..quiet() }));
        assert!(volume_surge(&EquityFactors { volume_change_pct: 150.0, ..quiet() }));
    }

    #[test]
    fn rsi_band_is_inclusive() {
        assert!(rsi_healthy(&EquityFactors { rsi14: 50.0, ..quiet() }));
        assert!(rsi_healthy(&EquityFactors { rsi14: 70.0, ..quiet() }));
        assert!(!rsi_healthy(&EquityFactors { rsi14: 70.01, ..quiet() }));
        assert!(!rsi_healthy(&EquityFactors { rsi14: 49.99, ..quiet() }));
    }

    // ---- equity profile ---------------------------------------------------

    #[test]
    fn nothing_fires_scores_zero_hold() {
        let card = EQUITY_PROFILE.score(&quiet());
        assert_eq!(card.score, 0.0);
        assert_eq!(card.tier, Tier::Hold);
        assert!(card.contributions.is_empty());
    }

    #[test]
    fn everything_fires_scores_ten() {
        let f = EquityFactors {
            change_pct: 12.0,
            volume_change_pct: 300.0,
            sma5_breakout: true,
            rsi14: 60.0,
            macd_golden: true,
        };
        let card = EQUITY_PROFILE.score(&f);
        assert_eq!(card.score, 10.0);
        assert_eq!(card.tier, Tier::StrongBuy);
        let names: Vec<&str> = card.contributions.iter().map(|c| c.rule).collect();
        assert_eq!(
            names,
            vec!["price_surge", "volume_surge", "sma5_breakout", "rsi_healthy", "macd_golden"]
        );
    }

    #[test]
    fn change_crossing_five_adds_exactly_two_and_a_half() {
        let below = EQUITY_PROFILE.score(&EquityFactors { change_pct: 4.9, sma5_breakout: true, ..quiet() });
        let at = EQUITY_PROFILE.score(&EquityFactors { change_pct: 5.0, sma5_breakout: true, ..quiet() });
        assert!((at.score - below.score - 2.5).abs() < 1e-10);
    }

    #[test]
    fn equity_tier_thresholds() {
        assert_eq!(EQUITY_PROFILE.tier_for(10.0), Tier::StrongBuy);
        assert_eq!(EQUITY_PROFILE.tier_for(6.5), Tier::StrongBuy);
        assert_eq!(EQUITY_PROFILE.tier_for(6.4), Tier::Buy);
        assert_eq!(EQUITY_PROFILE.tier_for(5.0), Tier::Buy);
        assert_eq!(EQUITY_PROFILE.tier_for(4.9), Tier::Hold);
        assert_eq!(EQUITY_PROFILE.tier_for(-1.0), Tier::Hold);
    }

    #[test]
    fn breakout_plus_golden_is_buy() {
        // 2.0 + 1.5 + 1.5 = 5.0
        let f = EquityFactors {
            sma5_breakout: true,
            rsi14: 55.0,
            macd_golden: true,
            ..quiet()
        };
        let card = EQUITY_PROFILE.score(&f);
        assert_eq!(card.score, 5.0);
        assert_eq!(card.tier, Tier::Buy);
    }

    #[test]
    fn every_score_maps_to_exactly_one_tier() {
        for tenth in -10..=110 {
            let score = tenth as f64 / 10.0;
            let tier = EQUITY_PROFILE.tier_for(score);
            let expected = if score >= 6.5 {
                Tier::StrongBuy
            } else if score >= 5.0 {
                Tier::Buy
            } else {
                Tier::Hold
            };
            assert_eq!(tier, expected, "score {score}");
        }
    }

    // ---- market profile ---------------------------------------------------

    #[test]
    fn market_surge_with_volume_is_strong_buy() {
        let card = MARKET_PROFILE.score(&coin(6.0, 2e9));
        assert_eq!(card.score, 5.0);
        assert_eq!(card.tier, Tier::StrongBuy);
    }

    #[test]
    fn market_small_gain_with_volume_is_buy() {
        let card = MARKET_PROFILE.score(&coin(1.2, 5e9));
        assert_eq!(card.score, 3.0);
        assert_eq!(card.tier, Tier::Buy);
    }

    #[test]
    fn market_volume_boundary_is_strict() {
        let card = MARKET_PROFILE.score(&coin(-2.0, 1e9));
        assert_eq!(card.score, 0.0);
        assert_eq!(card.tier, Tier::Watch);
    }

    #[test]
    fn market_without_volume_caps_at_buy() {
        let card = MARKET_PROFILE.score(&coin(5.0, 1e6));
        assert_eq!(card.score, 3.0);
        assert_eq!(card.tier, Tier::Buy);
        let card = MARKET_PROFILE.score(&coin(0.5, 1e6));
        assert_eq!(card.tier, Tier::Watch);
    }
}
