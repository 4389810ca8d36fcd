// =============================================================================
// Collaborator inputs — broad-market context and social sentiment
// =============================================================================
//
// These structures are produced by external macro-sentiment and social-search
// collaborators and validated at that boundary: every sub-field is an
// explicit `Option`, so the scorer's defensive checks are plain
// optional-field checks rather than speculative key lookups. Any field may
// be absent; the scorer degrades per sub-term.

use serde::{Deserialize, Serialize};

use crate::types::Direction;

// ---------------------------------------------------------------------------
// Market context
// ---------------------------------------------------------------------------

/// Broad-market context supplied by the macro-sentiment collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketContext {
    pub fear_greed: Option<FearGreedIndex>,
    pub fear_greed_trend: Option<FearGreedTrend>,
    pub global_market: Option<GlobalMarket>,
    pub market_volatility: Option<MarketVolatility>,
    pub btc_dominance: Option<BtcDominance>,
}

/// Latest Fear & Greed Index reading (0 = extreme fear, 100 = extreme greed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FearGreedIndex {
    pub value: f64,
    pub classification: Option<String>,
}

/// 30-day Fear & Greed trend summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FearGreedTrend {
    pub direction: TrendDirection,
    pub average_value: Option<f64>,
}

/// Which way a 30-day average has been moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rising => write!(f, "rising"),
            Self::Falling => write!(f, "falling"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Global market aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalMarket {
    /// 24h change of the total market cap, in percent.
    pub market_cap_change_percentage_24h: Option<f64>,
}

/// Recent market-wide volatility classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketVolatility {
    pub pattern: VolatilityPattern,
    /// Average absolute 24h move underlying the classification, in percent.
    pub average_24h_move: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityPattern {
    High,
    Moderate,
    Low,
}

impl std::fmt::Display for VolatilityPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Moderate => write!(f, "moderate"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// BTC-dominance reading and its implication for the analyzed asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BtcDominance {
    /// BTC share of total market cap, in percent.
    pub dominance_pct: Option<f64>,
    /// What the dominance level/trend implies for non-BTC assets.
    pub implication: DominanceImplication,
    pub btc_eth_ratio: Option<f64>,
}

/// Dominance read-through for altcoins: falling dominance is typically
/// altcoin-friendly, rising dominance typically is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominanceImplication {
    AltcoinBullish,
    AltcoinBearish,
    Neutral,
}

// ---------------------------------------------------------------------------
// Social sentiment
// ---------------------------------------------------------------------------

/// Summarized social-media sentiment supplied by the social-search
/// collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialSentiment {
    pub overall_sentiment: Direction,
    pub summary: Option<String>,
    /// Representative posts backing the summary.
    pub key_items: Vec<String>,
}
