// =============================================================================
// Scoring Policy Table
// =============================================================================
//
// Every weight and threshold of the confidence scorer lives here as a named
// constant so the policy can be tuned and tested independently of the
// control flow. Bump the version when changing any value.

pub const POLICY_VERSION: &str = "v1";

// ---------------------------------------------------------------------------
// Family weights — normalized at aggregation time over the families that
// are actually present.
// ---------------------------------------------------------------------------
pub const RSI_WEIGHT: f64 = 0.10;
pub const MACD_WEIGHT: f64 = 0.10;
pub const BOLLINGER_WEIGHT: f64 = 0.10;
pub const SMA_WEIGHT: f64 = 0.10;
pub const ADX_WEIGHT: f64 = 0.15;
pub const EMA_WEIGHT: f64 = 0.15;
pub const CONTEXT_WEIGHT: f64 = 0.20;
pub const SENTIMENT_WEIGHT: f64 = 0.15;
pub const DATA_QUALITY_WEIGHT: f64 = 0.10;

/// Agreement bonus added on top of the weighted sum: `ratio * max`.
pub const AGREEMENT_BONUS_MAX: f64 = 10.0;
/// Ratio used when there are no directional votes (or direction is neutral).
pub const NEUTRAL_AGREEMENT_RATIO: f64 = 0.5;

// ---------------------------------------------------------------------------
// RSI family (0-20)
// ---------------------------------------------------------------------------
pub const RSI_FAMILY_CAP: f64 = 20.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Points per RSI unit beyond the oversold/overbought threshold.
pub const RSI_EDGE_GAIN: f64 = 1.5;
/// Neutral-zone score peaks at this value at RSI 50 and falls off linearly.
pub const RSI_NEUTRAL_PEAK: f64 = 10.0;
pub const RSI_NEUTRAL_FALLOFF: f64 = 0.2;

// ---------------------------------------------------------------------------
// MACD family (0-25)
// ---------------------------------------------------------------------------
pub const MACD_HIST_CAP: f64 = 15.0;
pub const MACD_HIST_GAIN: f64 = 50.0;
/// Crossover-proximity score: base minus the line/signal separation scaled.
pub const MACD_PROXIMITY_PEAK: f64 = 10.0;
pub const MACD_PROXIMITY_FALLOFF: f64 = 20.0;

// ---------------------------------------------------------------------------
// Bollinger family (0-25)
// ---------------------------------------------------------------------------
pub const BB_FAMILY_CAP: f64 = 25.0;
/// Normalized band positions below/above which a reversal setup is scored.
pub const BB_LOWER_ZONE: f64 = 0.1;
pub const BB_UPPER_ZONE: f64 = 0.9;
pub const BB_EDGE_GAIN: f64 = 250.0;
pub const BB_MID_PEAK: f64 = 10.0;
pub const BB_MID_FALLOFF: f64 = 20.0;
/// Bands narrower than this are treated as collapsed.
pub const BB_MIN_WIDTH: f64 = 1e-6;

// ---------------------------------------------------------------------------
// SMA family (0-20)
// ---------------------------------------------------------------------------
pub const SMA_FAMILY_CAP: f64 = 20.0;
/// Points per percent of distance between price and the SMA.
pub const SMA_DISTANCE_GAIN: f64 = 4.0;

// ---------------------------------------------------------------------------
// ADX family (0-20)
// ---------------------------------------------------------------------------
pub const ADX_FAMILY_CAP: f64 = 20.0;
/// Below this the trend is weak; between this and `ADX_STRONG` moderate.
pub const ADX_WEAK: f64 = 20.0;
pub const ADX_STRONG: f64 = 30.0;
/// ADX level that marks a market as trending (used for evidence notes).
pub const ADX_TRENDING: f64 = 25.0;
pub const ADX_STRENGTH_CAP: f64 = 15.0;
pub const ADX_CLARITY_CAP: f64 = 5.0;
pub const ADX_CLARITY_FALLOFF: f64 = 10.0;
/// DI spread (as percent of the DI mean) beyond which an extra vote is cast.
pub const DI_SPREAD_EXTRA_VOTE_PCT: f64 = 20.0;

// ---------------------------------------------------------------------------
// EMA family (0-20)
// ---------------------------------------------------------------------------
pub const EMA_FAMILY_CAP: f64 = 20.0;
pub const EMA_ALIGNMENT_SCORE: f64 = 10.0;
pub const EMA_PARTIAL_SCORE: f64 = 5.0;
/// EMA9/EMA21 separation (percent) treated as an imminent crossover.
pub const EMA_CROSSOVER_PCT: f64 = 0.5;
pub const EMA_CROSSOVER_SCORE: f64 = 5.0;
pub const EMA_PRICE_POSITION_SCORE: f64 = 5.0;

// ---------------------------------------------------------------------------
// Market-context family (0-30)
// ---------------------------------------------------------------------------
pub const CONTEXT_FAMILY_CAP: f64 = 30.0;

// Fear & Greed level bands.
pub const FG_EXTREME_GREED: f64 = 75.0;
pub const FG_GREED: f64 = 60.0;
pub const FG_FEAR: f64 = 40.0;
pub const FG_EXTREME_FEAR: f64 = 25.0;
/// Bands used when the technical direction is neutral.
pub const FG_NEUTRAL_HIGH: f64 = 70.0;
pub const FG_NEUTRAL_LOW: f64 = 30.0;

// Sub-term score bands shared by the F&G-level and market-trend terms.
pub const CONTEXT_TERM_MAX: f64 = 10.0;
pub const CONTEXT_TERM_GOOD: f64 = 7.0;
pub const CONTEXT_TERM_NEUTRAL: f64 = 5.0;
pub const CONTEXT_TERM_WEAK: f64 = 2.0;
pub const CONTEXT_TERM_INFO: f64 = 3.0;

// F&G 30-day trend term.
pub const TREND_TERM_MAX: f64 = 5.0;
pub const TREND_TERM_STABLE: f64 = 2.0;

// Volatility-pattern and BTC-dominance terms.
pub const MINOR_TERM_MAX: f64 = 3.0;
pub const MINOR_TERM_BASE: f64 = 1.0;

// 24h global market-cap change bands (percent).
pub const MARKET_STRONG_MOVE_PCT: f64 = 5.0;
pub const MARKET_MODERATE_MOVE_PCT: f64 = 2.0;

// Direct score adjustments nudged by context sub-terms.
pub const CONTEXT_STRONG_ADJUSTMENT: f64 = 10.0;
pub const CONTEXT_MILD_ADJUSTMENT: f64 = 5.0;
pub const CONTEXT_SUBTLE_ADJUSTMENT: f64 = 3.0;
pub const CONTEXT_TEMPER_ADJUSTMENT: f64 = 2.0;

// ---------------------------------------------------------------------------
// Social-sentiment family (0-20)
// ---------------------------------------------------------------------------
pub const SENTIMENT_FAMILY_CAP: f64 = 20.0;
pub const SENTIMENT_ALIGNED_SCORE: f64 = 18.0;
pub const SENTIMENT_NEUTRAL_LABEL_SCORE: f64 = 8.0;
pub const SENTIMENT_NEUTRAL_DIRECTION_SCORE: f64 = 5.0;
pub const SENTIMENT_ADJUSTMENT: f64 = 5.0;
pub const SENTIMENT_KEY_ITEM_BONUS: f64 = 2.0;
pub const SENTIMENT_KEY_ITEM_THRESHOLD: usize = 3;

// ---------------------------------------------------------------------------
// Data-quality family (0-10)
// ---------------------------------------------------------------------------
pub const DATA_QUALITY_CAP: f64 = 10.0;
