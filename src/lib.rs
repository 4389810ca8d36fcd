// =============================================================================
// Argus Core — technical-indicator and confidence analysis engine
// =============================================================================
//
// A pure, synchronous analysis core: it turns a daily OHLCV series into a
// snapshot of classical technical indicators, scores a composite 0-100
// confidence assessment with directional evidence, and derives a discrete
// five-level trading signal.
//
// The core performs no I/O, keeps no state between calls, and never fails
// for well-typed input — degradation is expressed through `None` indicator
// values, reduced data quality, and lower indicator agreement. Market data,
// macro context, and social sentiment are supplied by external
// collaborators.
// =============================================================================

pub mod analysis;
pub mod confidence;
pub mod context;
pub mod indicators;
pub mod market_data;
pub mod signal;
pub mod types;

pub use analysis::{analyze, Analysis};
pub use confidence::{score, ConfidenceResult};
pub use context::{
    BtcDominance, DominanceImplication, FearGreedIndex, FearGreedTrend, GlobalMarket,
    MarketContext, MarketVolatility, SocialSentiment, TrendDirection, VolatilityPattern,
};
pub use indicators::{compute, IndicatorParams, IndicatorSnapshot};
pub use market_data::{Candle, PriceSeries};
pub use signal::resolve;
pub use types::{Direction, TradingSignal};
