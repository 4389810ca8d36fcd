// =============================================================================
// Analysis Pipeline — indicators, confidence, and signal in one pass
// =============================================================================
//
// The pure composition of the analysis core in its natural order:
//   1. Compute the indicator snapshot from the price series
//   2. Score confidence against the snapshot and optional context inputs
//      (the scorer resolves the trading signal internally)
//
// Fetching the series, context, and sentiment belongs to the enclosing I/O
// collaborators; this function is deterministic over whatever they supply.
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::confidence::{self, ConfidenceResult};
use crate::context::{MarketContext, SocialSentiment};
use crate::indicators::{self, IndicatorParams, IndicatorSnapshot};
use crate::market_data::PriceSeries;

/// The full output of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub snapshot: IndicatorSnapshot,
    pub confidence: ConfidenceResult,
}

/// Run the full pipeline over a daily price series.
pub fn analyze(
    series: &PriceSeries,
    params: &IndicatorParams,
    market_context: Option<&MarketContext>,
    social_sentiment: Option<&SocialSentiment>,
) -> Analysis {
    let snapshot = indicators::compute(series, params);
    let confidence = confidence::score(
        &snapshot,
        series.last_close(),
        market_context,
        social_sentiment,
    );

    debug!(
        bars = series.len(),
        available = snapshot.available_count(),
        score = confidence.overall_score,
        signal = %confidence.signal,
        "analysis pass complete"
    );

    Analysis {
        snapshot,
        confidence,
    }
}
