// =============================================================================
// Confidence Scorer — folds factor assessments into a single result
// =============================================================================
//
// Pipeline:
//   1. Assess each technical family (pure functions, factors.rs)
//   2. Tally directional votes => working direction
//   3. Agreement ratio over directional votes
//   4. Assess market context and social sentiment against the direction
//   5. Weighted sum over present families (weights normalized to 1)
//      + agreement bonus + context/sentiment adjustments
//   6. Clamp to [0, 100], file evidence, resolve the trading signal
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{MarketContext, SocialSentiment};
use crate::indicators::IndicatorSnapshot;
use crate::signal::resolve;
use crate::types::{Direction, TradingSignal};

use super::factors::{
    adx_factor, bollinger_factor, data_quality_factor, ema_factor, macd_factor,
    market_context_factor, rsi_factor, sma_factor, social_sentiment_factor, ContextAssessment,
    FactorAssessment, Votes,
};
use super::weights::{AGREEMENT_BONUS_MAX, NEUTRAL_AGREEMENT_RATIO};

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// The composite confidence assessment for one analysis pass. Produced
/// fresh per call and never mutated after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceResult {
    /// Aggregate confidence, clamped to [0, 100].
    pub overall_score: u8,
    pub direction: Direction,
    pub signal: TradingSignal,
    /// Sub-score per family that was actually assessed.
    pub factor_scores: BTreeMap<String, f64>,
    pub supporting_indicators: BTreeSet<String>,
    pub conflicting_indicators: BTreeSet<String>,
    /// Share of directional votes agreeing with the final direction, in
    /// [0, 1]. Neutral votes are not part of the denominator.
    pub indicator_agreement: f64,
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Score an indicator snapshot, optionally refined by broad-market context
/// and social sentiment.
///
/// Total for all well-typed inputs: missing indicators drop their families,
/// malformed optional context degrades per sub-term, and the result is
/// always a fully-populated `ConfidenceResult`.
pub fn score(
    indicators: &IndicatorSnapshot,
    current_price: Option<f64>,
    market_context: Option<&MarketContext>,
    social_sentiment: Option<&SocialSentiment>,
) -> ConfidenceResult {
    // ── 1. Technical families ────────────────────────────────────────────
    let technical: Vec<FactorAssessment> = [
        rsi_factor(indicators),
        macd_factor(indicators),
        bollinger_factor(indicators, current_price),
        sma_factor(indicators, current_price),
        adx_factor(indicators),
        ema_factor(indicators, current_price),
    ]
    .into_iter()
    .flatten()
    .collect();

    let data_quality = data_quality_factor(indicators);

    // ── 2. Direction from the vote tally ────────────────────────────────
    let mut votes = Votes::default();
    for assessment in &technical {
        votes.merge(assessment.votes);
    }

    let direction = if votes.bullish > votes.bearish {
        Direction::Bullish
    } else if votes.bearish > votes.bullish {
        Direction::Bearish
    } else {
        Direction::Neutral
    };

    // ── 3. Agreement over directional votes ──────────────────────────────
    let (agreeing, disagreeing) = match direction {
        Direction::Bullish => (votes.bullish, votes.bearish),
        Direction::Bearish => (votes.bearish, votes.bullish),
        Direction::Neutral => (0, 0),
    };
    let directional_total = agreeing + disagreeing;
    let agreement_ratio = if directional_total > 0 {
        agreeing as f64 / directional_total as f64
    } else {
        NEUTRAL_AGREEMENT_RATIO
    };

    // ── 4. Context layers, assessed against the working direction ───────
    let context = market_context.map(|c| market_context_factor(c, direction));
    let sentiment = social_sentiment.map(|s| social_sentiment_factor(s, direction));

    // ── 5. Aggregate ─────────────────────────────────────────────────────
    let mut factor_scores = BTreeMap::new();
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for assessment in technical.iter().chain(std::iter::once(&data_quality)) {
        weighted_sum += assessment.weight * assessment.score;
        weight_total += assessment.weight;
        factor_scores.insert(assessment.name.to_string(), assessment.score);
    }
    for layer in [&context, &sentiment].into_iter().flatten() {
        weighted_sum += layer.weight * layer.score;
        weight_total += layer.weight;
        factor_scores.insert(layer.name.to_string(), layer.score);
    }

    let base_score = if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    };

    let adjustment = context.as_ref().map_or(0.0, |c| c.adjustment)
        + sentiment.as_ref().map_or(0.0, |s| s.adjustment);
    let agreement_bonus = agreement_ratio * AGREEMENT_BONUS_MAX;

    let overall_score = (base_score + agreement_bonus + adjustment).clamp(0.0, 100.0).round() as u8;

    // ── 6. Evidence filing ───────────────────────────────────────────────
    let (supporting_indicators, conflicting_indicators) =
        file_evidence(&technical, &context, &sentiment, direction);

    let signal = resolve(overall_score, direction, current_price, indicators);

    debug!(
        score = overall_score,
        direction = %direction,
        signal = %signal,
        agreement = agreement_ratio,
        "confidence scoring complete"
    );

    ConfidenceResult {
        overall_score,
        direction,
        signal,
        factor_scores,
        supporting_indicators,
        conflicting_indicators,
        indicator_agreement: (agreement_ratio * 100.0).round() / 100.0,
    }
}

/// File every qualitative note into the supporting or conflicting set.
///
/// Technical notes support the final direction when their lean matches it
/// (a neutral final direction treats everything as supporting context);
/// internal divergence notes always conflict. Context-layer evidence
/// arrives pre-filed.
fn file_evidence(
    technical: &[FactorAssessment],
    context: &Option<ContextAssessment>,
    sentiment: &Option<ContextAssessment>,
    direction: Direction,
) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut supporting = BTreeSet::new();
    let mut conflicting = BTreeSet::new();

    for assessment in technical {
        for note in &assessment.notes {
            if direction == Direction::Neutral || note.lean == direction {
                supporting.insert(note.text.clone());
            } else {
                conflicting.insert(note.text.clone());
            }
        }
        for text in &assessment.internal_conflicts {
            conflicting.insert(text.clone());
        }
    }

    for layer in [context, sentiment].into_iter().flatten() {
        supporting.extend(layer.supporting.iter().cloned());
        conflicting.extend(layer.conflicting.iter().cloned());
    }

    (supporting, conflicting)
}
