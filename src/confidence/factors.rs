// =============================================================================
// Confidence Factors — per-family sub-scores, votes, and evidence
// =============================================================================
//
// Each indicator family is assessed by a pure function returning an
// immutable record: a bounded sub-score, directional votes, and the
// qualitative notes backing them. The scorer folds these records into the
// final result; no family mutates shared state.
//
// A family is assessed only when all of its required inputs are present —
// a missing input drops the family entirely rather than contributing zero.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::context::{
    DominanceImplication, MarketContext, SocialSentiment, TrendDirection, VolatilityPattern,
};
use crate::indicators::IndicatorSnapshot;
use crate::types::Direction;

use super::weights::*;

// ---------------------------------------------------------------------------
// Assessment records
// ---------------------------------------------------------------------------

/// Directional vote tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Votes {
    pub bullish: u32,
    pub bearish: u32,
    pub neutral: u32,
}

impl Votes {
    fn cast(&mut self, direction: Direction, count: u32) {
        match direction {
            Direction::Bullish => self.bullish += count,
            Direction::Bearish => self.bearish += count,
            Direction::Neutral => self.neutral += count,
        }
    }

    pub fn merge(&mut self, other: Votes) {
        self.bullish += other.bullish;
        self.bearish += other.bearish;
        self.neutral += other.neutral;
    }
}

/// A qualitative observation with the direction it leans toward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub text: String,
    pub lean: Direction,
}

/// The contribution of one technical indicator family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorAssessment {
    pub name: &'static str,
    pub weight: f64,
    pub score: f64,
    pub votes: Votes,
    pub notes: Vec<Note>,
    /// Observations that contradict the family's own reading; always filed
    /// as conflicting evidence regardless of the final direction.
    pub internal_conflicts: Vec<String>,
}

impl FactorAssessment {
    fn new(name: &'static str, weight: f64) -> Self {
        Self {
            name,
            weight,
            score: 0.0,
            votes: Votes::default(),
            notes: Vec::new(),
            internal_conflicts: Vec::new(),
        }
    }

    fn note(&mut self, lean: Direction, text: impl Into<String>) {
        self.notes.push(Note {
            text: text.into(),
            lean,
        });
    }
}

/// The contribution of a context-layer family (market context or social
/// sentiment). These are assessed against an already-known working
/// direction, so their evidence arrives pre-filed and they carry a direct
/// score adjustment on top of the weighted sub-score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextAssessment {
    pub name: &'static str,
    pub weight: f64,
    pub score: f64,
    pub adjustment: f64,
    pub supporting: Vec<String>,
    pub conflicting: Vec<String>,
}

// ---------------------------------------------------------------------------
// Technical families
// ---------------------------------------------------------------------------

/// RSI family (0-20): the deeper into oversold/overbought territory, the
/// stronger the (contrarian) reversal evidence.
pub fn rsi_factor(snapshot: &IndicatorSnapshot) -> Option<FactorAssessment> {
    let rsi = snapshot.rsi?;
    let mut factor = FactorAssessment::new("rsi", RSI_WEIGHT);

    if rsi < RSI_OVERSOLD {
        factor.score = ((RSI_OVERSOLD - rsi) * RSI_EDGE_GAIN).min(RSI_FAMILY_CAP);
        factor.votes.cast(Direction::Bullish, 1);
        factor.note(Direction::Bullish, "RSI oversold (<30)");
    } else if rsi > RSI_OVERBOUGHT {
        factor.score = ((rsi - RSI_OVERBOUGHT) * RSI_EDGE_GAIN).min(RSI_FAMILY_CAP);
        factor.votes.cast(Direction::Bearish, 1);
        factor.note(Direction::Bearish, "RSI overbought (>70)");
    } else {
        // Neutral zone: low contribution, highest near the midpoint.
        factor.score = (RSI_NEUTRAL_PEAK - (50.0 - rsi).abs() * RSI_NEUTRAL_FALLOFF).max(0.0);
        factor.votes.cast(Direction::Neutral, 1);
    }

    Some(factor)
}

/// MACD family (0-25): histogram magnitude plus crossover proximity. The
/// vote requires line and histogram to agree in sign; a disagreement is a
/// divergence and is recorded as an internal conflict.
pub fn macd_factor(snapshot: &IndicatorSnapshot) -> Option<FactorAssessment> {
    let macd = snapshot.macd?;
    let signal = snapshot.macd_signal?;
    let hist = snapshot.macd_hist?;

    let mut factor = FactorAssessment::new("macd", MACD_WEIGHT);

    let hist_score = (hist.abs() * MACD_HIST_GAIN).min(MACD_HIST_CAP);
    let proximity_score =
        (MACD_PROXIMITY_PEAK - (macd - signal).abs() * MACD_PROXIMITY_FALLOFF).max(0.0);
    factor.score = hist_score + proximity_score;

    if macd > signal && hist > 0.0 {
        factor.votes.cast(Direction::Bullish, 1);
        factor.note(
            Direction::Bullish,
            "MACD bullish crossover with positive histogram",
        );
    } else if macd < signal && hist < 0.0 {
        factor.votes.cast(Direction::Bearish, 1);
        factor.note(
            Direction::Bearish,
            "MACD bearish crossover with negative histogram",
        );
    } else {
        factor.votes.cast(Direction::Neutral, 1);
        if (macd > signal && hist < 0.0) || (macd < signal && hist > 0.0) {
            factor
                .internal_conflicts
                .push("MACD line/histogram divergence".to_string());
        }
    }

    Some(factor)
}

/// Bollinger family (0-25): normalized position of price within the bands.
/// Near either band is a reversal setup; mid-band is unremarkable.
pub fn bollinger_factor(snapshot: &IndicatorSnapshot, price: Option<f64>) -> Option<FactorAssessment> {
    let upper = snapshot.bb_upper?;
    let lower = snapshot.bb_lower?;
    snapshot.bb_middle?;
    let price = price?;

    let mut factor = FactorAssessment::new("bb", BOLLINGER_WEIGHT);

    let width = upper - lower;
    if width <= BB_MIN_WIDTH {
        // Collapsed bands carry no positional information.
        return Some(factor);
    }

    let position = (price - lower) / width; // 0 = lower band, 1 = upper band
    if position < BB_LOWER_ZONE {
        factor.score = ((BB_LOWER_ZONE - position) * BB_EDGE_GAIN).min(BB_FAMILY_CAP);
        factor.votes.cast(Direction::Bullish, 1);
        factor.note(Direction::Bullish, "Price near lower Bollinger Band");
    } else if position > BB_UPPER_ZONE {
        factor.score = ((position - BB_UPPER_ZONE) * BB_EDGE_GAIN).min(BB_FAMILY_CAP);
        factor.votes.cast(Direction::Bearish, 1);
        factor.note(Direction::Bearish, "Price near upper Bollinger Band");
    } else {
        factor.score = (BB_MID_PEAK - (0.5 - position).abs() * BB_MID_FALLOFF).max(0.0);
        factor.votes.cast(Direction::Neutral, 1);
    }

    Some(factor)
}

/// SMA family (0-20): percentage distance of price from the 50-day SMA,
/// voting with the side of the break.
pub fn sma_factor(snapshot: &IndicatorSnapshot, price: Option<f64>) -> Option<FactorAssessment> {
    let sma = snapshot.sma_50?;
    let price = price?;

    let mut factor = FactorAssessment::new("sma", SMA_WEIGHT);

    let pct_distance = if sma != 0.0 {
        (price - sma).abs() / sma * 100.0
    } else {
        0.0
    };
    factor.score = (pct_distance * SMA_DISTANCE_GAIN).min(SMA_FAMILY_CAP);

    if price > sma {
        factor.votes.cast(Direction::Bullish, 1);
        factor.note(Direction::Bullish, "Price above SMA 50");
    } else if price < sma {
        factor.votes.cast(Direction::Bearish, 1);
        factor.note(Direction::Bearish, "Price below SMA 50");
    } else {
        factor.votes.cast(Direction::Neutral, 1);
    }

    Some(factor)
}

/// ADX family (0-20): trend strength from the ADX level plus directional
/// clarity from the DI spread. A wide spread casts an extra vote.
pub fn adx_factor(snapshot: &IndicatorSnapshot) -> Option<FactorAssessment> {
    let adx = snapshot.adx?;
    let plus_di = snapshot.adx_plus_di?;
    let minus_di = snapshot.adx_minus_di?;

    let mut factor = FactorAssessment::new("adx", ADX_WEIGHT);

    let (strength, strength_desc) = if adx < ADX_WEAK {
        (adx / 2.0, "Weak")
    } else if adx < ADX_STRONG {
        (10.0 + (adx - ADX_WEAK) / 2.0, "Moderate")
    } else {
        (ADX_STRENGTH_CAP, "Strong")
    };

    let di_sum = plus_di + minus_di;
    let di_spread_pct = if di_sum > 0.0 {
        (plus_di - minus_di).abs() / (di_sum / 2.0) * 100.0
    } else {
        0.0
    };
    let clarity = (di_spread_pct / ADX_CLARITY_FALLOFF).min(ADX_CLARITY_CAP);
    factor.score = (strength + clarity).min(ADX_FAMILY_CAP);

    if plus_di > minus_di {
        factor.votes.cast(Direction::Bullish, 1);
        if di_spread_pct > DI_SPREAD_EXTRA_VOTE_PCT {
            factor.votes.cast(Direction::Bullish, 1);
            factor.note(
                Direction::Bullish,
                format!("Strong ADX bullish signal (DI+ > DI- by {di_spread_pct:.1}%)"),
            );
        } else {
            factor.note(Direction::Bullish, "ADX bullish (DI+ > DI-)");
        }
        if adx > ADX_TRENDING {
            factor.note(
                Direction::Bullish,
                format!("{strength_desc} trend (ADX={adx:.1})"),
            );
        }
    } else if minus_di > plus_di {
        factor.votes.cast(Direction::Bearish, 1);
        if di_spread_pct > DI_SPREAD_EXTRA_VOTE_PCT {
            factor.votes.cast(Direction::Bearish, 1);
            factor.note(
                Direction::Bearish,
                format!("Strong ADX bearish signal (DI- > DI+ by {di_spread_pct:.1}%)"),
            );
        } else {
            factor.note(Direction::Bearish, "ADX bearish (DI- > DI+)");
        }
        if adx > ADX_TRENDING {
            factor.note(
                Direction::Bearish,
                format!("{strength_desc} trend (ADX={adx:.1})"),
            );
        }
    } else {
        factor.votes.cast(Direction::Neutral, 1);
        factor.note(Direction::Neutral, "No clear trend direction (DI+ ≈ DI-)");
    }

    Some(factor)
}

/// EMA family (0-20): stack alignment, imminent 9/21 crossovers, and the
/// position of price relative to the stack. Full alignment casts a double
/// vote.
pub fn ema_factor(snapshot: &IndicatorSnapshot, price: Option<f64>) -> Option<FactorAssessment> {
    let ema_9 = snapshot.ema_9?;
    let ema_21 = snapshot.ema_21?;
    let ema_55 = snapshot.ema_55?;
    let price = price?;

    let mut factor = FactorAssessment::new("ema", EMA_WEIGHT);
    let mut score = 0.0;

    if ema_9 > ema_21 && ema_21 > ema_55 {
        score += EMA_ALIGNMENT_SCORE;
        factor.votes.cast(Direction::Bullish, 2);
        factor.note(Direction::Bullish, "Strong bullish EMA alignment (9 > 21 > 55)");
    } else if ema_9 < ema_21 && ema_21 < ema_55 {
        score += EMA_ALIGNMENT_SCORE;
        factor.votes.cast(Direction::Bearish, 2);
        factor.note(Direction::Bearish, "Strong bearish EMA alignment (9 < 21 < 55)");
    } else if ema_9 > ema_21 {
        score += EMA_PARTIAL_SCORE;
        factor.votes.cast(Direction::Bullish, 1);
        factor.note(Direction::Bullish, "Short-term bullish (EMA9 > EMA21)");
    } else if ema_9 < ema_21 {
        score += EMA_PARTIAL_SCORE;
        factor.votes.cast(Direction::Bearish, 1);
        factor.note(Direction::Bearish, "Short-term bearish (EMA9 < EMA21)");
    }

    // Near-equal EMA9/EMA21 approximates a crossover in progress.
    let separation_pct = if ema_21 != 0.0 {
        (ema_9 - ema_21).abs() / ema_21 * 100.0
    } else {
        0.0
    };
    if separation_pct < EMA_CROSSOVER_PCT {
        score += EMA_CROSSOVER_SCORE;
        if ema_9 > ema_21 {
            factor.votes.cast(Direction::Bullish, 1);
            factor.note(Direction::Bullish, "Potential bullish EMA9/21 crossover");
        } else {
            factor.votes.cast(Direction::Bearish, 1);
            factor.note(Direction::Bearish, "Potential bearish EMA9/21 crossover");
        }
    }

    if price > ema_55 {
        score += EMA_PRICE_POSITION_SCORE;
        factor.votes.cast(Direction::Bullish, 1);
        factor.note(Direction::Bullish, "Price above EMA55");
    } else if price < ema_55 {
        score += EMA_PRICE_POSITION_SCORE;
        factor.votes.cast(Direction::Bearish, 1);
        factor.note(Direction::Bearish, "Price below EMA55");
    }

    if price > ema_9 && price > ema_21 && price > ema_55 {
        factor.votes.cast(Direction::Bullish, 1);
        factor.note(Direction::Bullish, "Price above all EMAs");
    } else if price < ema_9 && price < ema_21 && price < ema_55 {
        factor.votes.cast(Direction::Bearish, 1);
        factor.note(Direction::Bearish, "Price below all EMAs");
    }

    factor.score = score.min(EMA_FAMILY_CAP);
    Some(factor)
}

/// Data-quality family (0-10): fraction of the fixed indicator set that
/// carries a value. Always present; casts no votes.
pub fn data_quality_factor(snapshot: &IndicatorSnapshot) -> FactorAssessment {
    let mut factor = FactorAssessment::new("data_quality", DATA_QUALITY_WEIGHT);
    let available = snapshot.available_count() as f64;
    let expected = IndicatorSnapshot::EXPECTED_KEYS as f64;
    factor.score = (available / expected * DATA_QUALITY_CAP).min(DATA_QUALITY_CAP);
    factor
}

// ---------------------------------------------------------------------------
// Context-layer families
// ---------------------------------------------------------------------------

/// Market-context family (0-30): fear/greed level (contrarian), its 30-day
/// trend, the 24h global-cap move, the volatility pattern, and the BTC
/// dominance implication — each confirming or conflicting with the working
/// direction and nudging a direct score adjustment.
pub fn market_context_factor(context: &MarketContext, direction: Direction) -> ContextAssessment {
    let mut score = 0.0;
    let mut adjustment = 0.0;
    let mut supporting = Vec::new();
    let mut conflicting = Vec::new();

    // --- Fear & Greed level (contrarian) ---------------------------------
    if let Some(fg) = &context.fear_greed {
        if !fg.value.is_finite() {
            warn!(value = fg.value, "non-finite fear/greed value, skipping");
        } else {
            let v = fg.value;
            match direction {
                Direction::Bullish => {
                    if v > FG_EXTREME_GREED {
                        adjustment -= CONTEXT_STRONG_ADJUSTMENT;
                        conflicting.push(format!(
                            "Context: Extreme Greed ({v:.0}) conflicts with bullish signal"
                        ));
                    } else if v > FG_GREED {
                        score += CONTEXT_TERM_WEAK;
                        adjustment -= CONTEXT_MILD_ADJUSTMENT;
                        conflicting.push(format!(
                            "Context: Greed ({v:.0}) slightly conflicts with bullish signal"
                        ));
                    } else if v < FG_EXTREME_FEAR {
                        score += CONTEXT_TERM_MAX;
                        adjustment += CONTEXT_STRONG_ADJUSTMENT;
                        supporting.push(format!(
                            "Context: Extreme Fear ({v:.0}) strongly supports bullish signal (contrarian)"
                        ));
                    } else if v < FG_FEAR {
                        score += CONTEXT_TERM_GOOD;
                        adjustment += CONTEXT_MILD_ADJUSTMENT;
                        supporting.push(format!(
                            "Context: Fear ({v:.0}) supports bullish signal (contrarian)"
                        ));
                    } else {
                        score += CONTEXT_TERM_NEUTRAL;
                    }
                }
                Direction::Bearish => {
                    if v > FG_EXTREME_GREED {
                        score += CONTEXT_TERM_MAX;
                        adjustment += CONTEXT_STRONG_ADJUSTMENT;
                        supporting.push(format!(
                            "Context: Extreme Greed ({v:.0}) strongly supports bearish signal"
                        ));
                    } else if v > FG_GREED {
                        score += CONTEXT_TERM_GOOD;
                        adjustment += CONTEXT_MILD_ADJUSTMENT;
                        supporting.push(format!(
                            "Context: Greed ({v:.0}) supports bearish signal"
                        ));
                    } else if v < FG_EXTREME_FEAR {
                        adjustment -= CONTEXT_STRONG_ADJUSTMENT;
                        conflicting.push(format!(
                            "Context: Extreme Fear ({v:.0}) conflicts with bearish signal (contrarian)"
                        ));
                    } else if v < FG_FEAR {
                        score += CONTEXT_TERM_WEAK;
                        adjustment -= CONTEXT_MILD_ADJUSTMENT;
                        conflicting.push(format!(
                            "Context: Fear ({v:.0}) slightly conflicts with bearish signal (contrarian)"
                        ));
                    } else {
                        score += CONTEXT_TERM_NEUTRAL;
                    }
                }
                Direction::Neutral => {
                    // Extreme sentiment either way is still information.
                    if v > FG_NEUTRAL_HIGH || v < FG_NEUTRAL_LOW {
                        score += CONTEXT_TERM_NEUTRAL;
                    } else {
                        score += CONTEXT_TERM_INFO;
                    }
                }
            }
        }
    }

    // --- Fear & Greed 30-day trend (momentum-aligned) --------------------
    if let Some(trend) = &context.fear_greed_trend {
        match (direction, trend.direction) {
            (Direction::Bullish, TrendDirection::Rising) => {
                score += TREND_TERM_MAX;
                adjustment += CONTEXT_SUBTLE_ADJUSTMENT;
                supporting.push(
                    "Context: Improving Fear & Greed trend (30d) supports bullish signal"
                        .to_string(),
                );
            }
            (Direction::Bullish, TrendDirection::Falling) => {
                adjustment -= CONTEXT_SUBTLE_ADJUSTMENT;
                conflicting.push(
                    "Context: Deteriorating Fear & Greed trend (30d) conflicts with bullish signal"
                        .to_string(),
                );
            }
            (Direction::Bearish, TrendDirection::Falling) => {
                score += TREND_TERM_MAX;
                adjustment += CONTEXT_SUBTLE_ADJUSTMENT;
                supporting.push(
                    "Context: Deteriorating Fear & Greed trend (30d) supports bearish signal"
                        .to_string(),
                );
            }
            (Direction::Bearish, TrendDirection::Rising) => {
                adjustment -= CONTEXT_SUBTLE_ADJUSTMENT;
                conflicting.push(
                    "Context: Improving Fear & Greed trend (30d) conflicts with bearish signal"
                        .to_string(),
                );
            }
            _ => score += TREND_TERM_STABLE,
        }
    }

    // --- 24h global market-cap change (momentum-aligned) -----------------
    if let Some(cap_change) = context
        .global_market
        .as_ref()
        .and_then(|g| g.market_cap_change_percentage_24h)
    {
        if !cap_change.is_finite() {
            warn!(cap_change, "non-finite market-cap change, skipping");
        } else {
            match direction {
                Direction::Bullish => {
                    if cap_change < -MARKET_STRONG_MOVE_PCT {
                        adjustment -= CONTEXT_STRONG_ADJUSTMENT;
                        conflicting.push(format!(
                            "Context: Strong market down ({cap_change:.2}%) conflicts with bullish signal"
                        ));
                    } else if cap_change < -MARKET_MODERATE_MOVE_PCT {
                        score += CONTEXT_TERM_WEAK;
                        adjustment -= CONTEXT_MILD_ADJUSTMENT;
                        conflicting.push(format!(
                            "Context: Market down ({cap_change:.2}%) conflicts with bullish signal"
                        ));
                    } else if cap_change > MARKET_STRONG_MOVE_PCT {
                        score += CONTEXT_TERM_MAX;
                        adjustment += CONTEXT_STRONG_ADJUSTMENT;
                        supporting.push(format!(
                            "Context: Strong market up ({cap_change:.2}%) strongly supports bullish signal"
                        ));
                    } else if cap_change > MARKET_MODERATE_MOVE_PCT {
                        score += CONTEXT_TERM_GOOD;
                        adjustment += CONTEXT_MILD_ADJUSTMENT;
                        supporting.push(format!(
                            "Context: Market up ({cap_change:.2}%) supports bullish signal"
                        ));
                    } else {
                        score += CONTEXT_TERM_NEUTRAL;
                    }
                }
                Direction::Bearish => {
                    if cap_change < -MARKET_STRONG_MOVE_PCT {
                        score += CONTEXT_TERM_MAX;
                        adjustment += CONTEXT_STRONG_ADJUSTMENT;
                        supporting.push(format!(
                            "Context: Strong market down ({cap_change:.2}%) strongly supports bearish signal"
                        ));
                    } else if cap_change < -MARKET_MODERATE_MOVE_PCT {
                        score += CONTEXT_TERM_GOOD;
                        adjustment += CONTEXT_MILD_ADJUSTMENT;
                        supporting.push(format!(
                            "Context: Market down ({cap_change:.2}%) supports bearish signal"
                        ));
                    } else if cap_change > MARKET_STRONG_MOVE_PCT {
                        adjustment -= CONTEXT_STRONG_ADJUSTMENT;
                        conflicting.push(format!(
                            "Context: Strong market up ({cap_change:.2}%) conflicts with bearish signal"
                        ));
                    } else if cap_change > MARKET_MODERATE_MOVE_PCT {
                        score += CONTEXT_TERM_WEAK;
                        adjustment -= CONTEXT_MILD_ADJUSTMENT;
                        conflicting.push(format!(
                            "Context: Market up ({cap_change:.2}%) conflicts with bearish signal"
                        ));
                    } else {
                        score += CONTEXT_TERM_NEUTRAL;
                    }
                }
                Direction::Neutral => {
                    if cap_change.abs() > MARKET_STRONG_MOVE_PCT {
                        score += CONTEXT_TERM_NEUTRAL;
                    } else {
                        score += CONTEXT_TERM_INFO;
                    }
                }
            }
        }
    }

    // --- Volatility pattern ----------------------------------------------
    if let Some(volatility) = &context.market_volatility {
        match (direction, volatility.pattern) {
            (Direction::Bullish | Direction::Bearish, VolatilityPattern::High) => {
                score += MINOR_TERM_MAX;
                adjustment += CONTEXT_SUBTLE_ADJUSTMENT;
                supporting.push(format!(
                    "Context: High volatility amplifies {direction} signal"
                ));
            }
            (Direction::Bullish | Direction::Bearish, VolatilityPattern::Low) => {
                adjustment -= CONTEXT_TEMPER_ADJUSTMENT;
                conflicting.push(format!(
                    "Context: Low volatility tempers {direction} signal"
                ));
            }
            (Direction::Neutral, VolatilityPattern::Low) => {
                score += MINOR_TERM_MAX;
                supporting.push(
                    "Context: Low volatility supports neutral outlook".to_string(),
                );
            }
            _ => score += MINOR_TERM_BASE,
        }
    }

    // --- BTC dominance implication ---------------------------------------
    if let Some(dominance) = &context.btc_dominance {
        match (direction, dominance.implication) {
            (Direction::Bullish, DominanceImplication::AltcoinBullish) => {
                score += MINOR_TERM_MAX;
                adjustment += CONTEXT_SUBTLE_ADJUSTMENT;
                supporting.push(
                    "Context: Altcoin-bullish BTC dominance supports bullish signal".to_string(),
                );
            }
            (Direction::Bullish, DominanceImplication::AltcoinBearish) => {
                adjustment -= CONTEXT_SUBTLE_ADJUSTMENT;
                conflicting.push(
                    "Context: Altcoin-bearish BTC dominance conflicts with bullish signal"
                        .to_string(),
                );
            }
            (Direction::Bearish, DominanceImplication::AltcoinBearish) => {
                score += MINOR_TERM_MAX;
                adjustment += CONTEXT_SUBTLE_ADJUSTMENT;
                supporting.push(
                    "Context: Altcoin-bearish BTC dominance supports bearish signal".to_string(),
                );
            }
            (Direction::Bearish, DominanceImplication::AltcoinBullish) => {
                adjustment -= CONTEXT_SUBTLE_ADJUSTMENT;
                conflicting.push(
                    "Context: Altcoin-bullish BTC dominance conflicts with bearish signal"
                        .to_string(),
                );
            }
            _ => score += MINOR_TERM_BASE,
        }
    }

    ContextAssessment {
        name: "market_context",
        weight: CONTEXT_WEIGHT,
        score: score.min(CONTEXT_FAMILY_CAP),
        adjustment,
        supporting,
        conflicting,
    }
}

/// Social-sentiment family (0-20): alignment between the summarized social
/// read and the working technical direction.
pub fn social_sentiment_factor(
    sentiment: &SocialSentiment,
    direction: Direction,
) -> ContextAssessment {
    let mut score;
    let mut adjustment = 0.0;
    let mut supporting = Vec::new();
    let mut conflicting = Vec::new();

    let label = sentiment.overall_sentiment;
    let opposed = label != Direction::Neutral
        && direction != Direction::Neutral
        && label == direction.opposite();

    if label == Direction::Neutral {
        score = SENTIMENT_NEUTRAL_LABEL_SCORE;
    } else if direction == Direction::Neutral {
        score = SENTIMENT_NEUTRAL_DIRECTION_SCORE;
    } else if label == direction {
        score = SENTIMENT_ALIGNED_SCORE;
        adjustment += SENTIMENT_ADJUSTMENT;
        supporting.push(format!(
            "Twitter: {} sentiment strongly supports {direction} technical signals",
            title(label)
        ));
    } else {
        score = 0.0;
        adjustment -= SENTIMENT_ADJUSTMENT;
        conflicting.push(format!(
            "Twitter: {} sentiment conflicts with {direction} technical signals",
            title(label)
        ));
    }

    // Breadth bonus: several distinct corroborating posts.
    let distinct_items: BTreeSet<&str> = sentiment.key_items.iter().map(String::as_str).collect();
    if distinct_items.len() >= SENTIMENT_KEY_ITEM_THRESHOLD && !opposed {
        score = (score + SENTIMENT_KEY_ITEM_BONUS).min(SENTIMENT_FAMILY_CAP);
    }

    ContextAssessment {
        name: "social_sentiment",
        weight: SENTIMENT_WEIGHT,
        score,
        adjustment,
        supporting,
        conflicting,
    }
}

/// Capitalized form for evidence text.
fn title(direction: Direction) -> &'static str {
    match direction {
        Direction::Bullish => "Bullish",
        Direction::Bearish => "Bearish",
        Direction::Neutral => "Neutral",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{BtcDominance, FearGreedIndex, GlobalMarket, MarketVolatility};

    fn snapshot_with(f: impl FnOnce(&mut IndicatorSnapshot)) -> IndicatorSnapshot {
        let mut snapshot = IndicatorSnapshot::default();
        f(&mut snapshot);
        snapshot
    }

    // ---- RSI -------------------------------------------------------------

    #[test]
    fn rsi_missing_drops_family() {
        assert!(rsi_factor(&IndicatorSnapshot::default()).is_none());
    }

    #[test]
    fn rsi_oversold_votes_bullish() {
        let factor = rsi_factor(&snapshot_with(|s| s.rsi = Some(20.0))).unwrap();
        assert_eq!(factor.votes.bullish, 1);
        assert!((factor.score - 15.0).abs() < 1e-10); // (30-20)*1.5
        assert_eq!(factor.notes[0].text, "RSI oversold (<30)");
    }

    #[test]
    fn rsi_overbought_votes_bearish() {
        let factor = rsi_factor(&snapshot_with(|s| s.rsi = Some(85.0))).unwrap();
        assert_eq!(factor.votes.bearish, 1);
        assert!((factor.score - 20.0).abs() < 1e-10); // capped at 20
    }

    #[test]
    fn rsi_neutral_zone_scores_low() {
        let factor = rsi_factor(&snapshot_with(|s| s.rsi = Some(50.0))).unwrap();
        assert_eq!(factor.votes.neutral, 1);
        assert!((factor.score - 10.0).abs() < 1e-10);
        assert!(factor.notes.is_empty());
    }

    #[test]
    fn rsi_oversold_score_monotone_as_rsi_falls() {
        let mut last = -1.0;
        for rsi in [29.0, 25.0, 20.0, 15.0, 10.0, 5.0, 1.0] {
            let factor = rsi_factor(&snapshot_with(|s| s.rsi = Some(rsi))).unwrap();
            assert!(
                factor.score >= last,
                "score decreased at rsi={rsi}: {} < {last}",
                factor.score
            );
            last = factor.score;
        }
    }

    // ---- MACD ------------------------------------------------------------

    #[test]
    fn macd_requires_all_three_values() {
        let partial = snapshot_with(|s| {
            s.macd = Some(1.0);
            s.macd_signal = Some(0.5);
        });
        assert!(macd_factor(&partial).is_none());
    }

    #[test]
    fn macd_bullish_alignment_votes() {
        let snapshot = snapshot_with(|s| {
            s.macd = Some(1.0);
            s.macd_signal = Some(0.8);
            s.macd_hist = Some(0.2);
        });
        let factor = macd_factor(&snapshot).unwrap();
        assert_eq!(factor.votes.bullish, 1);
        assert!(factor.internal_conflicts.is_empty());
        // hist 0.2*50 = 10, proximity 10 - 0.2*20 = 6.
        assert!((factor.score - 16.0).abs() < 1e-10);
    }

    #[test]
    fn macd_divergence_is_internal_conflict() {
        // Line above signal but histogram negative: disagreement.
        let snapshot = snapshot_with(|s| {
            s.macd = Some(1.0);
            s.macd_signal = Some(0.8);
            s.macd_hist = Some(-0.1);
        });
        let factor = macd_factor(&snapshot).unwrap();
        assert_eq!(factor.votes.neutral, 1);
        assert_eq!(factor.internal_conflicts.len(), 1);
    }

    // ---- Bollinger ---------------------------------------------------------

    fn bb_snapshot() -> IndicatorSnapshot {
        snapshot_with(|s| {
            s.bb_upper = Some(110.0);
            s.bb_middle = Some(100.0);
            s.bb_lower = Some(90.0);
        })
    }

    #[test]
    fn bollinger_requires_price() {
        assert!(bollinger_factor(&bb_snapshot(), None).is_none());
    }

    #[test]
    fn bollinger_near_lower_band_votes_bullish() {
        let factor = bollinger_factor(&bb_snapshot(), Some(90.2)).unwrap();
        assert_eq!(factor.votes.bullish, 1);
        assert!(factor.score > 20.0, "expected strong edge score, got {}", factor.score);
    }

    #[test]
    fn bollinger_near_upper_band_votes_bearish() {
        let factor = bollinger_factor(&bb_snapshot(), Some(109.8)).unwrap();
        assert_eq!(factor.votes.bearish, 1);
    }

    #[test]
    fn bollinger_mid_band_neutral() {
        let factor = bollinger_factor(&bb_snapshot(), Some(100.0)).unwrap();
        assert_eq!(factor.votes.neutral, 1);
        assert!((factor.score - 10.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_collapsed_bands_score_zero() {
        let snapshot = snapshot_with(|s| {
            s.bb_upper = Some(100.0);
            s.bb_middle = Some(100.0);
            s.bb_lower = Some(100.0);
        });
        let factor = bollinger_factor(&snapshot, Some(100.0)).unwrap();
        assert_eq!(factor.score, 0.0);
        assert_eq!(factor.votes, Votes::default());
    }

    // ---- SMA ---------------------------------------------------------------

    #[test]
    fn sma_break_above_votes_bullish() {
        let snapshot = snapshot_with(|s| s.sma_50 = Some(100.0));
        let factor = sma_factor(&snapshot, Some(103.0)).unwrap();
        assert_eq!(factor.votes.bullish, 1);
        assert!((factor.score - 12.0).abs() < 1e-10); // 3% * 4
    }

    #[test]
    fn sma_break_below_votes_bearish() {
        let snapshot = snapshot_with(|s| s.sma_50 = Some(100.0));
        let factor = sma_factor(&snapshot, Some(90.0)).unwrap();
        assert_eq!(factor.votes.bearish, 1);
        assert!((factor.score - 20.0).abs() < 1e-10); // 10% * 4 capped
    }

    // ---- ADX ---------------------------------------------------------------

    #[test]
    fn adx_wide_spread_casts_extra_vote() {
        let snapshot = snapshot_with(|s| {
            s.adx = Some(35.0);
            s.adx_plus_di = Some(30.0);
            s.adx_minus_di = Some(10.0);
        });
        let factor = adx_factor(&snapshot).unwrap();
        // Spread = 20 / 20 * 100 = 100% > 20% => two bullish votes.
        assert_eq!(factor.votes.bullish, 2);
        assert!((factor.score - 20.0).abs() < 1e-10); // 15 strength + 5 clarity
        assert!(factor.notes.iter().any(|n| n.text.contains("Strong trend")));
    }

    #[test]
    fn adx_weak_trend_scores_low() {
        let snapshot = snapshot_with(|s| {
            s.adx = Some(10.0);
            s.adx_plus_di = Some(20.0);
            s.adx_minus_di = Some(19.0);
        });
        let factor = adx_factor(&snapshot).unwrap();
        assert_eq!(factor.votes.bullish, 1);
        assert!(factor.score < 6.0);
    }

    #[test]
    fn adx_equal_di_is_neutral() {
        let snapshot = snapshot_with(|s| {
            s.adx = Some(30.0);
            s.adx_plus_di = Some(20.0);
            s.adx_minus_di = Some(20.0);
        });
        let factor = adx_factor(&snapshot).unwrap();
        assert_eq!(factor.votes.neutral, 1);
    }

    // ---- EMA ---------------------------------------------------------------

    #[test]
    fn ema_full_bullish_alignment() {
        let snapshot = snapshot_with(|s| {
            s.ema_9 = Some(110.0);
            s.ema_21 = Some(105.0);
            s.ema_55 = Some(100.0);
        });
        let factor = ema_factor(&snapshot, Some(112.0)).unwrap();
        // 2 alignment + 1 above EMA55 + 1 above all.
        assert_eq!(factor.votes.bullish, 4);
        assert!((factor.score - 20.0).abs() < 1e-10); // 10 + 5 + 5, capped
    }

    #[test]
    fn ema_partial_bearish() {
        let snapshot = snapshot_with(|s| {
            s.ema_9 = Some(99.0);
            s.ema_21 = Some(101.0);
            s.ema_55 = Some(100.0);
        });
        let factor = ema_factor(&snapshot, Some(100.5)).unwrap();
        // Partial bearish (9 < 21) + price above EMA55.
        assert_eq!(factor.votes.bearish, 1);
        assert_eq!(factor.votes.bullish, 1);
    }

    #[test]
    fn ema_imminent_crossover_bonus() {
        let snapshot = snapshot_with(|s| {
            s.ema_9 = Some(100.2);
            s.ema_21 = Some(100.0);
            s.ema_55 = Some(90.0);
        });
        let factor = ema_factor(&snapshot, Some(101.0)).unwrap();
        assert!(factor
            .notes
            .iter()
            .any(|n| n.text.contains("crossover")));
    }

    // ---- Data quality ------------------------------------------------------

    #[test]
    fn data_quality_scales_with_available_keys() {
        let snapshot = snapshot_with(|s| {
            s.rsi = Some(50.0);
            s.sma_50 = Some(100.0);
        });
        let factor = data_quality_factor(&snapshot);
        assert!((factor.score - 2.0 / 14.0 * 10.0).abs() < 1e-10);

        let empty = data_quality_factor(&IndicatorSnapshot::default());
        assert_eq!(empty.score, 0.0);
    }

    // ---- Market context ----------------------------------------------------

    #[test]
    fn extreme_greed_conflicts_with_bullish() {
        let context = MarketContext {
            fear_greed: Some(FearGreedIndex {
                value: 90.0,
                classification: Some("Extreme Greed".to_string()),
            }),
            ..Default::default()
        };
        let assessment = market_context_factor(&context, Direction::Bullish);
        assert_eq!(assessment.score, 0.0);
        assert!(assessment.adjustment < 0.0);
        assert_eq!(assessment.conflicting.len(), 1);
        assert!(assessment.conflicting[0].contains("Extreme Greed (90)"));
    }

    #[test]
    fn extreme_fear_supports_bullish_contrarian() {
        let context = MarketContext {
            fear_greed: Some(FearGreedIndex {
                value: 18.0,
                classification: Some("Extreme Fear".to_string()),
            }),
            ..Default::default()
        };
        let assessment = market_context_factor(&context, Direction::Bullish);
        assert!((assessment.score - 10.0).abs() < 1e-10);
        assert!((assessment.adjustment - 10.0).abs() < 1e-10);
        assert!(assessment.supporting[0].contains("contrarian"));
    }

    #[test]
    fn strong_market_down_supports_bearish() {
        let context = MarketContext {
            global_market: Some(GlobalMarket {
                market_cap_change_percentage_24h: Some(-6.5),
            }),
            ..Default::default()
        };
        let assessment = market_context_factor(&context, Direction::Bearish);
        assert!((assessment.score - 10.0).abs() < 1e-10);
        assert!((assessment.adjustment - 10.0).abs() < 1e-10);
    }

    #[test]
    fn high_volatility_amplifies_direction() {
        let context = MarketContext {
            market_volatility: Some(MarketVolatility {
                pattern: VolatilityPattern::High,
                average_24h_move: Some(8.0),
            }),
            ..Default::default()
        };
        let assessment = market_context_factor(&context, Direction::Bearish);
        assert!((assessment.score - 3.0).abs() < 1e-10);
        assert!(assessment.adjustment > 0.0);
    }

    #[test]
    fn dominance_conflict_nudges_negative() {
        let context = MarketContext {
            btc_dominance: Some(BtcDominance {
                dominance_pct: Some(58.0),
                implication: DominanceImplication::AltcoinBearish,
                btc_eth_ratio: Some(18.5),
            }),
            ..Default::default()
        };
        let assessment = market_context_factor(&context, Direction::Bullish);
        assert!(assessment.adjustment < 0.0);
        assert_eq!(assessment.conflicting.len(), 1);
    }

    #[test]
    fn full_context_score_capped() {
        let context = MarketContext {
            fear_greed: Some(FearGreedIndex {
                value: 10.0,
                classification: Some("Extreme Fear".to_string()),
            }),
            fear_greed_trend: Some(crate::context::FearGreedTrend {
                direction: TrendDirection::Rising,
                average_value: Some(22.0),
            }),
            global_market: Some(GlobalMarket {
                market_cap_change_percentage_24h: Some(7.0),
            }),
            market_volatility: Some(MarketVolatility {
                pattern: VolatilityPattern::High,
                average_24h_move: Some(9.0),
            }),
            btc_dominance: Some(BtcDominance {
                dominance_pct: Some(38.0),
                implication: DominanceImplication::AltcoinBullish,
                btc_eth_ratio: Some(16.0),
            }),
        };
        let assessment = market_context_factor(&context, Direction::Bullish);
        // 10 + 5 + 10 + 3 + 3 = 31, capped at 30.
        assert!((assessment.score - 30.0).abs() < 1e-10);
        assert_eq!(assessment.conflicting.len(), 0);
        assert_eq!(assessment.supporting.len(), 5);
    }

    #[test]
    fn empty_context_contributes_nothing() {
        let assessment = market_context_factor(&MarketContext::default(), Direction::Bullish);
        assert_eq!(assessment.score, 0.0);
        assert_eq!(assessment.adjustment, 0.0);
        assert!(assessment.supporting.is_empty());
        assert!(assessment.conflicting.is_empty());
    }

    // ---- Social sentiment --------------------------------------------------

    fn sentiment(label: Direction, items: &[&str]) -> SocialSentiment {
        SocialSentiment {
            overall_sentiment: label,
            summary: Some("summary".to_string()),
            key_items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn aligned_sentiment_scores_high() {
        let assessment =
            social_sentiment_factor(&sentiment(Direction::Bullish, &[]), Direction::Bullish);
        assert!((assessment.score - 18.0).abs() < 1e-10);
        assert!((assessment.adjustment - 5.0).abs() < 1e-10);
        assert!(assessment.supporting[0].contains("Bullish sentiment strongly supports"));
    }

    #[test]
    fn opposed_sentiment_scores_zero() {
        let assessment =
            social_sentiment_factor(&sentiment(Direction::Bearish, &[]), Direction::Bullish);
        assert_eq!(assessment.score, 0.0);
        assert!((assessment.adjustment + 5.0).abs() < 1e-10);
        assert_eq!(assessment.conflicting.len(), 1);
    }

    #[test]
    fn key_item_bonus_requires_three_distinct() {
        let aligned = social_sentiment_factor(
            &sentiment(Direction::Bullish, &["a", "b", "c"]),
            Direction::Bullish,
        );
        assert!((aligned.score - 20.0).abs() < 1e-10); // 18 + 2

        let duplicated = social_sentiment_factor(
            &sentiment(Direction::Bullish, &["a", "a", "b"]),
            Direction::Bullish,
        );
        assert!((duplicated.score - 18.0).abs() < 1e-10);

        // No bonus when sentiment opposes the technicals.
        let opposed = social_sentiment_factor(
            &sentiment(Direction::Bearish, &["a", "b", "c"]),
            Direction::Bullish,
        );
        assert_eq!(opposed.score, 0.0);
    }

    #[test]
    fn neutral_label_scores_mid() {
        let assessment =
            social_sentiment_factor(&sentiment(Direction::Neutral, &[]), Direction::Bullish);
        assert!((assessment.score - 8.0).abs() < 1e-10);
        assert_eq!(assessment.adjustment, 0.0);
    }
}
