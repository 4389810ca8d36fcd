// =============================================================================
// Signal Resolver — discrete trading signal from raw indicator votes
// =============================================================================
//
// A second, independent vote tally over the raw indicator values (distinct
// from the scorer's votes) maps net signal strength onto the five-level
// recommendation. Counters are `f64` because the MACD near-crossover
// damping shaves fractional votes.
//
// Pure function: identical inputs always yield identical output.
// =============================================================================

use crate::indicators::IndicatorSnapshot;
use crate::types::{Direction, TradingSignal};

// ---------------------------------------------------------------------------
// Resolver thresholds
// ---------------------------------------------------------------------------

/// Confidence score above which the directional call counts double.
const STRONG_SCORE: u8 = 60;
/// Confidence score above which the directional call counts once.
const MODERATE_SCORE: u8 = 30;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_EXTREME_OVERSOLD: f64 = 20.0;
const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_EXTREME_OVERBOUGHT: f64 = 80.0;

/// Histogram counts as significant beyond this fraction of |MACD|.
const MACD_HIST_SIGNIFICANT: f64 = 0.1;
/// Line and signal within this fraction of |MACD| are "barely crossed".
const MACD_NEAR_CROSSOVER: f64 = 0.05;
const MACD_DAMPING: f64 = 0.5;

/// ADX level confirming a trend, and the very-strong band above it.
const ADX_CONFIRMING: f64 = 25.0;
const ADX_VERY_STRONG: f64 = 40.0;

// Net-strength bands. The asymmetry on the sell side is intentional:
// selling is held to a higher bar than buying.
const STRONG_BUY_STRENGTH: f64 = 6.0;
const BUY_STRENGTH: f64 = 3.0;
const SELL_STRENGTH: f64 = -4.0;
const STRONG_SELL_STRENGTH: f64 = -7.0;

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Derive the trading signal from the confidence score, the working
/// direction, and the raw indicator snapshot.
pub fn resolve(
    score: u8,
    direction: Direction,
    current_price: Option<f64>,
    indicators: &IndicatorSnapshot,
) -> TradingSignal {
    let mut bullish = 0.0_f64;
    let mut bearish = 0.0_f64;

    // ── 1. Base votes from direction and confidence ──────────────────────
    match direction {
        Direction::Bullish => {
            if score >= STRONG_SCORE {
                bullish += 2.0;
            } else if score >= MODERATE_SCORE {
                bullish += 1.0;
            }
        }
        Direction::Bearish => {
            if score >= STRONG_SCORE {
                bearish += 2.0;
            } else if score >= MODERATE_SCORE {
                bearish += 1.0;
            }
        }
        Direction::Neutral => {}
    }

    // ── 2. RSI votes — extreme bands stack on top of the outer bands ────
    if let Some(rsi) = indicators.rsi {
        if rsi <= RSI_OVERSOLD {
            bullish += 1.0;
        }
        if rsi <= RSI_EXTREME_OVERSOLD {
            bullish += 2.0;
        }
        if rsi >= RSI_OVERBOUGHT {
            bearish += 1.0;
        }
        if rsi >= RSI_EXTREME_OVERBOUGHT {
            bearish += 2.0;
        }
    }

    // ── 3. MACD votes with near-crossover damping ────────────────────────
    if let (Some(macd), Some(signal), Some(hist)) =
        (indicators.macd, indicators.macd_signal, indicators.macd_hist)
    {
        if macd > signal {
            bullish += 1.0;
            if hist > 0.0 && hist > MACD_HIST_SIGNIFICANT * macd.abs() {
                bullish += 1.0;
            }
        } else if macd < signal {
            bearish += 1.0;
            if hist < 0.0 && hist.abs() > MACD_HIST_SIGNIFICANT * macd.abs() {
                bearish += 1.0;
            }
        }

        if macd != 0.0 && (macd - signal).abs() < MACD_NEAR_CROSSOVER * macd.abs() {
            if macd > signal {
                bullish -= MACD_DAMPING;
            } else {
                bearish -= MACD_DAMPING;
            }
        }
    }

    // ── 4. EMA stack and price position ─────────────────────────────────
    if let (Some(ema_9), Some(ema_21), Some(ema_55)) =
        (indicators.ema_9, indicators.ema_21, indicators.ema_55)
    {
        if ema_9 > ema_21 && ema_21 > ema_55 {
            bullish += 2.0;
        } else if ema_9 < ema_21 && ema_21 < ema_55 {
            bearish += 2.0;
        } else if ema_9 > ema_21 {
            bullish += 1.0;
        } else if ema_9 < ema_21 {
            bearish += 1.0;
        }

        if let Some(price) = current_price {
            if price > ema_55 {
                bullish += 1.0;
            } else if price < ema_55 {
                bearish += 1.0;
            }
        }
    }

    // ── 5. ADX trend confirmation ────────────────────────────────────────
    if let (Some(adx), Some(plus_di), Some(minus_di)) = (
        indicators.adx,
        indicators.adx_plus_di,
        indicators.adx_minus_di,
    ) {
        if adx >= ADX_CONFIRMING {
            if plus_di > minus_di {
                bullish += 1.0;
                if adx >= ADX_VERY_STRONG {
                    bullish += 1.0;
                }
            } else if minus_di > plus_di {
                bearish += 1.0;
                if adx >= ADX_VERY_STRONG {
                    bearish += 1.0;
                }
            }
        }
    }

    // ── 6. Map net strength onto the signal ladder ───────────────────────
    let strength = bullish - bearish;
    let mut signal = if strength >= STRONG_BUY_STRENGTH {
        TradingSignal::StrongBuy
    } else if strength >= BUY_STRENGTH {
        TradingSignal::Buy
    } else if strength <= STRONG_SELL_STRENGTH {
        TradingSignal::StrongSell
    } else if strength <= SELL_STRENGTH {
        TradingSignal::Sell
    } else {
        // Includes the mild ±1/±2 leaning bands.
        TradingSignal::Hold
    };

    // ── 7. Extreme oversold/overbought overrides ─────────────────────────
    if let Some(rsi) = indicators.rsi {
        let adx_confirms = |want_plus: bool| {
            matches!(
                (indicators.adx, indicators.adx_plus_di, indicators.adx_minus_di),
                (Some(adx), Some(plus_di), Some(minus_di))
                    if adx >= ADX_CONFIRMING
                        && ((want_plus && plus_di > minus_di)
                            || (!want_plus && minus_di > plus_di))
            )
        };

        if rsi <= RSI_EXTREME_OVERSOLD && !signal.is_sell_side() {
            signal = if adx_confirms(true) {
                TradingSignal::StrongBuy
            } else {
                TradingSignal::Buy
            };
        } else if rsi >= RSI_EXTREME_OVERBOUGHT && !signal.is_buy_side() {
            signal = if adx_confirms(false) {
                TradingSignal::StrongSell
            } else {
                TradingSignal::Sell
            };
        }
    }

    signal
}
