// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD tracks the spread between a fast and a slow EMA of the closes:
//
//   macd_line = EMA(close, fast) - EMA(close, slow)
//   signal    = EMA(macd_line, signal_period)
//   histogram = macd_line - signal
//
// Both EMAs are seeded with the first close, so the MACD line is defined for
// every bar and the signal line is an EMA over the full MACD series.
// =============================================================================

use super::ema::ema_series;

/// The latest MACD line, signal line, and histogram values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdResult {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Compute the most recent MACD values for the given `closes`.
///
/// Returns `None` when:
/// - Any period is zero, or `fast >= slow`.
/// - Fewer than `slow + signal_period` closes — both EMAs and the signal
///   line need a full warm-up window before the values are trustworthy.
/// - A non-finite value is encountered anywhere in the pipeline.
pub fn latest_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Option<MacdResult> {
    if fast == 0 || slow == 0 || signal_period == 0 || fast >= slow {
        return None;
    }
    if closes.len() < slow + signal_period {
        return None;
    }

    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);
    // Truncated series mean a non-finite value was encountered.
    if fast_ema.len() != closes.len() || slow_ema.len() != closes.len() {
        return None;
    }

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema_series(&macd_line, signal_period);
    if signal_line.len() != macd_line.len() {
        return None;
    }

    let macd = *macd_line.last()?;
    let signal = *signal_line.last()?;
    let histogram = macd - signal;

    if macd.is_finite() && signal.is_finite() && histogram.is_finite() {
        Some(MacdResult {
            macd,
            signal,
            histogram,
        })
    } else {
        None
    }
}
