// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The very first EMA value is seeded with the first close itself (no
// adjustment/rebasing), so the series has one value per input close.
// =============================================================================

/// Compute the EMA series for the given `closes` slice and look-back `period`.
///
/// Seeded with the first close, the output has one element per input close.
///
/// # Edge cases
/// - `period == 0` or empty input => empty vec
/// - A non-finite intermediate value truncates the series; downstream
///   consumers should not trust a broken tail.
pub fn ema_series(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.is_empty() {
        return Vec::new();
    }

    let multiplier = 2.0 / (period + 1) as f64;

    let mut prev = closes[0];
    if !prev.is_finite() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(closes.len());
    result.push(prev);

    for &close in &closes[1..] {
        let ema = close * multiplier + prev * (1.0 - multiplier);
        if !ema.is_finite() {
            break;
        }
        result.push(ema);
        prev = ema;
    }

    result
}

/// The most recent EMA value, requiring at least `period` closes so the
/// smoothing has a full warm-up window behind it.
pub fn latest_ema(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let series = ema_series(closes, period);
    // A truncated series means a non-finite value was encountered.
    if series.len() != closes.len() {
        return None;
    }
    series.last().copied()
}
