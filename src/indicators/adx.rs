// =============================================================================
// Average Directional Index (ADX) with DI+ / DI-
// =============================================================================
//
// ADX quantifies trend **strength** regardless of direction; DI+ and DI-
// carry the direction itself.
//
// Calculation pipeline:
//   1. Compute +DM (positive directional movement) and -DM per bar.
//   2. Compute True Range (TR) per bar.
//   3. Apply Wilder's smoothing (period) to +DM, -DM, and TR.
//   4. Derive +DI = smoothed(+DM) / smoothed(TR) * 100
//            -DI = smoothed(-DM) / smoothed(TR) * 100
//   5. DX  = |+DI - -DI| / (+DI + -DI) * 100
//   6. ADX = Wilder's smoothed average of DX over `period` bars.
//
// Interpretation:
//   ADX > 25  => trending market
//   ADX < 20  => ranging / choppy market
//
// DI+ / DI- need `period + 1` candles; ADX needs `2 * period + 1` (another
// `period` DX values to seed its own smoothing). Each output degrades to
// `None` independently when its requirement is not met.
// =============================================================================

use crate::market_data::Candle;

/// The latest directional-movement values. Any field may be `None` on
/// insufficient history or a degenerate (zero true range) window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdxResult {
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
}

/// Compute the most recent ADX / DI+ / DI- values from OHLCV candles.
pub fn latest_adx(candles: &[Candle], period: usize) -> AdxResult {
    if period == 0 || candles.len() < period + 1 {
        return AdxResult::default();
    }

    let period_f = period as f64;
    let n = candles.len();
    let bar_count = n - 1; // number of bar-to-bar transitions

    // ------------------------------------------------------------------
    // Step 1 & 2: Raw +DM, -DM, and True Range for each consecutive pair
    // ------------------------------------------------------------------
    let mut plus_dm = Vec::with_capacity(bar_count);
    let mut minus_dm = Vec::with_capacity(bar_count);
    let mut tr_vals = Vec::with_capacity(bar_count);

    for i in 1..n {
        let high = candles[i].high;
        let low = candles[i].low;
        let prev_high = candles[i - 1].high;
        let prev_low = candles[i - 1].low;
        let prev_close = candles[i - 1].close;

        // True Range
        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());

        // Directional Movement
        let up_move = high - prev_high;
        let down_move = prev_low - low;

        let pdm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let mdm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        plus_dm.push(pdm);
        minus_dm.push(mdm);
        tr_vals.push(tr);
    }

    // ------------------------------------------------------------------
    // Step 3: Wilder's smoothing of +DM, -DM, TR (first `period` values)
    // ------------------------------------------------------------------
    let mut smooth_plus_dm: f64 = plus_dm[..period].iter().sum();
    let mut smooth_minus_dm: f64 = minus_dm[..period].iter().sum();
    let mut smooth_tr: f64 = tr_vals[..period].iter().sum();

    let mut dx_values: Vec<f64> = Vec::with_capacity(bar_count - period + 1);
    if let Some(dx) = compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr) {
        dx_values.push(dx);
    }

    // Continue Wilder's smoothing for bars `period .. bar_count`.
    for i in period..bar_count {
        smooth_plus_dm = smooth_plus_dm - smooth_plus_dm / period_f + plus_dm[i];
        smooth_minus_dm = smooth_minus_dm - smooth_minus_dm / period_f + minus_dm[i];
        smooth_tr = smooth_tr - smooth_tr / period_f + tr_vals[i];

        if let Some(dx) = compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr) {
            dx_values.push(dx);
        }
    }

    // ------------------------------------------------------------------
    // Step 4: Final DI+ / DI- from the last smoothed values
    // ------------------------------------------------------------------
    let (plus_di, minus_di) = if smooth_tr > 0.0 {
        let p = (smooth_plus_dm / smooth_tr) * 100.0;
        let m = (smooth_minus_dm / smooth_tr) * 100.0;
        (
            Some(p).filter(|v| v.is_finite()),
            Some(m).filter(|v| v.is_finite()),
        )
    } else {
        (None, None)
    };

    // ------------------------------------------------------------------
    // Step 6: ADX = Wilder's smoothed average of DX
    // ------------------------------------------------------------------
    // A DX gap (degenerate window) breaks the smoothing chain, so require a
    // full, uninterrupted DX history on top of the candle requirement.
    let adx = if candles.len() >= 2 * period + 1
        && dx_values.len() >= period
        && dx_values.len() == bar_count - period + 1
    {
        let seed: f64 = dx_values[..period].iter().sum::<f64>() / period_f;
        let mut adx = seed;
        for &dx in &dx_values[period..] {
            adx = (adx * (period_f - 1.0) + dx) / period_f;
        }
        Some(adx).filter(|v| v.is_finite())
    } else {
        None
    };

    AdxResult {
        adx,
        plus_di,
        minus_di,
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Compute DX from smoothed +DM, -DM, and TR values.
///
/// Returns `None` if the true range is zero or the result is non-finite.
/// Both DI lines at zero means no directional movement at all — DX is 0.
fn compute_dx(smooth_plus_dm: f64, smooth_minus_dm: f64, smooth_tr: f64) -> Option<f64> {
    if smooth_tr == 0.0 {
        return None;
    }

    let plus_di = (smooth_plus_dm / smooth_tr) * 100.0;
    let minus_di = (smooth_minus_dm / smooth_tr) * 100.0;

    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        return Some(0.0);
    }

    let dx = ((plus_di - minus_di).abs() / di_sum) * 100.0;

    if dx.is_finite() {
        Some(dx)
    } else {
        None
    }
}
