// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), with σ the standard deviation over the same
// trailing window.
//
// A flat window collapses the bands (upper == middle == lower); that is a
// valid result, not an error — position-within-band consumers must guard the
// zero-width case themselves.
// =============================================================================

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands over the trailing `period` closes.
///
/// Returns `None` when:
/// - `period` is zero or fewer than `period` closes are available.
/// - The window produces a non-finite band.
pub fn latest_bollinger(closes: &[f64], period: usize, num_std: f64) -> Option<BollingerBands> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let middle = window.iter().sum::<f64>() / period as f64;

    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();

    let upper = middle + num_std * std_dev;
    let lower = middle - num_std * std_dev;

    if upper.is_finite() && middle.is_finite() && lower.is_finite() {
        Some(BollingerBands {
            upper,
            middle,
            lower,
        })
    } else {
        None
    }
}
