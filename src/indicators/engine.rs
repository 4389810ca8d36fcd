// =============================================================================
// Indicator Engine — OHLCV series to named indicator snapshot
// =============================================================================
//
// Converts a daily price series into the fixed set of indicator values the
// confidence scorer and signal resolver consume. Every key degrades to
// `None` independently: insufficient history or a degenerate window for one
// indicator never aborts the others, and a caller-contract violation (empty
// or unordered series) produces an all-`None` snapshot instead of an error.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::market_data::PriceSeries;

use super::adx::latest_adx;
use super::bollinger::latest_bollinger;
use super::ema::latest_ema;
use super::macd::latest_macd;
use super::rsi::latest_rsi;
use super::sma::latest_sma;

// =============================================================================
// Parameters
// =============================================================================

/// Look-back windows for the indicator engine. The snapshot keys keep their
/// canonical names (`sma_50`, `ema_9`, ...) regardless of the configured
/// periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub sma_period: usize,
    pub ema_short_period: usize,
    pub ema_medium_period: usize,
    pub ema_long_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std: f64,
    pub adx_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 8,
            macd_slow: 17,
            macd_signal: 9,
            sma_period: 50,
            ema_short_period: 9,
            ema_medium_period: 21,
            ema_long_period: 55,
            bollinger_period: 20,
            bollinger_std: 2.0,
            adx_period: 14,
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// The fixed-key indicator snapshot. Every field is always present; a value
/// of `None` records insufficient history or a degenerate calculation for
/// that key only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub sma_50: Option<f64>,
    pub ema_9: Option<f64>,
    pub ema_21: Option<f64>,
    pub ema_55: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub adx: Option<f64>,
    pub adx_plus_di: Option<f64>,
    pub adx_minus_di: Option<f64>,
}

impl IndicatorSnapshot {
    /// Number of keys in the fixed snapshot set.
    pub const EXPECTED_KEYS: usize = 14;

    /// Every key/value pair in canonical order.
    pub fn entries(&self) -> [(&'static str, Option<f64>); Self::EXPECTED_KEYS] {
        [
            ("rsi", self.rsi),
            ("macd", self.macd),
            ("macd_signal", self.macd_signal),
            ("macd_hist", self.macd_hist),
            ("sma_50", self.sma_50),
            ("ema_9", self.ema_9),
            ("ema_21", self.ema_21),
            ("ema_55", self.ema_55),
            ("bb_upper", self.bb_upper),
            ("bb_middle", self.bb_middle),
            ("bb_lower", self.bb_lower),
            ("adx", self.adx),
            ("adx_plus_di", self.adx_plus_di),
            ("adx_minus_di", self.adx_minus_di),
        ]
    }

    /// How many keys carry a value.
    pub fn available_count(&self) -> usize {
        self.entries().iter().filter(|(_, v)| v.is_some()).count()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Compute the full indicator snapshot for a daily price series.
///
/// Never panics for well-typed input. An empty or non-chronological series
/// violates the caller contract and yields an all-`None` snapshot so the
/// downstream scoring can degrade gracefully.
pub fn compute(series: &PriceSeries, params: &IndicatorParams) -> IndicatorSnapshot {
    if !series.is_chronological() {
        warn!(
            bars = series.len(),
            "price series is empty or out of order, returning empty snapshot"
        );
        return IndicatorSnapshot::default();
    }

    let closes = series.closes();
    let candles = series.candles();

    let macd = latest_macd(
        &closes,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    );
    let bands = latest_bollinger(&closes, params.bollinger_period, params.bollinger_std);
    let adx = latest_adx(candles, params.adx_period);

    IndicatorSnapshot {
        rsi: latest_rsi(&closes, params.rsi_period),
        macd: macd.map(|m| m.macd),
        macd_signal: macd.map(|m| m.signal),
        macd_hist: macd.map(|m| m.histogram),
        sma_50: latest_sma(&closes, params.sma_period),
        ema_9: latest_ema(&closes, params.ema_short_period),
        ema_21: latest_ema(&closes, params.ema_medium_period),
        ema_55: latest_ema(&closes, params.ema_long_period),
        bb_upper: bands.map(|b| b.upper),
        bb_middle: bands.map(|b| b.middle),
        bb_lower: bands.map(|b| b.lower),
        adx: adx.adx,
        adx_plus_di: adx.plus_di,
        adx_minus_di: adx.minus_di,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::Candle;
    use chrono::{TimeZone, Utc};

    fn candle(day: i64, close: f64) -> Candle {
        Candle {
            timestamp: Utc.timestamp_opt(day * 86_400, 0).unwrap(),
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100.0,
        }
    }

    /// A wavy series with both up and down moves so every indicator is
    /// well-defined.
    fn wavy_series(n: usize) -> PriceSeries {
        let candles = (0..n)
            .map(|i| candle(i as i64, 100.0 + (i as f64 * 0.35).sin() * 10.0 + i as f64 * 0.05))
            .collect();
        PriceSeries::new(candles)
    }

    #[test]
    fn full_history_fills_every_key() {
        let snapshot = compute(&wavy_series(120), &IndicatorParams::default());
        assert_eq!(
            snapshot.available_count(),
            IndicatorSnapshot::EXPECTED_KEYS,
            "missing keys in {snapshot:?}"
        );
    }

    #[test]
    fn empty_series_yields_all_none() {
        let snapshot = compute(&PriceSeries::new(Vec::new()), &IndicatorParams::default());
        assert_eq!(snapshot.available_count(), 0);
    }

    #[test]
    fn unordered_series_yields_all_none() {
        let series = PriceSeries::new(vec![candle(5, 101.0), candle(3, 100.0), candle(4, 99.0)]);
        let snapshot = compute(&series, &IndicatorParams::default());
        assert_eq!(snapshot.available_count(), 0);
    }

    #[test]
    fn short_series_degrades_per_key() {
        // 30 bars: RSI/EMA9/EMA21/Bollinger/DI are available, but SMA-50,
        // EMA-55, MACD (needs 26) partially are not.
        let snapshot = compute(&wavy_series(30), &IndicatorParams::default());
        assert!(snapshot.rsi.is_some());
        assert!(snapshot.ema_9.is_some());
        assert!(snapshot.ema_21.is_some());
        assert!(snapshot.bb_middle.is_some());
        assert!(snapshot.sma_50.is_none());
        assert!(snapshot.ema_55.is_none());
        assert!(snapshot.macd.is_some()); // 30 >= 17 + 9
        assert!(snapshot.adx_plus_di.is_some());
    }

    #[test]
    fn macd_hist_identity_holds() {
        let snapshot = compute(&wavy_series(100), &IndicatorParams::default());
        let (macd, signal, hist) = (
            snapshot.macd.unwrap(),
            snapshot.macd_signal.unwrap(),
            snapshot.macd_hist.unwrap(),
        );
        assert!((hist - (macd - signal)).abs() < 1e-12);
    }

    #[test]
    fn bollinger_ordering_holds() {
        let snapshot = compute(&wavy_series(100), &IndicatorParams::default());
        let (u, m, l) = (
            snapshot.bb_upper.unwrap(),
            snapshot.bb_middle.unwrap(),
            snapshot.bb_lower.unwrap(),
        );
        assert!(l <= m && m <= u);
    }

    #[test]
    fn rsi_in_bounds_when_present() {
        let snapshot = compute(&wavy_series(100), &IndicatorParams::default());
        let rsi = snapshot.rsi.unwrap();
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[test]
    fn flat_series_collapses_bands_and_drops_rsi() {
        let candles = (0..60).map(|i| candle(i, 100.0)).collect();
        let snapshot = compute(&PriceSeries::new(candles), &IndicatorParams::default());
        // RSI is undefined with zero average loss.
        assert!(snapshot.rsi.is_none());
        // MACD of a constant series is exactly zero.
        assert!(snapshot.macd.unwrap().abs() < 1e-10);
        assert!(snapshot.macd_hist.unwrap().abs() < 1e-10);
        // Bands collapse onto the SMA.
        let (u, m, l) = (
            snapshot.bb_upper.unwrap(),
            snapshot.bb_middle.unwrap(),
            snapshot.bb_lower.unwrap(),
        );
        assert!((u - 100.0).abs() < 1e-10);
        assert!((m - 100.0).abs() < 1e-10);
        assert!((l - 100.0).abs() < 1e-10);
        assert!((snapshot.sma_50.unwrap() - 100.0).abs() < 1e-10);
        assert!((snapshot.ema_55.unwrap() - 100.0).abs() < 1e-10);
    }
}
