use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single daily OHLCV bar supplied by the market-data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

// ---------------------------------------------------------------------------
// PriceSeries -- caller-owned, immutable daily bar history
// ---------------------------------------------------------------------------

/// An ordered sequence of daily bars, ascending by time, no duplicate
/// timestamps. The series is owned by the caller and never mutated by the
/// analysis core; gaps (missing days) are tolerated and simply reduce the
/// history available to window-based indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// All close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Close price of the most recent bar, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }

    /// Whether the series honors the caller contract: non-empty with
    /// strictly ascending timestamps (which also rules out duplicates).
    pub fn is_chronological(&self) -> bool {
        !self.candles.is_empty()
            && self
                .candles
                .windows(2)
                .all(|w| w[0].timestamp < w[1].timestamp)
    }
}
