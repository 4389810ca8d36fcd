// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the core technical indicators
// consumed by the confidence scorer. Every public function returns
// `Option<T>` so callers are forced to handle insufficient-data and
// numerical-edge-case scenarios.

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use engine::{compute, IndicatorParams, IndicatorSnapshot};
