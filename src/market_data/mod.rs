pub mod series;

// Re-export the bar types for convenient access (e.g. `use crate::market_data::Candle`).
pub use series::{Candle, PriceSeries};
