// =============================================================================
// Confidence Module
// =============================================================================
//
// Multi-factor confidence assessment over an indicator snapshot:
// - Per-family sub-scores and directional votes (factors)
// - Named scoring-policy table (weights)
// - The fold producing the final `ConfidenceResult` (scorer)

pub mod factors;
pub mod scorer;
pub mod weights;

pub use scorer::{score, ConfidenceResult};
