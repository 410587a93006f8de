// ============================================================================
// Domain Models Module
// Configuration and value objects shared by vectors and series
// ============================================================================

pub mod config;
pub mod pair;

pub use config::{DecimalConfig, IngestMode};
pub use pair::{DatedDecimalPair, DecimalPair};
