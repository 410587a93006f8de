// ============================================================================
// Vector Module
// Decimal-only sequence with sequence algebra and statistics
// ============================================================================

mod decimal_vector;
mod statistics;

pub use decimal_vector::DecimalVector;
pub use statistics::MeanSource;
