// ============================================================================
// Numeric Module
// Exact decimal arithmetic for financial and scientific calculations
// ============================================================================
//
// This module provides:
// - ExactDecimal: decimal value with a fixed significant-digit precision
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics)
// - Deterministic rounding (midpoint away from zero)

mod errors;
mod exact_decimal;

pub use errors::{NumericError, NumericResult};
pub use exact_decimal::{ExactDecimal, DEFAULT_PRECISION, MAX_PRECISION};
