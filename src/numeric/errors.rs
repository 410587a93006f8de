// ============================================================================
// Numeric Errors
// Error types for exact decimal arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur during exact decimal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result does not fit the 96-bit decimal mantissa
    Overflow,
    /// Attempted division (or remainder) by zero
    DivisionByZero,
    /// Rounding to the requested significant digits failed
    PrecisionLoss,
    /// Input string or value is invalid
    InvalidInput,
    /// Precision outside 1..=MAX_PRECISION
    InvalidPrecision(u32),
    /// Square root of a negative value
    NegativeRoot,
    /// Result is mathematically undefined (e.g. fractional power of a negative)
    Undefined,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded representable range")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: value could not be rounded to the requested digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::InvalidPrecision(p) => {
                write!(f, "invalid precision {}: expected 1..=28 significant digits", p)
            },
            NumericError::NegativeRoot => write!(f, "square root of a negative value"),
            NumericError::Undefined => write!(f, "result is undefined"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
