// ============================================================================
// Container Errors
// Error types for vector, series and iterator operations
// ============================================================================

use crate::numeric::NumericError;
use std::fmt;

/// Broad category of a [`SeriesError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong element, non-numeric input, negative size, bad state
    InvalidArgument,
    /// Bad index or access to an empty container
    OutOfRange,
    /// Paired-vector operation on unequal lengths
    LengthMismatch,
    /// A transform or ingestion produced a non-conforming value
    UnexpectedValue,
    /// Fault raised by decimal arithmetic, passed through unchanged
    Arithmetic,
}

/// Errors raised by decimal containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    InvalidArgument(String),
    IndexOutOfRange { index: usize, len: usize },
    Empty { operation: &'static str },
    LengthMismatch { left: usize, right: usize },
    UnexpectedValue(String),
    Numeric(NumericError),
}

impl SeriesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeriesError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SeriesError::IndexOutOfRange { .. } | SeriesError::Empty { .. } => {
                ErrorKind::OutOfRange
            },
            SeriesError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            SeriesError::UnexpectedValue(_) => ErrorKind::UnexpectedValue,
            SeriesError::Numeric(_) => ErrorKind::Arithmetic,
        }
    }

    /// Fail with `LengthMismatch` unless both lengths agree.
    pub(crate) fn check_lengths(left: usize, right: usize) -> SeriesResult<()> {
        if left == right {
            Ok(())
        } else {
            Err(SeriesError::LengthMismatch { left, right })
        }
    }
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            SeriesError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            },
            SeriesError::Empty { operation } => {
                write!(f, "cannot {} on an empty container", operation)
            },
            SeriesError::LengthMismatch { left, right } => {
                write!(f, "length mismatch: {} vs {}", left, right)
            },
            SeriesError::UnexpectedValue(msg) => write!(f, "unexpected value: {}", msg),
            SeriesError::Numeric(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SeriesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeriesError::Numeric(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for SeriesError {
    fn from(err: NumericError) -> Self {
        SeriesError::Numeric(err)
    }
}

/// Result type alias for container operations
pub type SeriesResult<T> = Result<T, SeriesError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SeriesError::InvalidArgument("x".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            SeriesError::IndexOutOfRange { index: 3, len: 2 }.kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            SeriesError::Empty { operation: "pop" }.kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            SeriesError::from(NumericError::DivisionByZero).kind(),
            ErrorKind::Arithmetic
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SeriesError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "index 3 out of range for length 2"
        );
        assert_eq!(
            SeriesError::Empty { operation: "pop" }.to_string(),
            "cannot pop on an empty container"
        );
        assert_eq!(
            SeriesError::Numeric(NumericError::DivisionByZero).to_string(),
            "division by zero"
        );
    }

    #[test]
    fn test_numeric_source() {
        let err = SeriesError::from(NumericError::Overflow);
        assert!(err.source().is_some());
        assert!(SeriesError::Empty { operation: "min" }.source().is_none());
    }

    #[test]
    fn test_check_lengths() {
        assert!(SeriesError::check_lengths(2, 2).is_ok());
        assert_eq!(
            SeriesError::check_lengths(2, 3),
            Err(SeriesError::LengthMismatch { left: 2, right: 3 })
        );
    }
}
