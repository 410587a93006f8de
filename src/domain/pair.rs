// ============================================================================
// Decimal Pair Domain Model
// ============================================================================

use crate::numeric::{ExactDecimal, NumericResult};
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable pair of exact decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimalPair {
    pub x: ExactDecimal,
    pub y: ExactDecimal,
}

impl DecimalPair {
    pub fn new(x: ExactDecimal, y: ExactDecimal) -> Self {
        Self { x, y }
    }

    /// `y - x`
    pub fn diff(&self) -> NumericResult<ExactDecimal> {
        self.y.checked_sub(self.x)
    }

    /// `y / x`
    pub fn ratio(&self) -> NumericResult<ExactDecimal> {
        self.y.checked_div(self.x)
    }

    /// `(y - x) / x`
    pub fn relative_diff(&self) -> NumericResult<ExactDecimal> {
        self.diff()?.checked_div(self.x)
    }
}

impl From<(ExactDecimal, ExactDecimal)> for DecimalPair {
    fn from((x, y): (ExactDecimal, ExactDecimal)) -> Self {
        Self::new(x, y)
    }
}

/// Decimal pair observed at a calendar instant.
///
/// Alignment identity is the instant, not the position it was found at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatedDecimalPair {
    pub pair: DecimalPair,
    pub instant: DateTime<Utc>,
}

impl DatedDecimalPair {
    pub fn new(x: ExactDecimal, y: ExactDecimal, instant: DateTime<Utc>) -> Self {
        Self {
            pair: DecimalPair::new(x, y),
            instant,
        }
    }

    #[inline]
    pub fn x(&self) -> ExactDecimal {
        self.pair.x
    }

    #[inline]
    pub fn y(&self) -> ExactDecimal {
        self.pair.y
    }

    /// Unix timestamp (seconds) of the instant
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.instant.timestamp()
    }

    pub fn diff(&self) -> NumericResult<ExactDecimal> {
        self.pair.diff()
    }
}
