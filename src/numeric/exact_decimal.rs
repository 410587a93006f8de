// ============================================================================
// Exact Decimal
// Decimal arithmetic rounded to a fixed number of significant digits
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Neg;
use std::str::FromStr;

/// Largest supported precision (significant digits of a 96-bit mantissa).
pub const MAX_PRECISION: u32 = 28;

/// Precision used when none is given.
pub const DEFAULT_PRECISION: u32 = 28;

/// Exact (non-floating-point) decimal with a fixed significant-digit precision.
///
/// The precision is chosen at construction and every arithmetic result is
/// rounded to it, midpoint away from zero. Binary operations carry the larger
/// precision of the two operands.
///
/// Equality, ordering and hashing look at the numeric value only, so `2.50`
/// and `2.5` compare equal regardless of either operand's precision.
///
/// # Example
/// ```
/// use decimal_series::numeric::ExactDecimal;
///
/// let a: ExactDecimal = "1.25".parse().unwrap();
/// let b = ExactDecimal::from_integer(4);
/// assert_eq!(a.checked_mul(b).unwrap(), ExactDecimal::from_integer(5));
/// ```
#[derive(Clone, Copy)]
pub struct ExactDecimal {
    value: Decimal,
    precision: u32,
}

/// Round `value` to `precision` significant digits.
fn round_to(value: Decimal, precision: u32) -> NumericResult<Decimal> {
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    value
        .round_sf_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
        .map(|d| d.normalize())
        .ok_or(NumericError::PrecisionLoss)
}

fn check_precision(precision: u32) -> NumericResult<u32> {
    if (1..=MAX_PRECISION).contains(&precision) {
        Ok(precision)
    } else {
        Err(NumericError::InvalidPrecision(precision))
    }
}

impl ExactDecimal {
    /// Zero (0) at default precision
    pub const ZERO: Self = Self {
        value: Decimal::ZERO,
        precision: DEFAULT_PRECISION,
    };

    /// One (1) at default precision
    pub const ONE: Self = Self {
        value: Decimal::ONE,
        precision: DEFAULT_PRECISION,
    };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a `rust_decimal::Decimal` rounded to `precision` digits.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` if `precision` is outside `1..=28`.
    pub fn new(value: Decimal, precision: u32) -> NumericResult<Self> {
        let precision = check_precision(precision)?;
        Ok(Self {
            value: round_to(value, precision)?,
            precision,
        })
    }

    /// Create from a `rust_decimal::Decimal` at default precision.
    pub fn from_decimal(value: Decimal) -> NumericResult<Self> {
        Self::new(value, DEFAULT_PRECISION)
    }

    /// Create from an integer at default precision.
    ///
    /// Any `i64` fits in 28 significant digits, so this cannot fail.
    #[inline]
    pub fn from_integer(value: i64) -> Self {
        Self {
            value: Decimal::from(value),
            precision: DEFAULT_PRECISION,
        }
    }

    /// Create from an integer at an explicit precision.
    pub fn from_integer_with(value: i64, precision: u32) -> NumericResult<Self> {
        Self::new(Decimal::from(value), precision)
    }

    /// Parse a plain or scientific decimal string at an explicit precision.
    ///
    /// # Examples
    /// - "123" -> 123
    /// - "-0.001" -> -0.001
    /// - "1.5e3" -> 1500
    pub fn parse_with(s: &str, precision: u32) -> NumericResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        let value = if s.contains(['e', 'E']) {
            Decimal::from_scientific(s)
        } else {
            Decimal::from_str(s)
        }
        .map_err(|_| NumericError::InvalidInput)?;
        Self::new(value, precision)
    }

    /// Convert a float at an explicit precision.
    ///
    /// # Errors
    /// `InvalidInput` for NaN or infinities, `Overflow` if out of range.
    pub fn from_f64_with(value: f64, precision: u32) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        let d = Decimal::from_f64(value).ok_or(NumericError::Overflow)?;
        Self::new(d, precision)
    }

    /// Same value rounded to another precision.
    pub fn with_precision(self, precision: u32) -> NumericResult<Self> {
        Self::new(self.value, precision)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Significant digits kept by this value.
    #[inline]
    pub const fn precision(self) -> u32 {
        self.precision
    }

    /// Underlying `rust_decimal::Decimal`.
    #[inline]
    pub const fn to_decimal(self) -> Decimal {
        self.value
    }

    /// Lossy conversion for display or plotting.
    pub fn to_f64(self) -> Option<f64> {
        self.value.to_f64()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.value.is_zero()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        !self.value.is_zero() && self.value.is_sign_positive()
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        !self.value.is_zero() && self.value.is_sign_negative()
    }

    /// True if the value has no fractional part.
    #[inline]
    pub fn is_integer(self) -> bool {
        self.value.fract().is_zero()
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self {
            value: self.value.abs(),
            precision: self.precision,
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    fn combine(
        self,
        rhs: Self,
        op: impl FnOnce(Decimal, Decimal) -> Option<Decimal>,
    ) -> NumericResult<Self> {
        let precision = self.precision.max(rhs.precision);
        let raw = op(self.value, rhs.value).ok_or(NumericError::Overflow)?;
        Ok(Self {
            value: round_to(raw, precision)?,
            precision,
        })
    }

    /// Checked addition.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.combine(rhs, Decimal::checked_add)
    }

    /// Checked subtraction.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.combine(rhs, Decimal::checked_sub)
    }

    /// Checked multiplication.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        self.combine(rhs, Decimal::checked_mul)
    }

    /// Checked division.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        self.combine(rhs, Decimal::checked_div)
    }

    /// Checked remainder (sign follows the dividend).
    #[inline]
    pub fn checked_rem(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        self.combine(rhs, Decimal::checked_rem)
    }

    /// Raise to an integer power by repeated multiplication.
    pub fn checked_powi(self, exp: i64) -> NumericResult<Self> {
        if self.is_zero() && exp < 0 {
            return Err(NumericError::DivisionByZero);
        }
        let raw = self
            .value
            .checked_powi(exp)
            .ok_or(NumericError::Overflow)?;
        Self::new(raw, self.precision)
    }

    /// Raise to a decimal power.
    ///
    /// Integer exponents are exact; fractional exponents go through
    /// `exp(ln(x) * y)` and are only defined for non-negative bases.
    pub fn checked_pow(self, exp: Self) -> NumericResult<Self> {
        if exp.is_integer() {
            let n = exp.value.to_i64().ok_or(NumericError::Overflow)?;
            return self
                .checked_powi(n)?
                .with_precision(self.precision.max(exp.precision));
        }
        if self.is_negative() {
            return Err(NumericError::Undefined);
        }
        if self.is_zero() {
            return if exp.is_negative() {
                Err(NumericError::DivisionByZero)
            } else {
                Ok(Self {
                    value: Decimal::ZERO,
                    precision: self.precision.max(exp.precision),
                })
            };
        }
        self.combine(exp, |base, e| base.checked_powd(e))
    }

    /// Square root.
    ///
    /// # Errors
    /// Returns `NegativeRoot` for negative values.
    pub fn sqrt(self) -> NumericResult<Self> {
        if self.is_negative() {
            return Err(NumericError::NegativeRoot);
        }
        let raw = self.value.sqrt().ok_or(NumericError::Overflow)?;
        Self::new(raw, self.precision)
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Sum of a sequence. The empty sum is zero.
    pub fn sum<I>(values: I) -> NumericResult<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return Ok(Self::ZERO);
        };
        iter.try_fold(first, Self::checked_add)
    }

    /// Arithmetic mean of a sequence, at the largest precision among its values.
    ///
    /// # Errors
    /// An empty sequence divides by zero.
    pub fn average<I>(values: I) -> NumericResult<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut count: i64 = 0;
        let total = Self::sum(values.into_iter().inspect(|_| count += 1))?;
        total
            .checked_div(Self::from_integer(count))?
            .with_precision(total.precision)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for ExactDecimal {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for ExactDecimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ExactDecimal {}

impl PartialOrd for ExactDecimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExactDecimal {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for ExactDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.normalize().hash(state);
    }
}

impl Neg for ExactDecimal {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            value: -self.value,
            precision: self.precision,
        }
    }
}

impl From<i64> for ExactDecimal {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<i32> for ExactDecimal {
    fn from(value: i32) -> Self {
        Self::from_integer(i64::from(value))
    }
}

impl TryFrom<f64> for ExactDecimal {
    type Error = NumericError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64_with(value, DEFAULT_PRECISION)
    }
}

impl TryFrom<Decimal> for ExactDecimal {
    type Error = NumericError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl FromStr for ExactDecimal {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, DEFAULT_PRECISION)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExactDecimal({}, precision={})", self.value, self.precision)
    }
}

impl fmt::Display for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for ExactDecimal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ExactDecimal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_decimal(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
