// ============================================================================
// Decimal Vector
// Ordered, growable sequence of exact decimals
// ============================================================================

use crate::domain::DecimalConfig;
use crate::errors::{SeriesError, SeriesResult};
use crate::numeric::{ExactDecimal, NumericResult, DEFAULT_PRECISION};
use std::cmp::Ordering;
use std::ops::{Bound, Index, RangeBounds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered sequence of [`ExactDecimal`] values.
///
/// Membership is enforced by the element type: raw input (strings, floats)
/// is converted at the boundary through [`DecimalConfig`], so every stored
/// element is always a valid decimal. Indexes are 0-based and every
/// positional accessor is bounds-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DecimalVector {
    values: Vec<ExactDecimal>,
}

impl DecimalVector {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn from_vec(values: Vec<ExactDecimal>) -> Self {
        Self { values }
    }

    pub fn from_integers<I: IntoIterator<Item = i64>>(values: I) -> Self {
        values.into_iter().map(ExactDecimal::from_integer).collect()
    }

    // ========================================================================
    // Ingestion
    // ========================================================================

    /// Build from decimal strings.
    ///
    /// In strict mode the first unparsable string fails with `UnexpectedValue`
    /// and nothing is returned; in lenient mode it is skipped.
    pub fn from_strs<I, S>(values: I, config: &DecimalConfig) -> SeriesResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config.validate()?;
        let mut out = Self::new();
        for raw in values {
            if let Some(value) = config.parse_value(raw.as_ref())? {
                out.push(value);
            }
        }
        tracing::debug!("Ingested {} decimals from strings", out.len());
        Ok(out)
    }

    /// Build from floats.
    ///
    /// NaN and infinities fail with `InvalidArgument` in strict mode and are
    /// skipped in lenient mode.
    pub fn from_f64s<I>(values: I, config: &DecimalConfig) -> SeriesResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        config.validate()?;
        let mut out = Self::new();
        for raw in values {
            if let Some(value) = config.convert_f64(raw)? {
                out.push(value);
            }
        }
        tracing::debug!("Ingested {} decimals from floats", out.len());
        Ok(out)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExactDecimal> {
        self.values.iter()
    }

    /// Largest precision among the elements; the default for an empty vector.
    pub fn precision(&self) -> u32 {
        self.values
            .iter()
            .map(|v| v.precision())
            .max()
            .unwrap_or(DEFAULT_PRECISION)
    }

    pub fn as_slice(&self) -> &[ExactDecimal] {
        &self.values
    }

    /// Plain ordered form suitable for external encoding.
    pub fn to_vec(&self) -> Vec<ExactDecimal> {
        self.values.clone()
    }

    fn check_index(&self, index: usize) -> SeriesResult<()> {
        if index < self.values.len() {
            Ok(())
        } else {
            Err(SeriesError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> SeriesResult<ExactDecimal> {
        self.check_index(index)?;
        Ok(self.values[index])
    }

    pub fn first(&self) -> SeriesResult<ExactDecimal> {
        self.values
            .first()
            .copied()
            .ok_or(SeriesError::Empty { operation: "first" })
    }

    pub fn last(&self) -> SeriesResult<ExactDecimal> {
        self.values
            .last()
            .copied()
            .ok_or(SeriesError::Empty { operation: "last" })
    }

    pub fn contains(&self, value: ExactDecimal) -> bool {
        self.values.contains(&value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: ExactDecimal) -> Option<usize> {
        self.values.iter().position(|v| *v == value)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    pub fn set(&mut self, index: usize, value: ExactDecimal) -> SeriesResult<()> {
        self.check_index(index)?;
        self.values[index] = value;
        Ok(())
    }

    /// Insert before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, value: ExactDecimal) -> SeriesResult<()> {
        if index > self.values.len() {
            return Err(SeriesError::IndexOutOfRange {
                index,
                len: self.values.len(),
            });
        }
        self.values.insert(index, value);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> SeriesResult<ExactDecimal> {
        self.check_index(index)?;
        Ok(self.values.remove(index))
    }

    /// Append one element (amortized O(1)).
    #[inline]
    pub fn push(&mut self, value: ExactDecimal) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> SeriesResult<ExactDecimal> {
        self.values.pop().ok_or(SeriesError::Empty { operation: "pop" })
    }

    /// Remove and return the first element.
    pub fn shift(&mut self) -> SeriesResult<ExactDecimal> {
        if self.values.is_empty() {
            return Err(SeriesError::Empty { operation: "shift" });
        }
        Ok(self.values.remove(0))
    }

    /// Prepend one element.
    pub fn unshift(&mut self, value: ExactDecimal) {
        self.values.insert(0, value);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Copy of the elements in `range`.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> SeriesResult<Self> {
        let len = self.values.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        if start > end || end > len {
            return Err(SeriesError::IndexOutOfRange {
                index: start.max(end),
                len,
            });
        }
        Ok(Self::from_vec(self.values[start..end].to_vec()))
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sort ascending in place.
    pub fn sort(&mut self) {
        self.values.sort();
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&ExactDecimal, &ExactDecimal) -> Ordering,
    {
        self.values.sort_by(compare);
    }

    pub fn sorted(&self) -> Self {
        let mut out = self.clone();
        out.sort();
        out
    }

    pub fn sorted_by<F>(&self, compare: F) -> Self
    where
        F: FnMut(&ExactDecimal, &ExactDecimal) -> Ordering,
    {
        let mut out = self.clone();
        out.sort_by(compare);
        out
    }

    pub fn reverse(&mut self) {
        self.values.reverse();
    }

    pub fn reversed(&self) -> Self {
        let mut out = self.clone();
        out.reverse();
        out
    }

    /// Rotate by `count` positions; positive rotates left, negative right.
    pub fn rotate(&mut self, count: isize) {
        let len = self.values.len();
        if len == 0 {
            return;
        }
        let shift = count.rem_euclid(len as isize) as usize;
        self.values.rotate_left(shift);
    }

    /// Split into consecutive vectors of `size` elements (the last may be shorter).
    ///
    /// A size of zero yields a single empty vector.
    pub fn chunk(&self, size: isize) -> SeriesResult<Vec<Self>> {
        if size < 0 {
            return Err(SeriesError::InvalidArgument(format!(
                "chunk size must not be negative, got {}",
                size
            )));
        }
        if size == 0 {
            return Ok(vec![Self::new()]);
        }
        Ok(self
            .values
            .chunks(size as usize)
            .map(|chunk| Self::from_vec(chunk.to_vec()))
            .collect())
    }

    /// Append `fill` (zero by default) until the vector holds `target` elements.
    pub fn pad(&mut self, target: usize, fill: Option<ExactDecimal>) -> SeriesResult<()> {
        if target < self.values.len() {
            return Err(SeriesError::InvalidArgument(format!(
                "pad target {} is shorter than current length {}",
                target,
                self.values.len()
            )));
        }
        self.values
            .resize(target, fill.unwrap_or(ExactDecimal::ZERO));
        Ok(())
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(ExactDecimal) -> ExactDecimal,
    {
        self.values.iter().copied().map(f).collect()
    }

    /// Map with a fallible arithmetic transform; the first failure is returned.
    pub fn try_map<F>(&self, f: F) -> SeriesResult<Self>
    where
        F: FnMut(ExactDecimal) -> NumericResult<ExactDecimal>,
    {
        let values = self
            .values
            .iter()
            .copied()
            .map(f)
            .collect::<NumericResult<Vec<_>>>()?;
        Ok(Self::from_vec(values))
    }

    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&ExactDecimal) -> bool,
    {
        self.values
            .iter()
            .copied()
            .filter(|v| predicate(v))
            .collect()
    }

    pub fn reduce<T, F>(&self, init: T, f: F) -> T
    where
        F: FnMut(T, ExactDecimal) -> T,
    {
        self.values.iter().copied().fold(init, f)
    }

    /// New vector holding this vector's elements followed by `other`'s.
    pub fn merge(&self, other: &Self) -> Self {
        let mut values = Vec::with_capacity(self.len() + other.len());
        values.extend_from_slice(&self.values);
        values.extend_from_slice(&other.values);
        Self::from_vec(values)
    }

    /// Replace every element with `transform(element)`.
    ///
    /// All results are staged and validated before the contents are swapped
    /// in, so a failing transform leaves the vector untouched.
    pub fn apply<F>(&mut self, transform: F) -> SeriesResult<()>
    where
        F: FnMut(ExactDecimal) -> NumericResult<ExactDecimal>,
    {
        let staged: Vec<NumericResult<ExactDecimal>> =
            self.values.iter().copied().map(transform).collect();

        let mut validated = Vec::with_capacity(staged.len());
        for (index, result) in staged.into_iter().enumerate() {
            match result {
                Ok(value) => validated.push(value),
                Err(err) => {
                    return Err(SeriesError::UnexpectedValue(format!(
                        "transform produced no decimal at index {}: {}",
                        index, err
                    )))
                },
            }
        }

        self.values = validated;
        Ok(())
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    pub fn min(&self) -> SeriesResult<ExactDecimal> {
        self.values
            .iter()
            .copied()
            .min()
            .ok_or(SeriesError::Empty { operation: "min" })
    }

    pub fn max(&self) -> SeriesResult<ExactDecimal> {
        self.values
            .iter()
            .copied()
            .max()
            .ok_or(SeriesError::Empty { operation: "max" })
    }

    pub fn sum(&self) -> SeriesResult<ExactDecimal> {
        Ok(ExactDecimal::sum(self.values.iter().copied())?)
    }

    /// Product of all elements; the empty product is one.
    pub fn product(&self) -> SeriesResult<ExactDecimal> {
        let mut iter = self.values.iter().copied();
        let Some(first) = iter.next() else {
            return Ok(ExactDecimal::ONE);
        };
        Ok(iter.try_fold(first, ExactDecimal::checked_mul)?)
    }

    /// Arithmetic mean. An empty vector divides by zero.
    pub fn mean(&self) -> SeriesResult<ExactDecimal> {
        Ok(ExactDecimal::average(self.values.iter().copied())?)
    }

    /// Successive differences `v[i] - v[i-1]` (length `n - 1`).
    pub fn delta(&self) -> SeriesResult<Self> {
        let values = self
            .values
            .windows(2)
            .map(|w| w[1].checked_sub(w[0]))
            .collect::<NumericResult<Vec<_>>>()?;
        Ok(Self::from_vec(values))
    }

    /// Successive relative differences `(v[i] - v[i-1]) / v[i-1]`.
    pub fn rdelta(&self) -> SeriesResult<Self> {
        let values = self
            .values
            .windows(2)
            .map(|w| w[1].checked_sub(w[0])?.checked_div(w[0]))
            .collect::<NumericResult<Vec<_>>>()?;
        Ok(Self::from_vec(values))
    }

    /// Element-wise `self[i] - other[i]`.
    pub fn diff(&self, other: &Self) -> SeriesResult<Self> {
        SeriesError::check_lengths(self.len(), other.len())?;
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a.checked_sub(*b))
            .collect::<NumericResult<Vec<_>>>()?;
        Ok(Self::from_vec(values))
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl From<Vec<ExactDecimal>> for DecimalVector {
    fn from(values: Vec<ExactDecimal>) -> Self {
        Self::from_vec(values)
    }
}

impl From<DecimalVector> for Vec<ExactDecimal> {
    fn from(vector: DecimalVector) -> Self {
        vector.values
    }
}

impl FromIterator<ExactDecimal> for DecimalVector {
    fn from_iter<I: IntoIterator<Item = ExactDecimal>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl Extend<ExactDecimal> for DecimalVector {
    fn extend<I: IntoIterator<Item = ExactDecimal>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl IntoIterator for DecimalVector {
    type Item = ExactDecimal;
    type IntoIter = std::vec::IntoIter<ExactDecimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecimalVector {
    type Item = &'a ExactDecimal;
    type IntoIter = std::slice::Iter<'a, ExactDecimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl Index<usize> for DecimalVector {
    type Output = ExactDecimal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::numeric::NumericError;

    fn d(s: &str) -> ExactDecimal {
        s.parse().unwrap()
    }

    fn vector(values: &[i64]) -> DecimalVector {
        DecimalVector::from_integers(values.iter().copied())
    }

    #[test]
    fn test_positional_access() {
        let mut v = vector(&[1, 2, 3]);
        assert_eq!(v.get(1).unwrap(), d("2"));
        assert_eq!(
            v.get(3),
            Err(SeriesError::IndexOutOfRange { index: 3, len: 3 })
        );

        v.set(0, d("10")).unwrap();
        assert_eq!(v[0], d("10"));
        assert!(v.set(5, d("1")).is_err());

        v.insert(3, d("4")).unwrap();
        v.insert(0, d("0")).unwrap();
        assert_eq!(v, vector(&[0, 10, 2, 3, 4]));
        assert!(v.insert(9, d("1")).is_err());

        assert_eq!(v.remove(1).unwrap(), d("10"));
        assert_eq!(v, vector(&[0, 2, 3, 4]));
    }

    #[test]
    fn test_stack_and_queue_operations() {
        let mut v = DecimalVector::new();
        v.push(d("2"));
        v.unshift(d("1"));
        v.push(d("3"));
        assert_eq!(v.first().unwrap(), d("1"));
        assert_eq!(v.last().unwrap(), d("3"));
        assert_eq!(v.shift().unwrap(), d("1"));
        assert_eq!(v.pop().unwrap(), d("3"));
        assert_eq!(v.pop().unwrap(), d("2"));

        for err in [v.pop(), v.shift(), v.first(), v.last(), v.min(), v.max()] {
            assert_eq!(err.unwrap_err().kind(), ErrorKind::OutOfRange);
        }
    }

    #[test]
    fn test_slice() {
        let v = vector(&[1, 2, 3, 4, 5]);
        assert_eq!(v.slice(1..3).unwrap(), vector(&[2, 3]));
        assert_eq!(v.slice(..=1).unwrap(), vector(&[1, 2]));
        assert_eq!(v.slice(3..).unwrap(), vector(&[4, 5]));
        assert_eq!(v.slice(5..).unwrap(), DecimalVector::new());
        assert!(v.slice(2..9).is_err());
    }

    #[test]
    fn test_sorting_and_reversal() {
        let mut v = vector(&[3, 1, 2]);
        assert_eq!(v.sorted(), vector(&[1, 2, 3]));
        assert_eq!(v.sorted_by(|a, b| b.cmp(a)), vector(&[3, 2, 1]));
        assert_eq!(v.reversed(), vector(&[2, 1, 3]));
        assert_eq!(v, vector(&[3, 1, 2]));

        v.sort();
        assert_eq!(v, vector(&[1, 2, 3]));
        v.reverse();
        assert_eq!(v, vector(&[3, 2, 1]));
    }

    #[test]
    fn test_rotate() {
        let mut v = vector(&[1, 2, 3, 4]);
        v.rotate(1);
        assert_eq!(v, vector(&[2, 3, 4, 1]));
        v.rotate(-2);
        assert_eq!(v, vector(&[4, 1, 2, 3]));
        v.rotate(8);
        assert_eq!(v, vector(&[4, 1, 2, 3]));

        let mut empty = DecimalVector::new();
        empty.rotate(3);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_chunk() {
        let v = vector(&[1, 2, 3, 4, 5]);
        let chunks = v.chunk(2).unwrap();
        assert_eq!(chunks, vec![vector(&[1, 2]), vector(&[3, 4]), vector(&[5])]);

        assert_eq!(v.chunk(0).unwrap(), vec![DecimalVector::new()]);
        assert_eq!(v.chunk(5).unwrap(), vec![v.clone()]);
        assert_eq!(v.chunk(-1).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_pad() {
        let mut v = vector(&[1, 2]);
        v.pad(4, None).unwrap();
        assert_eq!(v, vector(&[1, 2, 0, 0]));
        v.pad(5, Some(d("9"))).unwrap();
        assert_eq!(v, vector(&[1, 2, 0, 0, 9]));
        v.pad(5, None).unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v.pad(3, None).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_functional_operations() {
        let v = vector(&[1, 2, 3, 4]);
        let doubled = v.map(|x| x.checked_mul(d("2")).unwrap());
        assert_eq!(doubled, vector(&[2, 4, 6, 8]));

        let evens = v.filter(|x| x.checked_rem(d("2")).unwrap().is_zero());
        assert_eq!(evens, vector(&[2, 4]));

        let count = v.reduce(0usize, |acc, x| if x > d("1") { acc + 1 } else { acc });
        assert_eq!(count, 3);

        assert_eq!(v.merge(&vector(&[5])), vector(&[1, 2, 3, 4, 5]));

        let halves = v.try_map(|x| x.checked_div(d("2"))).unwrap();
        assert_eq!(halves.first().unwrap(), d("0.5"));
        assert!(v.try_map(|x| x.checked_div(ExactDecimal::ZERO)).is_err());
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let mut v = vector(&[4, 2, 0]);
        let err = v
            .apply(|x| d("8").checked_div(x))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
        assert_eq!(v, vector(&[4, 2, 0]));

        let mut w = vector(&[4, 2, 1]);
        w.apply(|x| d("8").checked_div(x)).unwrap();
        assert_eq!(w, vector(&[2, 4, 8]));
    }

    #[test]
    fn test_aggregates() {
        let v = vector(&[3, -1, 4, 1, 5]);
        assert_eq!(v.min().unwrap(), d("-1"));
        assert_eq!(v.max().unwrap(), d("5"));
        assert_eq!(v.sum().unwrap(), d("12"));
        assert_eq!(v.product().unwrap(), d("-60"));
        assert_eq!(v.mean().unwrap(), d("2.4"));
    }

    #[test]
    fn test_empty_aggregates() {
        let empty = DecimalVector::new();
        assert_eq!(empty.sum().unwrap(), ExactDecimal::ZERO);
        assert_eq!(empty.product().unwrap(), ExactDecimal::ONE);
        assert_eq!(
            empty.mean(),
            Err(SeriesError::Numeric(NumericError::DivisionByZero))
        );
    }

    #[test]
    fn test_delta_returns_successive_differences() {
        let v = vector(&[10, 12, 9, 9]);
        assert_eq!(v.delta().unwrap(), vector(&[2, -3, 0]));
        assert!(vector(&[1]).delta().unwrap().is_empty());
        assert!(DecimalVector::new().delta().unwrap().is_empty());
    }

    #[test]
    fn test_rdelta_returns_relative_differences() {
        let v = vector(&[100, 110, 99]);
        let r = v.rdelta().unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r[0], d("0.1"));
        assert_eq!(r[1], d("-0.1"));

        assert_eq!(
            vector(&[0, 1]).rdelta(),
            Err(SeriesError::Numeric(NumericError::DivisionByZero))
        );
    }

    #[test]
    fn test_diff() {
        let a = vector(&[5, 7, 9]);
        let b = vector(&[1, 2, 3]);
        assert_eq!(a.diff(&b).unwrap(), vector(&[4, 5, 6]));
        assert_eq!(
            a.diff(&vector(&[1])),
            Err(SeriesError::LengthMismatch { left: 3, right: 1 })
        );
    }

    #[test]
    fn test_from_strs() {
        let strict = DecimalConfig::default();
        let v = DecimalVector::from_strs(["1.5", " 2 ", "-3e1"], &strict).unwrap();
        assert_eq!(v, DecimalVector::from_vec(vec![d("1.5"), d("2"), d("-30")]));

        let err = DecimalVector::from_strs(["1", "$2", "3"], &strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);

        let lenient = DecimalConfig::lenient(28);
        let v = DecimalVector::from_strs(["1", "$2", "3"], &lenient).unwrap();
        assert_eq!(v, vector(&[1, 3]));
    }

    #[test]
    fn test_from_f64s() {
        let v = DecimalVector::from_f64s([0.5, 1.25], &DecimalConfig::default()).unwrap();
        assert_eq!(v, DecimalVector::from_vec(vec![d("0.5"), d("1.25")]));

        let err = DecimalVector::from_f64s([1.0, f64::NAN], &DecimalConfig::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let v = DecimalVector::from_f64s([1.0, f64::NAN], &DecimalConfig::lenient(28)).unwrap();
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_ingestion_rejects_bad_precision() {
        let config = DecimalConfig::strict(0);
        assert!(DecimalVector::from_strs(["1"], &config).is_err());
    }

    #[test]
    fn test_lookup() {
        let v = vector(&[4, 5, 4]);
        assert!(v.contains(d("5")));
        assert!(!v.contains(d("6")));
        assert_eq!(v.index_of(d("4")), Some(0));
        assert_eq!(v.index_of(d("6")), None);
    }

    #[test]
    fn test_conversions() {
        let v: DecimalVector = vec![d("1"), d("2")].into();
        let mut w: DecimalVector = v.iter().copied().collect();
        w.extend([d("3")]);
        assert_eq!(w.to_vec(), vec![d("1"), d("2"), d("3")]);
        let plain: Vec<ExactDecimal> = w.into();
        assert_eq!(plain.len(), 3);
    }
}
