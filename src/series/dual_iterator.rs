// ============================================================================
// Dual Series Iterator
// Lock-step cursor aligning two TimeSeries by shared timestamp
// ============================================================================
//
// Positions run over the primary series' ascending timestamps. Position i
// is aligned when the secondary series has an entry at the same timestamp;
// otherwise it is a gap.
//
// Forward iteration resolves exactly one position per step and stops at the
// first gap, even if later positions would align again. `peek` resolves any
// position, so lookahead can see past a gap that ended iteration. Use
// `aligned()` to collect every aligned position.

use super::TimeSeries;
use crate::domain::DatedDecimalPair;

/// Resolution state of one position in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Unresolved,
    Gap,
    Aligned(DatedDecimalPair),
}

/// Synchronized cursor over two [`TimeSeries`].
///
/// The primary key list is snapshotted on construction and on every
/// [`rewind`](Self::rewind); resolved positions are memoized in an arena
/// owned by the iterator. Both series are borrowed, so neither can be
/// mutated while the iterator is alive.
#[derive(Debug)]
pub struct DualSeriesIterator<'a> {
    primary: &'a TimeSeries,
    secondary: &'a TimeSeries,
    timestamps: Vec<i64>,
    slots: Vec<Slot>,
    position: usize,
    current: Option<DatedDecimalPair>,
}

impl<'a> DualSeriesIterator<'a> {
    pub fn new(primary: &'a TimeSeries, secondary: &'a TimeSeries) -> Self {
        let mut iter = Self {
            primary,
            secondary,
            timestamps: Vec::new(),
            slots: Vec::new(),
            position: 0,
            current: None,
        };
        iter.rewind();
        iter
    }

    /// Snapshot the primary timestamps and resolve position 0.
    pub fn rewind(&mut self) {
        self.timestamps = self.primary.keys();
        self.slots = vec![Slot::Unresolved; self.timestamps.len()];
        self.position = 0;
        self.current = self.peek(0);
        tracing::debug!(
            "Dual iterator rewound over {} primary timestamps",
            self.timestamps.len()
        );
    }

    /// Move to the next position and adopt its resolution as current.
    pub fn advance(&mut self) {
        if self.position < self.timestamps.len() {
            self.position += 1;
        }
        self.current = self.peek(self.position as isize);
        if self.current.is_none() && self.position < self.timestamps.len() {
            tracing::trace!(
                "No alignment at position {} (timestamp {})",
                self.position,
                self.timestamps[self.position]
            );
        }
    }

    /// True while the current position is aligned.
    pub fn valid(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<DatedDecimalPair> {
        self.current
    }

    /// Current position in the primary timestamp list.
    pub fn key(&self) -> usize {
        self.position
    }

    /// Number of primary timestamps in the snapshot.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Map a possibly negative index onto the snapshot; `-1` is the last position.
    fn translate(&self, index: isize) -> Option<usize> {
        let len = self.timestamps.len() as isize;
        let position = if index < 0 { len + index } else { index };
        (0..len).contains(&position).then_some(position as usize)
    }

    fn resolve(&self, position: usize) -> Slot {
        let timestamp = self.timestamps[position];
        let Some((instant, x)) = self.primary.entry(timestamp) else {
            return Slot::Gap;
        };
        match self.secondary.get(timestamp) {
            Some(y) => Slot::Aligned(DatedDecimalPair::new(x, y, instant)),
            None => Slot::Gap,
        }
    }

    /// Aligned pair at `index`, memoized; negative indexes count from the end.
    ///
    /// `None` if the index is out of bounds or the position is a gap.
    pub fn peek(&mut self, index: isize) -> Option<DatedDecimalPair> {
        let position = self.translate(index)?;
        if self.slots[position] == Slot::Unresolved {
            self.slots[position] = self.resolve(position);
        }
        match self.slots[position] {
            Slot::Aligned(pair) => Some(pair),
            Slot::Gap | Slot::Unresolved => None,
        }
    }

    /// Peek `delta` positions away from the current one.
    ///
    /// Targets before the first position are out of bounds rather than
    /// wrapping to the end.
    pub fn peek_rel(&mut self, delta: isize) -> Option<DatedDecimalPair> {
        let target = (self.position as isize).checked_add(delta)?;
        if target < 0 {
            return None;
        }
        self.peek(target)
    }

    pub fn peek_next(&mut self) -> Option<DatedDecimalPair> {
        self.peek_rel(1)
    }

    pub fn peek_prev(&mut self) -> Option<DatedDecimalPair> {
        self.peek_rel(-1)
    }

    /// Every aligned position in the snapshot, skipping gaps.
    pub fn aligned(&mut self) -> Vec<DatedDecimalPair> {
        let len = self.timestamps.len() as isize;
        (0..len).filter_map(|i| self.peek(i)).collect()
    }
}

impl Iterator for DualSeriesIterator<'_> {
    type Item = DatedDecimalPair;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current?;
        self.advance();
        Some(item)
    }
}

impl std::iter::FusedIterator for DualSeriesIterator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ExactDecimal;

    const T1: i64 = 1_700_000_000;
    const T2: i64 = T1 + 60;
    const T3: i64 = T1 + 120;

    fn d(v: i64) -> ExactDecimal {
        ExactDecimal::from_integer(v)
    }

    fn series(pairs: &[(i64, i64)]) -> TimeSeries {
        TimeSeries::from_pairs(pairs.iter().map(|(t, v)| (*t, d(*v)))).unwrap()
    }

    fn sparse_pair() -> (TimeSeries, TimeSeries) {
        (
            series(&[(T1, 1), (T2, 2), (T3, 3)]),
            series(&[(T1, 10), (T3, 30)]),
        )
    }

    #[test]
    fn test_iteration_stops_at_first_gap() {
        let (x, y) = sparse_pair();
        let mut iter = x.dual_iter(&y);

        assert!(iter.valid());
        let first = iter.current().unwrap();
        assert_eq!(first.timestamp(), T1);
        assert_eq!((first.x(), first.y()), (d(1), d(10)));

        iter.advance();
        assert_eq!(iter.key(), 1);
        assert!(!iter.valid());
        assert_eq!(iter.current(), None);

        // T3 would align, but forward iteration has already ended
        let pairs: Vec<_> = x.dual_iter(&y).collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].timestamp(), T1);
    }

    #[test]
    fn test_peek_sees_past_the_gap() {
        let (x, y) = sparse_pair();
        let mut iter = x.dual_iter(&y);
        iter.advance();
        assert!(!iter.valid());

        let next = iter.peek_next().unwrap();
        assert_eq!(next.timestamp(), T3);
        assert_eq!(next.diff().unwrap(), d(27));
        assert_eq!(iter.peek_prev().unwrap().timestamp(), T1);
        assert_eq!(iter.peek_rel(0), None);
    }

    #[test]
    fn test_negative_peek_counts_from_the_end() {
        let (x, y) = sparse_pair();
        let mut iter = x.dual_iter(&y);
        // len + index: -1 -> 2 (T3), -3 -> 0 (T1), -2 -> 1 (gap)
        assert_eq!(iter.peek(-1).unwrap().timestamp(), T3);
        assert_eq!(iter.peek(-1), iter.peek(2));
        assert_eq!(iter.peek(-3).unwrap().timestamp(), T1);
        assert_eq!(iter.peek(-2), None);
        assert_eq!(iter.peek(-4), None);
        assert_eq!(iter.peek(3), None);
    }

    #[test]
    fn test_peek_prev_at_start_does_not_wrap() {
        let (x, y) = sparse_pair();
        let mut iter = x.dual_iter(&y);
        assert_eq!(iter.key(), 0);
        assert_eq!(iter.peek_prev(), None);
    }

    #[test]
    fn test_rewind_restarts() {
        let (x, y) = sparse_pair();
        let mut iter = x.dual_iter(&y);
        iter.advance();
        iter.advance();
        assert_eq!(iter.key(), 2);
        assert!(iter.valid());
        iter.advance();
        assert!(!iter.valid());
        iter.advance();
        assert_eq!(iter.key(), 3);

        iter.rewind();
        assert_eq!(iter.key(), 0);
        assert_eq!(iter.current().unwrap().timestamp(), T1);
    }

    #[test]
    fn test_aligned_skips_gaps() {
        let (x, y) = sparse_pair();
        let mut iter = x.dual_iter(&y);
        let aligned: Vec<i64> = iter.aligned().iter().map(|p| p.timestamp()).collect();
        assert_eq!(aligned, vec![T1, T3]);
    }

    #[test]
    fn test_fully_aligned_series() {
        let x = series(&[(T3, 3), (T1, 1), (T2, 2)]);
        let y = series(&[(T2, 4), (T1, 2), (T3, 6)]);
        let ratios: Vec<ExactDecimal> = x
            .dual_iter(&y)
            .map(|p| p.pair.ratio().unwrap())
            .collect();
        assert_eq!(ratios, vec![d(2), d(2), d(2)]);
    }

    #[test]
    fn test_extra_secondary_timestamps_are_ignored() {
        let x = series(&[(T1, 1)]);
        let y = series(&[(T1, 1), (T2, 2), (T3, 3)]);
        let iter = x.dual_iter(&y);
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.count(), 1);
    }

    #[test]
    fn test_empty_primary() {
        let x = TimeSeries::new();
        let y = series(&[(T1, 1)]);
        let mut iter = x.dual_iter(&y);
        assert!(iter.is_empty());
        assert!(!iter.valid());
        assert_eq!(iter.peek(0), None);
        assert_eq!(iter.peek(-1), None);
        assert_eq!(iter.next(), None);
    }
}
