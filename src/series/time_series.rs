// ============================================================================
// Time Series
// Timestamp -> exact decimal mapping with lazily maintained chronology
// ============================================================================

use super::{DualSeriesIterator, SeriesIterator};
use crate::domain::DecimalConfig;
use crate::errors::{SeriesError, SeriesResult};
use crate::interfaces::{instant_from_timestamp, parse_time_key, IntoTimestamp};
use crate::numeric::ExactDecimal;
use crate::vector::DecimalVector;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::{RwLock, RwLockWriteGuard};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    instant: DateTime<Utc>,
    value: ExactDecimal,
}

/// Sorted key cache. `dirty` is set by every mutation and cleared by the
/// next ordering-sensitive read.
#[derive(Debug, Default)]
struct Chronology {
    keys: Vec<i64>,
    dirty: bool,
}

/// Mapping from Unix timestamp (whole seconds) to [`ExactDecimal`].
///
/// Keys are unique: setting an existing timestamp overwrites it. Lookups by
/// key are O(1); every read that exposes more than one element in order
/// (`keys`, `values`, `to_array`, `first`, `last`, ...) first restores
/// ascending timestamp order if a mutation happened since the last such read.
#[derive(Debug, Default)]
pub struct TimeSeries {
    entries: HashMap<i64, Entry>,
    chronology: RwLock<Chronology>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            chronology: RwLock::new(Chronology::default()),
        }
    }

    /// Build from typed `(key, value)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> SeriesResult<Self>
    where
        I: IntoIterator<Item = (K, ExactDecimal)>,
        K: IntoTimestamp,
    {
        let mut series = Self::new();
        series.try_extend(pairs)?;
        Ok(series)
    }

    /// Build from raw string pairs; see [`TimeSeries::hydrate_raw`].
    pub fn try_from_raw<I, K, V>(pairs: I, config: &DecimalConfig) -> SeriesResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut series = Self::new();
        series.hydrate_raw(pairs, config)?;
        Ok(series)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    fn mark_dirty(&mut self) {
        self.chronology.get_mut().dirty = true;
    }

    /// Insert or overwrite the value at `key`, returning the previous value.
    ///
    /// # Errors
    /// `InvalidArgument` if the key does not resolve to a calendar instant.
    pub fn set<K: IntoTimestamp>(
        &mut self,
        key: K,
        value: ExactDecimal,
    ) -> SeriesResult<Option<ExactDecimal>> {
        let timestamp = key.timestamp();
        let instant = instant_from_timestamp(timestamp)?;
        self.mark_dirty();
        Ok(self
            .entries
            .insert(timestamp, Entry { instant, value })
            .map(|old| old.value))
    }

    /// Remove the value at `key`, returning it if present.
    pub fn unset<K: IntoTimestamp>(&mut self, key: K) -> Option<ExactDecimal> {
        self.mark_dirty();
        self.entries.remove(&key.timestamp()).map(|e| e.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.mark_dirty();
    }

    /// Insert typed pairs one by one, returning how many were inserted.
    ///
    /// Pairs before a failing key stay inserted.
    pub fn try_extend<I, K>(&mut self, pairs: I) -> SeriesResult<usize>
    where
        I: IntoIterator<Item = (K, ExactDecimal)>,
        K: IntoTimestamp,
    {
        let mut inserted = 0;
        for (key, value) in pairs {
            self.set(key, value)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Insert raw `(key, value)` strings one by one.
    ///
    /// Keys must be integer timestamps or RFC 3339 instants; values are
    /// parsed per `config`. Ingestion is incremental, so a late failure leaves
    /// the earlier pairs inserted. In lenient mode pairs whose value is not
    /// numeric are skipped, but a bad key always fails.
    pub fn hydrate_raw<I, K, V>(&mut self, pairs: I, config: &DecimalConfig) -> SeriesResult<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        config.validate()?;
        let mut inserted = 0;
        for (key, raw) in pairs {
            let instant = parse_time_key(key.as_ref())?;
            if let Some(value) = config.parse_value(raw.as_ref())? {
                self.set(instant, value)?;
                inserted += 1;
            }
        }
        tracing::debug!("Hydrated {} entries into time series", inserted);
        Ok(inserted)
    }

    // ========================================================================
    // Keyed Access
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has<K: IntoTimestamp>(&self, key: K) -> bool {
        self.entries.contains_key(&key.timestamp())
    }

    pub fn get<K: IntoTimestamp>(&self, key: K) -> Option<ExactDecimal> {
        self.entries.get(&key.timestamp()).map(|e| e.value)
    }

    pub(crate) fn entry(&self, timestamp: i64) -> Option<(DateTime<Utc>, ExactDecimal)> {
        self.entries
            .get(&timestamp)
            .map(|e| (e.instant, e.value))
    }

    // ========================================================================
    // Chronological Views
    // ========================================================================

    /// Run `f` over the ascending key list, re-sorting first if dirty.
    fn with_chronology<R>(&self, f: impl FnOnce(&[i64]) -> R) -> R {
        {
            let chronology = self.chronology.read();
            if !chronology.dirty {
                return f(&chronology.keys);
            }
        }

        let mut chronology = self.chronology.write();
        if chronology.dirty {
            let mut keys: Vec<i64> = self.entries.keys().copied().collect();
            keys.sort_unstable();
            tracing::trace!("Re-sorted chronology of {} entries", keys.len());
            chronology.keys = keys;
            chronology.dirty = false;
        }
        let chronology = RwLockWriteGuard::downgrade(chronology);
        f(&chronology.keys)
    }

    fn value_at(&self, timestamp: i64) -> ExactDecimal {
        self.entries[&timestamp].value
    }

    /// Ascending timestamps.
    pub fn keys(&self) -> Vec<i64> {
        self.with_chronology(|keys| keys.to_vec())
    }

    /// Values in chronological order.
    pub fn values(&self) -> DecimalVector {
        self.with_chronology(|keys| keys.iter().map(|t| self.value_at(*t)).collect())
    }

    /// `(timestamp, value)` pairs in chronological order.
    pub fn to_array(&self) -> Vec<(i64, ExactDecimal)> {
        self.with_chronology(|keys| keys.iter().map(|t| (*t, self.value_at(*t))).collect())
    }

    /// Ordered timestamp -> value map.
    pub fn to_map(&self) -> BTreeMap<i64, ExactDecimal> {
        self.entries.iter().map(|(t, e)| (*t, e.value)).collect()
    }

    pub fn first_timestamp(&self) -> SeriesResult<i64> {
        self.with_chronology(|keys| keys.first().copied())
            .ok_or(SeriesError::Empty { operation: "first" })
    }

    pub fn last_timestamp(&self) -> SeriesResult<i64> {
        self.with_chronology(|keys| keys.last().copied())
            .ok_or(SeriesError::Empty { operation: "last" })
    }

    /// Chronologically earliest value.
    pub fn first(&self) -> SeriesResult<ExactDecimal> {
        Ok(self.value_at(self.first_timestamp()?))
    }

    /// Chronologically latest value.
    pub fn last(&self) -> SeriesResult<ExactDecimal> {
        Ok(self.value_at(self.last_timestamp()?))
    }

    pub fn first_date_time(&self) -> SeriesResult<DateTime<Utc>> {
        Ok(self.entries[&self.first_timestamp()?].instant)
    }

    pub fn last_date_time(&self) -> SeriesResult<DateTime<Utc>> {
        Ok(self.entries[&self.last_timestamp()?].instant)
    }

    // ========================================================================
    // Interval Inference
    // ========================================================================

    /// Smallest gap between chronologically adjacent entries.
    ///
    /// `None` with fewer than two entries.
    pub fn min_date_interval(&self) -> Option<TimeDelta> {
        self.with_chronology(|keys| {
            keys.windows(2)
                .map(|w| w[1] - w[0])
                .filter(|gap| *gap > 0)
                .min()
        })
        .map(TimeDelta::seconds)
    }

    /// Gap between each entry and its predecessor; the first entry's gap is zero.
    pub fn date_intervals(&self) -> Vec<TimeDelta> {
        self.with_chronology(|keys| {
            let mut previous = keys.first().copied();
            keys.iter()
                .map(|t| {
                    let gap = t - previous.unwrap_or(*t);
                    previous = Some(*t);
                    TimeDelta::seconds(gap)
                })
                .collect()
        })
    }

    /// Instants from first to last, stepping by the minimum interval.
    ///
    /// The end is extended by one step so the last instant is included; a
    /// single-entry series yields just that instant. Near the end of the
    /// calendar range the period stops at the last representable step.
    pub fn date_period(&self) -> SeriesResult<Vec<DateTime<Utc>>> {
        let start = self.first_date_time()?;
        let last = self.last_date_time()?;
        let Some(step) = self.min_date_interval() else {
            return Ok(vec![start]);
        };

        let end = last.checked_add_signed(step);
        let mut period = Vec::new();
        let mut cursor = Some(start);
        while let Some(instant) = cursor {
            if end.is_some_and(|end| instant >= end) {
                break;
            }
            period.push(instant);
            cursor = instant.checked_add_signed(step);
        }
        Ok(period)
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Chronological cursor over this series.
    pub fn iter(&self) -> SeriesIterator<'_> {
        SeriesIterator::new(self)
    }

    /// Cursor aligning this series with `secondary` by timestamp.
    pub fn dual_iter<'a>(&'a self, secondary: &'a TimeSeries) -> DualSeriesIterator<'a> {
        DualSeriesIterator::new(self, secondary)
    }
}

impl Clone for TimeSeries {
    fn clone(&self) -> Self {
        let chronology = self.chronology.read();
        Self {
            entries: self.entries.clone(),
            chronology: RwLock::new(Chronology {
                keys: chronology.keys.clone(),
                dirty: chronology.dirty,
            }),
        }
    }
}

impl PartialEq for TimeSeries {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for TimeSeries {}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for TimeSeries {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.to_array())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimeSeries {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = <BTreeMap<i64, ExactDecimal> as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_pairs(map).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================



#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut ts = TimeSeries::new();
        ts.set(20, "2.5".parse().unwrap()).unwrap();
        ts.set(10, "1".parse().unwrap()).unwrap();

        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, r#"{"10":"1","20":"2.5"}"#);

        let back: TimeSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
