// ============================================================================
// Series Iterator
// Read-only chronological cursor over one TimeSeries
// ============================================================================

use super::TimeSeries;
use crate::errors::{SeriesError, SeriesResult};
use crate::numeric::ExactDecimal;
use chrono::{DateTime, Utc};

/// What [`SeriesIterator::key`] reports for the current element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesKeyMode {
    /// 0-based chronological position
    Index,
    /// Raw Unix timestamp
    #[default]
    Timestamp,
    /// Calendar instant
    DateTime,
}

/// Key of the current element, shaped by the iterator's [`SeriesKeyMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKey {
    Index(usize),
    Timestamp(i64),
    DateTime(DateTime<Utc>),
}

/// Forward cursor over a [`TimeSeries`] in ascending timestamp order.
///
/// The ordered key list is snapshotted on construction and on every
/// [`rewind`](Self::rewind). The iterator borrows the series, so the series
/// cannot be mutated while a cursor is alive.
#[derive(Debug)]
pub struct SeriesIterator<'a> {
    series: &'a TimeSeries,
    mode: SeriesKeyMode,
    timestamps: Vec<i64>,
    position: usize,
    advanced: bool,
}

impl<'a> SeriesIterator<'a> {
    pub fn new(series: &'a TimeSeries) -> Self {
        Self {
            series,
            mode: SeriesKeyMode::default(),
            timestamps: series.keys(),
            position: 0,
            advanced: false,
        }
    }

    /// Builder pattern: choose the key mode before iterating
    ///
    /// # Errors
    /// `InvalidArgument` once the cursor has advanced, as for
    /// [`set_key_mode`](Self::set_key_mode).
    pub fn with_key_mode(mut self, mode: SeriesKeyMode) -> SeriesResult<Self> {
        self.set_key_mode(mode)?;
        Ok(self)
    }

    pub fn key_mode(&self) -> SeriesKeyMode {
        self.mode
    }

    /// Change the key mode.
    ///
    /// # Errors
    /// `InvalidArgument` once the cursor has advanced since construction or
    /// the last [`rewind`](Self::rewind).
    pub fn set_key_mode(&mut self, mode: SeriesKeyMode) -> SeriesResult<()> {
        if self.advanced && mode != self.mode {
            return Err(SeriesError::InvalidArgument(
                "key mode cannot change after iteration has started".to_string(),
            ));
        }
        self.mode = mode;
        Ok(())
    }

    /// Back to the first element, re-snapshotting the key list.
    ///
    /// The key mode can be changed again until the next advance.
    pub fn rewind(&mut self) {
        self.timestamps = self.series.keys();
        self.position = 0;
        self.advanced = false;
    }

    pub fn advance(&mut self) {
        self.advanced = true;
        if self.position < self.timestamps.len() {
            self.position += 1;
        }
    }

    pub fn valid(&self) -> bool {
        self.position < self.timestamps.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<ExactDecimal> {
        let timestamp = *self.timestamps.get(self.position)?;
        self.series.get(timestamp)
    }

    pub fn key(&self) -> Option<SeriesKey> {
        let timestamp = *self.timestamps.get(self.position)?;
        match self.mode {
            SeriesKeyMode::Index => Some(SeriesKey::Index(self.position)),
            SeriesKeyMode::Timestamp => Some(SeriesKey::Timestamp(timestamp)),
            SeriesKeyMode::DateTime => self
                .series
                .entry(timestamp)
                .map(|(instant, _)| SeriesKey::DateTime(instant)),
        }
    }
}

impl Iterator for SeriesIterator<'_> {
    type Item = (SeriesKey, ExactDecimal);

    fn next(&mut self) -> Option<Self::Item> {
        let item = (self.key()?, self.current()?);
        self.advance();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.timestamps.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SeriesIterator<'_> {}
