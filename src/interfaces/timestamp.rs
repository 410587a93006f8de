// ============================================================================
// Timestamp Interface
// Conversion of calendar instants and raw keys into series timestamps
// ============================================================================

use crate::errors::{SeriesError, SeriesResult};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Anything that names a second on the Unix timeline.
///
/// Sub-second components are truncated, so two instants within the same
/// second address the same series entry.
pub trait IntoTimestamp {
    /// Unix timestamp in whole seconds
    fn timestamp(&self) -> i64;
}

impl IntoTimestamp for i64 {
    #[inline]
    fn timestamp(&self) -> i64 {
        *self
    }
}

impl<Tz: TimeZone> IntoTimestamp for DateTime<Tz> {
    #[inline]
    fn timestamp(&self) -> i64 {
        DateTime::timestamp(self)
    }
}

impl IntoTimestamp for NaiveDateTime {
    #[inline]
    fn timestamp(&self) -> i64 {
        self.and_utc().timestamp()
    }
}

impl<T: IntoTimestamp + ?Sized> IntoTimestamp for &T {
    #[inline]
    fn timestamp(&self) -> i64 {
        (**self).timestamp()
    }
}

/// Resolve a raw timestamp to a UTC instant.
///
/// # Errors
/// `InvalidArgument` if the timestamp is outside chrono's supported range.
pub fn instant_from_timestamp(timestamp: i64) -> SeriesResult<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        SeriesError::InvalidArgument(format!(
            "timestamp {} does not resolve to a calendar instant",
            timestamp
        ))
    })
}

/// Parse a textual key: either an integer timestamp or an RFC 3339 instant.
pub fn parse_time_key(raw: &str) -> SeriesResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = raw.parse::<i64>() {
        return instant_from_timestamp(timestamp);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| {
            SeriesError::InvalidArgument(format!("{:?} is not a time key: {}", raw, err))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use chrono::FixedOffset;

    #[test]
    fn test_timestamp_of_instants() {
        let utc = DateTime::from_timestamp(1_700_000_000, 999_000_000).unwrap();
        assert_eq!(IntoTimestamp::timestamp(&utc), 1_700_000_000);

        let offset = utc.with_timezone(&FixedOffset::east_opt(3600).unwrap());
        assert_eq!(IntoTimestamp::timestamp(&offset), 1_700_000_000);

        assert_eq!(IntoTimestamp::timestamp(&utc.naive_utc()), 1_700_000_000);
        assert_eq!(42_i64.timestamp(), 42);
    }

    #[test]
    fn test_instant_from_timestamp() {
        assert_eq!(instant_from_timestamp(0).unwrap().timestamp(), 0);
        let err = instant_from_timestamp(i64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_parse_time_key() {
        assert_eq!(parse_time_key("86400").unwrap().timestamp(), 86_400);
        assert_eq!(
            parse_time_key("1970-01-02T00:00:00Z").unwrap().timestamp(),
            86_400
        );
        assert_eq!(
            parse_time_key("1970-01-02T01:00:00+01:00")
                .unwrap()
                .timestamp(),
            86_400
        );
        assert!(parse_time_key("yesterday").is_err());
    }
}
