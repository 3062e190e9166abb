//! Timestamp helpers for the storage layer.
//!
//! All database timestamps are RFC-3339 UTC strings with millisecond precision
//! (`2024-05-01T12:00:00.000Z`). One fixed width format means the same instant
//! always produces the same key, and lexical order equals chronological order,
//! so range filters can compare the text columns directly.
//!
//! Precision stops at the millisecond: instants that differ by less than that
//! format identically and therefore share a fact key. Provider timestamps are
//! whole seconds.

use chrono::{DateTime, Datelike, Days, Duration, SecondsFormat, Utc};

use crate::error::PersistenceError;

/// Format a UTC datetime as an RFC-3339 string with millisecond precision.
pub fn to_rfc3339_millis(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// RFC-3339 with offset -> UTC.
///
/// Example:
/// - "2024-03-10T09:30:00-05:00" -> "2024-03-10T14:30:00Z"
pub fn parse_ts_to_utc(s: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| PersistenceError::Timestamp(s.to_string()))
}

/// Monday 00:00 UTC of the ISO week containing `now`.
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let back = Days::new(u64::from(now.weekday().num_days_from_monday()));
    let monday = now.date_naive() - back;
    monday.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// `[start, end)` of the calendar week before the one containing `now`.
pub fn previous_week(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = week_start(now);
    (end - Duration::days(7), end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_rfc3339_offset_to_utc() {
        let got = parse_ts_to_utc("2024-03-10T09:30:00-05:00").expect("parse");
        let want = Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap();
        assert_eq!(got, want);
    }

    #[test]
    fn garbage_is_a_timestamp_error() {
        assert!(matches!(
            parse_ts_to_utc("yesterday"),
            Err(PersistenceError::Timestamp(_))
        ));
    }

    #[test]
    fn millis_format_is_fixed_width() {
        let a = to_rfc3339_millis(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        let b = to_rfc3339_millis(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        assert_eq!(a, "2024-05-01T09:00:00.000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn previous_week_is_monday_to_monday() {
        // Thursday 2024-05-09
        let now = Utc.with_ymd_and_hms(2024, 5, 9, 15, 42, 7).unwrap();
        let (start, end) = previous_week(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 4, 29, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap());
    }

    #[test]
    fn week_start_on_a_monday_is_that_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap();
        assert_eq!(week_start(now), now);
    }
}
