//! Time helpers for calendar events.
//!
//! The service reports timestamps as milliseconds since the Unix epoch and
//! carries no timezone. Events store whole seconds ([`millis_to_epoch_seconds`]),
//! and the calendar document prints them as `YYYYMMDDTHHMMSS` in whatever
//! timezone the renderer is given ([`format_stamp`]).
//!
//! [`MonthRef`] names the calendar month that is requested from the service.

use std::fmt;

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The strftime pattern for `DTSTART`/`DTEND` values.
pub const STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Converts a millisecond timestamp to whole seconds, discarding the remainder.
pub fn millis_to_epoch_seconds(millis: i64) -> i64 {
    millis.div_euclid(1000)
}

/// Returns the UTC datetime for `secs`, if it is within chrono's range.
pub fn epoch_datetime(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Formats epoch seconds as `YYYYMMDDTHHMMSS` in the given timezone.
///
/// Out-of-range values fall back to the epoch itself; the normalizer rejects
/// those before an event is ever built.
pub fn format_stamp<Tz>(secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    epoch_datetime(secs)
        .unwrap_or_default()
        .with_timezone(tz)
        .format(STAMP_FORMAT)
        .to_string()
}

/// A calendar month, as requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRef {
    /// Month of the year, 1-12.
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
}

impl MonthRef {
    /// Creates a month reference. Returns `None` unless `month` is 1-12.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { month, year })
    }

    /// The current month in the local timezone.
    pub fn current() -> Self {
        Self::containing(&Local::now())
    }

    /// The month containing `date`.
    pub fn containing<Tz: TimeZone>(date: &DateTime<Tz>) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn millis_are_floored() {
        assert_eq!(millis_to_epoch_seconds(1_700_000_000_123), 1_700_000_000);
        assert_eq!(millis_to_epoch_seconds(1_700_000_000_999), 1_700_000_000);
        assert_eq!(millis_to_epoch_seconds(1_700_000_000_000), 1_700_000_000);
        assert_eq!(millis_to_epoch_seconds(999), 0);
        assert_eq!(millis_to_epoch_seconds(0), 0);
    }

    #[test]
    fn negative_millis_round_down() {
        assert_eq!(millis_to_epoch_seconds(-1), -1);
        assert_eq!(millis_to_epoch_seconds(-1000), -1);
    }

    #[test]
    fn stamp_in_utc() {
        assert_eq!(format_stamp(0, &Utc), "19700101T000000");
        assert_eq!(format_stamp(1_700_000_000, &Utc), "20231114T221320");
    }

    #[test]
    fn stamp_follows_the_given_timezone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_stamp(1_700_000_000, &plus_two), "20231115T001320");

        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(format_stamp(1_700_000_000, &minus_five), "20231114T171320");
    }

    #[test]
    fn stamp_matches_local_conversion() {
        let expected = Utc
            .timestamp_opt(1_262_304_000, 0)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y%m%dT%H%M%S")
            .to_string();
        assert_eq!(format_stamp(1_262_304_000, &Local), expected);
    }

    #[test]
    fn out_of_range_is_detected() {
        assert!(epoch_datetime(i64::MAX).is_none());
        assert!(epoch_datetime(1_700_000_000).is_some());
    }

    #[test]
    fn month_ref_validation() {
        assert!(MonthRef::new(0, 2010).is_none());
        assert!(MonthRef::new(13, 2010).is_none());
        let month = MonthRef::new(3, 2010).unwrap();
        assert_eq!(month.month, 3);
        assert_eq!(month.year, 2010);
        assert_eq!(month.to_string(), "2010-03");
    }

    #[test]
    fn month_containing_date() {
        let date = Utc.with_ymd_and_hms(2010, 11, 30, 23, 0, 0).unwrap();
        assert_eq!(MonthRef::containing(&date), MonthRef::new(11, 2010).unwrap());
    }
}
