//! Reservation windows and their civil-time projections.
//!
//! A window is stored as a pair of UTC instants. Everything the evaluator
//! compares (weekday names and minutes of the day) is derived from civil time in
//! the configured timezone, never from the caller's local clock.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::conflict::MinuteRange;
use crate::error::{AvailabilityError, Result};

/// The occupancy interval a reservation requests. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReservationWindow {
    /// # Errors
    /// Returns `AvailabilityError::InvalidWindow` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(AvailabilityError::InvalidWindow(format!(
                "start {} is not before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a window from two ISO 8601 timestamps.
    ///
    /// Timestamps without an offset are read as civil time in `tz`.
    pub fn parse(start: &str, end: &str, tz: Tz) -> Result<Self> {
        Self::new(parse_timestamp(start, tz)?, parse_timestamp(end, tz)?)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Distinct weekdays of every civil date from the start date through the
    /// end date (both inclusive), in first-seen order.
    pub fn spanned_weekdays(&self, tz: Tz) -> Vec<Weekday> {
        let first = self.start.with_timezone(&tz).date_naive();
        let last = self.end.with_timezone(&tz).date_naive();

        let mut days = Vec::with_capacity(7);
        for date in first.iter_days().take_while(|d| *d <= last) {
            let day = date.weekday();
            // Weekdays cycle, so the first repeat means every day has been seen.
            if days.contains(&day) {
                break;
            }
            days.push(day);
        }
        days
    }

    /// Minute-of-day of the civil start and end times, dates ignored.
    ///
    /// For a window crossing midnight the start minute is larger than the end
    /// minute; the pair is used as-is.
    pub fn minute_range(&self, tz: Tz) -> MinuteRange {
        let start = self.start.with_timezone(&tz);
        let end = self.end.with_timezone(&tz);
        MinuteRange {
            start: start.hour() * 60 + start.minute(),
            end: end.hour() * 60 + end.minute(),
        }
    }
}

/// Compute the spanned weekdays of a window. See [`ReservationWindow::spanned_weekdays`].
pub fn spanned_weekdays(window: &ReservationWindow, tz: Tz) -> Vec<Weekday> {
    window.spanned_weekdays(tz)
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 timestamp into a UTC instant.
///
/// Accepts RFC 3339 (with offset, e.g. "2026-03-16T09:00:00+08:00") and naive
/// local time (e.g. "2026-03-16T09:00:00"), which is interpreted as civil time
/// in `tz`.
///
/// # Errors
/// Returns `AvailabilityError::InvalidTimestamp` if the string matches no
/// accepted format, or names a local time that does not exist or is ambiguous
/// in `tz`.
pub fn parse_timestamp(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AvailabilityError::InvalidTimestamp(s.to_string()))?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            AvailabilityError::InvalidTimestamp(format!(
                "{} is not a unique local time in {}",
                s,
                tz.name()
            ))
        })
}
