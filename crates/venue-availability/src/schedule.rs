//! Schedule records as delivered by the upstream reservation API, and the
//! validated blocks the evaluator works with.
//!
//! Upstream payloads are loosely typed: venue ids arrive as either strings or
//! numbers, and times arrive as `"HH:MM:SS"` strings. Everything is normalized
//! here, at the boundary, so the evaluator only ever sees typed values.

use std::fmt;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{AvailabilityError, Result};

// ---------------------------------------------------------------------------
// Venue identifiers
// ---------------------------------------------------------------------------

/// Canonical venue identifier.
///
/// Ids are compared as strings, so the JSON values `12` and `"12"` refer to the
/// same venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawVenueId", into = "String")]
pub struct VenueId(String);

/// Wire shapes accepted for a venue id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVenueId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl From<RawVenueId> for VenueId {
    fn from(raw: RawVenueId) -> Self {
        match raw {
            RawVenueId::Text(s) => VenueId(s),
            RawVenueId::Signed(n) => VenueId(n.to_string()),
            RawVenueId::Unsigned(n) => VenueId(n.to_string()),
            RawVenueId::Float(n) => VenueId(n.to_string()),
        }
    }
}

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        VenueId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VenueId {
    fn from(s: &str) -> Self {
        VenueId(s.to_string())
    }
}

impl From<String> for VenueId {
    fn from(s: String) -> Self {
        VenueId(s)
    }
}

impl From<i64> for VenueId {
    fn from(n: i64) -> Self {
        VenueId(n.to_string())
    }
}

impl From<u64> for VenueId {
    fn from(n: u64) -> Self {
        VenueId(n.to_string())
    }
}

impl From<i32> for VenueId {
    fn from(n: i32) -> Self {
        VenueId(n.to_string())
    }
}

impl From<u32> for VenueId {
    fn from(n: u32) -> Self {
        VenueId(n.to_string())
    }
}

impl From<VenueId> for String {
    fn from(id: VenueId) -> Self {
        id.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Time of day
// ---------------------------------------------------------------------------

/// A civil time of day, displayed and serialized as `HH:MM:SS`.
///
/// `24:00:00` is accepted as the end of the day (minute 1440), as MySQL `TIME`
/// columns allow it for blocks running until midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    seconds: u32,
}

const END_OF_DAY: u32 = 24 * 3600;

impl TimeOfDay {
    /// Parse `HH:MM:SS` (optionally with fractional seconds) or `HH:MM`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if matches!(s, "24:00" | "24:00:00") {
            return Some(TimeOfDay {
                seconds: END_OF_DAY,
            });
        }
        ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"]
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
            .map(TimeOfDay::from)
    }

    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if (hour, minute, second) == (24, 0, 0) {
            return Some(TimeOfDay {
                seconds: END_OF_DAY,
            });
        }
        NaiveTime::from_hms_opt(hour, minute, second).map(TimeOfDay::from)
    }

    /// `hour * 60 + minute`. Seconds are ignored.
    pub fn minute_of_day(self) -> u32 {
        self.seconds / 60
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        TimeOfDay {
            seconds: t.num_seconds_from_midnight(),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.seconds / 3600,
            self.seconds / 60 % 60,
            self.seconds % 60
        )
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day '{}'", s)))
    }
}

// ---------------------------------------------------------------------------
// Weekdays
// ---------------------------------------------------------------------------

/// Parse a weekday name such as `"Monday"`, `"monday"` or `"Mon"`.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    s.trim().parse().ok()
}

/// Full English name of a weekday, as used by upstream schedule data.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ---------------------------------------------------------------------------
// Records and blocks
// ---------------------------------------------------------------------------

/// A schedule block exactly as the upstream API returns it.
///
/// Fields are read leniently: a missing or `null` value (or a value of the
/// wrong JSON type) never fails the payload. Such records are rejected only
/// when validated, so one broken record cannot affect checks of other venues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// `None` when the upstream id is missing, `null`, or not a string/number.
    #[serde(alias = "venue_id", default, deserialize_with = "lenient_venue_id")]
    pub ven_id: Option<VenueId>,
    #[serde(alias = "day", default, deserialize_with = "lenient_string")]
    pub day_of_week: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_time: String,
    #[serde(alias = "section", default, deserialize_with = "lenient_string")]
    pub section_name: String,
}

/// `null` becomes the empty string; other non-string values keep their JSON text.
fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn lenient_venue_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<VenueId>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(_) | Value::Number(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Reject an empty wire field as missing.
fn required<'a>(value: &'a str, field: &str) -> std::result::Result<&'a str, String> {
    if value.trim().is_empty() {
        Err(format!("missing {}", field))
    } else {
        Ok(value)
    }
}

/// A validated recurring weekly occupancy slot for one venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBlock {
    pub venue_id: VenueId,
    pub day_of_week: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub section_name: String,
}

impl ScheduleRecord {
    /// Validate this record into a [`ScheduleBlock`].
    ///
    /// `index` is the record's position in the caller's input and is reported
    /// back in the error.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidScheduleBlock` for a missing field, an
    /// unknown weekday name, an unparseable time, or an `end_time` not after
    /// `start_time`.
    pub fn to_block(&self, index: usize) -> Result<ScheduleBlock> {
        self.validate()
            .map_err(|reason| AvailabilityError::InvalidScheduleBlock { index, reason })
    }

    fn validate(&self) -> std::result::Result<ScheduleBlock, String> {
        let venue_id = self.ven_id.clone().ok_or("missing ven_id")?;
        let day_of_week = parse_weekday(required(&self.day_of_week, "day_of_week")?)
            .ok_or_else(|| format!("unknown day_of_week '{}'", self.day_of_week))?;
        let start_time = TimeOfDay::parse(required(&self.start_time, "start_time")?)
            .ok_or_else(|| format!("invalid start_time '{}'", self.start_time))?;
        let end_time = TimeOfDay::parse(required(&self.end_time, "end_time")?)
            .ok_or_else(|| format!("invalid end_time '{}'", self.end_time))?;

        if end_time.minute_of_day() <= start_time.minute_of_day() {
            return Err(format!(
                "end_time {} is not after start_time {}",
                end_time, start_time
            ));
        }

        Ok(ScheduleBlock {
            venue_id,
            day_of_week,
            start_time,
            end_time,
            section_name: self.section_name.clone(),
        })
    }
}

/// The `{status, data}` envelope the upstream schedule endpoint responds with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub status: Value,
    pub data: Vec<ScheduleRecord>,
}

/// Parse a schedule payload: either a bare JSON array of records or a
/// `{status, data}` envelope.
pub fn parse_schedule_json(json: &str) -> Result<Vec<ScheduleRecord>> {
    let value: Value = serde_json::from_str(json)?;

    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    if value.is_object() && value.get("data").is_some() {
        let response: ScheduleResponse = serde_json::from_value(value)?;
        debug!(
            status = %response.status,
            records = response.data.len(),
            "schedule envelope parsed"
        );
        return Ok(response.data);
    }

    Err(AvailabilityError::Json(serde::de::Error::custom(
        "expected an array of schedule records or a {status, data} envelope",
    )))
}

/// A problem found while validating a schedule payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleIssue {
    pub index: usize,
    pub venue_id: Option<VenueId>,
    pub reason: String,
}

/// Validate every record and report all problems, in input order.
///
/// Unlike an availability check, which only inspects the requested venue's
/// records, this looks at the whole payload.
pub fn validate_records(records: &[ScheduleRecord]) -> Vec<ScheduleIssue> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record.validate().err().map(|reason| ScheduleIssue {
                index,
                venue_id: record.ven_id.clone(),
                reason,
            })
        })
        .collect()
}
