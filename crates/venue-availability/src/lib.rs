//! # venue-availability
//!
//! Decides whether a venue is free for a reservation, given the venue's
//! recurring weekly schedule blocks (class sections and the like).
//!
//! Reservation timestamps are read as civil time in one configured timezone
//! (`Asia/Manila` by default), so weekday and time-of-day comparisons do not
//! depend on where the check runs. Blocks recur by weekday name and are
//! compared by minute of the day using half-open overlap, so back-to-back
//! bookings never collide.
//!
//! ```rust
//! use venue_availability::{
//!     check_availability, parse_schedule_json, EvaluatorConfig, ReservationWindow, VenueId,
//! };
//!
//! let records = parse_schedule_json(
//!     r#"[{"ven_id":7,"day_of_week":"Monday","start_time":"08:00:00",
//!          "end_time":"10:00:00","section_name":"BSIT-1A"}]"#,
//! )
//! .unwrap();
//! let config = EvaluatorConfig::default();
//! let window =
//!     ReservationWindow::parse("2026-03-16T10:00:00", "2026-03-16T12:00:00", config.timezone)
//!         .unwrap();
//!
//! let result = check_availability(&VenueId::from("7"), &window, &records, &config).unwrap();
//! assert!(result.is_available());
//! ```
//!
//! ## Modules
//!
//! - [`availability`] — availability checks for one or several venues
//! - [`conflict`] — minute-of-day overlap between a reservation and blocks
//! - [`schedule`] — upstream records, validated blocks, venue ids
//! - [`window`] — reservation windows and timestamp parsing
//! - [`config`] — evaluator configuration (timezone, no-data policy)
//! - [`error`] — Error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod error;
pub mod schedule;
pub mod window;

pub use availability::{
    check_availability, check_venues, find_conflicts, AvailabilityResult, ConflictDetails,
    VenueAvailability,
};
pub use config::EvaluatorConfig;
pub use error::AvailabilityError;
pub use schedule::{
    parse_schedule_json, validate_records, ScheduleBlock, ScheduleIssue, ScheduleRecord,
    TimeOfDay, VenueId,
};
pub use window::{parse_timestamp, spanned_weekdays, ReservationWindow};
