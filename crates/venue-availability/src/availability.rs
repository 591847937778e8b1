//! Venue availability evaluation.
//!
//! Given a reservation window and every recurring weekly schedule block known
//! upstream, decides whether a venue is free. Blocks recur by weekday: a block
//! fixed to "Monday" collides with a reservation on any Monday, whatever its
//! calendar date. Only time of day is compared, even for multi-day windows.
//!
//! When a venue has no blocks at all the result depends on
//! [`EvaluatorConfig::assume_available_when_no_data`].

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::EvaluatorConfig;
use crate::conflict;
use crate::error::{AvailabilityError, Result};
use crate::schedule::{weekday_name, ScheduleBlock, ScheduleRecord, TimeOfDay, VenueId};
use crate::window::ReservationWindow;

/// The block a reservation collides with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDetails {
    pub section_name: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl From<&ScheduleBlock> for ConflictDetails {
    fn from(block: &ScheduleBlock) -> Self {
        Self {
            section_name: block.section_name.clone(),
            start_time: block.start_time,
            end_time: block.end_time,
        }
    }
}

/// Outcome of an availability check.
///
/// Serializes as `{"status":"available"}` or
/// `{"status":"conflict","section_name":..,"start_time":..,"end_time":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AvailabilityResult {
    Available,
    Conflict(ConflictDetails),
}

impl AvailabilityResult {
    pub fn is_available(&self) -> bool {
        matches!(self, AvailabilityResult::Available)
    }

    pub fn conflict(&self) -> Option<&ConflictDetails> {
        match self {
            AvailabilityResult::Available => None,
            AvailabilityResult::Conflict(details) => Some(details),
        }
    }
}

/// Result for one venue of a multi-venue reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueAvailability {
    pub venue_id: VenueId,
    #[serde(flatten)]
    pub result: AvailabilityResult,
}

/// Check whether `venue_id` is free for `window`.
///
/// `records` may hold blocks for any number of venues; only those whose id
/// equals `venue_id` are validated and compared. The first colliding block, in
/// spanned-weekday order then input order, is reported.
///
/// # Errors
/// - `AvailabilityError::InvalidScheduleBlock` if one of the venue's records
///   is malformed.
/// - `AvailabilityError::NoScheduleData` if the venue has no records and
///   `config.assume_available_when_no_data` is false.
pub fn check_availability(
    venue_id: &VenueId,
    window: &ReservationWindow,
    records: &[ScheduleRecord],
    config: &EvaluatorConfig,
) -> Result<AvailabilityResult> {
    let blocks = venue_blocks(venue_id, records)?;
    if blocks.is_empty() {
        return no_data_result(venue_id, config);
    }

    let weekdays = window.spanned_weekdays(config.timezone);
    let reservation = window.minute_range(config.timezone);
    trace!(
        venue = %venue_id,
        weekdays = ?weekdays.iter().map(|d| weekday_name(*d)).collect::<Vec<_>>(),
        start_minute = reservation.start,
        end_minute = reservation.end,
        "evaluating reservation window"
    );

    let result = match conflict::first_conflict(&weekdays, reservation, &blocks) {
        Some(block) => {
            debug!(
                venue = %venue_id,
                section = %block.section_name,
                day = weekday_name(block.day_of_week),
                start = %block.start_time,
                end = %block.end_time,
                "schedule conflict"
            );
            AvailabilityResult::Conflict(ConflictDetails::from(block))
        }
        None => {
            debug!(venue = %venue_id, blocks = blocks.len(), "venue available");
            AvailabilityResult::Available
        }
    };

    Ok(result)
}

/// Check every venue of a reservation, returning one result per venue in input
/// order. Stops at the first venue that fails.
pub fn check_venues(
    venue_ids: &[VenueId],
    window: &ReservationWindow,
    records: &[ScheduleRecord],
    config: &EvaluatorConfig,
) -> Result<Vec<VenueAvailability>> {
    venue_ids
        .iter()
        .map(|venue_id| {
            check_availability(venue_id, window, records, config).map(|result| {
                VenueAvailability {
                    venue_id: venue_id.clone(),
                    result,
                }
            })
        })
        .collect()
}

/// Every block of `venue_id` colliding with `window`, in the same order
/// [`check_availability`] searches.
///
/// An empty list means the venue is free; the no-data policy applies as in
/// [`check_availability`].
pub fn find_conflicts(
    venue_id: &VenueId,
    window: &ReservationWindow,
    records: &[ScheduleRecord],
    config: &EvaluatorConfig,
) -> Result<Vec<ConflictDetails>> {
    let blocks = venue_blocks(venue_id, records)?;
    if blocks.is_empty() {
        return no_data_result(venue_id, config).map(|_| Vec::new());
    }

    let weekdays = window.spanned_weekdays(config.timezone);
    let reservation = window.minute_range(config.timezone);

    Ok(
        conflict::conflicting_blocks(&weekdays, reservation, &blocks)
            .map(ConflictDetails::from)
            .collect(),
    )
}

/// Validate the records belonging to `venue_id`, keeping input order.
fn venue_blocks(venue_id: &VenueId, records: &[ScheduleRecord]) -> Result<Vec<ScheduleBlock>> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.ven_id.as_ref() == Some(venue_id))
        .map(|(index, record)| record.to_block(index))
        .collect()
}

fn no_data_result(venue_id: &VenueId, config: &EvaluatorConfig) -> Result<AvailabilityResult> {
    if config.assume_available_when_no_data {
        debug!(venue = %venue_id, "no schedule blocks, assuming available");
        Ok(AvailabilityResult::Available)
    } else {
        Err(AvailabilityError::NoScheduleData(venue_id.clone()))
    }
}
