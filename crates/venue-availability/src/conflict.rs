//! Detect schedule blocks that collide with a reservation.
//!
//! Comparison happens on minutes of the day, per weekday. A reservation that ends
//! exactly when a block starts (or starts exactly when one ends) is NOT a conflict.

use chrono::Weekday;

use crate::schedule::ScheduleBlock;

/// A pair of minute-of-day offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteRange {
    pub start: u32,
    pub end: u32,
}

impl MinuteRange {
    /// Half-open overlap: `self.start < other.end && self.end > other.start`.
    pub fn overlaps(&self, other: &MinuteRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl ScheduleBlock {
    pub fn minute_range(&self) -> MinuteRange {
        MinuteRange {
            start: self.start_time.minute_of_day(),
            end: self.end_time.minute_of_day(),
        }
    }
}

/// All blocks colliding with `reservation`, in weekday order, then block order.
///
/// A block only takes part when its `day_of_week` is one of `weekdays`.
pub fn conflicting_blocks<'a>(
    weekdays: &'a [Weekday],
    reservation: MinuteRange,
    blocks: &'a [ScheduleBlock],
) -> impl Iterator<Item = &'a ScheduleBlock> + 'a {
    weekdays
        .iter()
        .flat_map(move |day| blocks.iter().filter(move |b| b.day_of_week == *day))
        .filter(move |b| reservation.overlaps(&b.minute_range()))
}

/// The first block colliding with `reservation`, if any.
pub fn first_conflict<'a>(
    weekdays: &'a [Weekday],
    reservation: MinuteRange,
    blocks: &'a [ScheduleBlock],
) -> Option<&'a ScheduleBlock> {
    conflicting_blocks(weekdays, reservation, blocks).next()
}
