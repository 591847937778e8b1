//! Error types for venue availability operations.

use thiserror::Error;

use crate::schedule::VenueId;

#[derive(Error, Debug)]
pub enum AvailabilityError {
    /// A schedule record for the requested venue could not be validated.
    /// `index` is the record's position in the caller's input.
    #[error("Invalid schedule block at index {index}: {reason}")]
    InvalidScheduleBlock { index: usize, reason: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid reservation window: {0}")]
    InvalidWindow(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Raised only when `assume_available_when_no_data` is disabled.
    #[error("No schedule data for venue {0}")]
    NoScheduleData(VenueId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
