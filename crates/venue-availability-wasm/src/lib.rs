//! WASM bindings for venue-availability.
//!
//! Exposes availability checks, weekday spans and schedule validation to
//! JavaScript via `wasm-bindgen`. All complex types are passed as JSON strings.
//! The JSON-in/JSON-out logic lives in [`bridge`] so it can be exercised without
//! a JavaScript host; the exports only convert errors into `JsValue`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p venue-availability-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/venue-availability-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/venue_availability_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

pub mod bridge {
    use serde::Serialize;
    use venue_availability::schedule::weekday_name;
    use venue_availability::{
        check_availability as check_one, check_venues as check_many, parse_schedule_json,
        validate_records, EvaluatorConfig, ReservationWindow, VenueId,
    };

    /// Parse the optional `EvaluatorConfig` JSON. Absent or blank means defaults.
    fn parse_options(options_json: Option<&str>) -> Result<EvaluatorConfig, String> {
        match options_json.map(str::trim) {
            None | Some("") => Ok(EvaluatorConfig::default()),
            Some(json) => {
                serde_json::from_str(json).map_err(|e| format!("Invalid options JSON: {}", e))
            }
        }
    }

    fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
        serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
    }

    /// See [`crate::check_availability`].
    pub fn check_availability(
        venue_id: &str,
        start: &str,
        end: &str,
        schedules_json: &str,
        options_json: Option<&str>,
    ) -> Result<String, String> {
        let config = parse_options(options_json)?;
        let window =
            ReservationWindow::parse(start, end, config.timezone).map_err(|e| e.to_string())?;
        let records = parse_schedule_json(schedules_json).map_err(|e| e.to_string())?;

        let result = check_one(&VenueId::from(venue_id), &window, &records, &config)
            .map_err(|e| e.to_string())?;
        to_json(&result)
    }

    /// See [`crate::check_venues`].
    pub fn check_venues(
        venue_ids_json: &str,
        start: &str,
        end: &str,
        schedules_json: &str,
        options_json: Option<&str>,
    ) -> Result<String, String> {
        let config = parse_options(options_json)?;
        let venue_ids: Vec<VenueId> = serde_json::from_str(venue_ids_json)
            .map_err(|e| format!("Invalid venue ids JSON: {}", e))?;
        let window =
            ReservationWindow::parse(start, end, config.timezone).map_err(|e| e.to_string())?;
        let records = parse_schedule_json(schedules_json).map_err(|e| e.to_string())?;

        let results =
            check_many(&venue_ids, &window, &records, &config).map_err(|e| e.to_string())?;
        to_json(&results)
    }

    /// See [`crate::spanned_weekdays`].
    pub fn spanned_weekdays(
        start: &str,
        end: &str,
        timezone: Option<&str>,
    ) -> Result<String, String> {
        let config = match timezone {
            Some(tz) => EvaluatorConfig::default()
                .with_timezone(tz)
                .map_err(|e| e.to_string())?,
            None => EvaluatorConfig::default(),
        };
        let window =
            ReservationWindow::parse(start, end, config.timezone).map_err(|e| e.to_string())?;

        let names: Vec<&str> = window
            .spanned_weekdays(config.timezone)
            .into_iter()
            .map(weekday_name)
            .collect();
        to_json(&names)
    }

    /// See [`crate::validate_schedules`].
    pub fn validate_schedules(schedules_json: &str) -> Result<String, String> {
        let records = parse_schedule_json(schedules_json).map_err(|e| e.to_string())?;
        to_json(&validate_records(&records))
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check whether a venue is free for a reservation window.
///
/// Returns `{"status":"available"}` or
/// `{"status":"conflict","section_name":..,"start_time":..,"end_time":..}`.
///
/// # Arguments
/// - `venue_id` -- Venue identifier (numbers should be passed as their string form)
/// - `start`, `end` -- ISO 8601 timestamps; without an offset they are civil time
///   in the configured timezone
/// - `schedules_json` -- Array of schedule records, or the `{status, data}` envelope
/// - `options_json` -- Optional `{"timezone":..,"assume_available_when_no_data":..}`
#[wasm_bindgen(js_name = "checkAvailability")]
pub fn check_availability(
    venue_id: &str,
    start: &str,
    end: &str,
    schedules_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    bridge::check_availability(venue_id, start, end, schedules_json, options_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Check several venues of one reservation.
///
/// `venue_ids_json` is a JSON array of ids (strings or numbers). Returns a JSON
/// array with one `{venue_id, status, ...}` object per venue, in input order.
#[wasm_bindgen(js_name = "checkVenues")]
pub fn check_venues(
    venue_ids_json: &str,
    start: &str,
    end: &str,
    schedules_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    bridge::check_venues(
        venue_ids_json,
        start,
        end,
        schedules_json,
        options_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Weekday names spanned by a reservation window, as a JSON array.
#[wasm_bindgen(js_name = "spannedWeekdays")]
pub fn spanned_weekdays(
    start: &str,
    end: &str,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    bridge::spanned_weekdays(start, end, timezone.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Validate every schedule record. Returns a JSON array of
/// `{index, venue_id, reason}` issues; empty when the payload is clean.
#[wasm_bindgen(js_name = "validateSchedules")]
pub fn validate_schedules(schedules_json: &str) -> Result<String, JsValue> {
    bridge::validate_schedules(schedules_json).map_err(|e| JsValue::from_str(&e))
}
