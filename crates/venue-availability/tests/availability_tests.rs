//! Tests for venue availability checks.
//!
//! Calendar reference: 2026-03-16 is a Monday.

use venue_availability::{
    check_availability, check_venues, find_conflicts, AvailabilityError, AvailabilityResult,
    parse_schedule_json, EvaluatorConfig, ReservationWindow, ScheduleRecord, VenueId,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn record(venue: &str, day: &str, start: &str, end: &str, section: &str) -> ScheduleRecord {
    ScheduleRecord {
        ven_id: Some(VenueId::from(venue)),
        day_of_week: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        section_name: section.to_string(),
    }
}

fn window(start: &str, end: &str) -> ReservationWindow {
    ReservationWindow::parse(start, end, EvaluatorConfig::default().timezone).unwrap()
}

fn check(venue: &str, w: &ReservationWindow, records: &[ScheduleRecord]) -> AvailabilityResult {
    check_availability(&VenueId::from(venue), w, records, &EvaluatorConfig::default()).unwrap()
}

fn monday_block() -> Vec<ScheduleRecord> {
    vec![record("1", "Monday", "08:00:00", "10:00:00", "BSIT-1A")]
}

// ── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn overlapping_monday_reservation_conflicts() {
    let w = window("2026-03-16T09:00:00", "2026-03-16T11:00:00");

    let result = check("1", &w, &monday_block());

    let details = result.conflict().expect("09:00-11:00 overlaps 08:00-10:00");
    assert_eq!(details.section_name, "BSIT-1A");
    assert_eq!(details.start_time.to_string(), "08:00:00");
    assert_eq!(details.end_time.to_string(), "10:00:00");
}

#[test]
fn back_to_back_after_block_is_available() {
    // Starts exactly when the block ends.
    let w = window("2026-03-16T10:00:00", "2026-03-16T12:00:00");
    assert_eq!(check("1", &w, &monday_block()), AvailabilityResult::Available);
}

#[test]
fn back_to_back_before_block_is_available() {
    // Ends exactly when the block starts.
    let w = window("2026-03-16T06:00:00", "2026-03-16T08:00:00");
    assert_eq!(check("1", &w, &monday_block()), AvailabilityResult::Available);
}

#[test]
fn identical_time_range_conflicts() {
    let w = window("2026-03-16T08:00:00", "2026-03-16T10:00:00");
    assert!(!check("1", &w, &monday_block()).is_available());
}

#[test]
fn reservation_inside_block_conflicts() {
    let w = window("2026-03-16T08:30:00", "2026-03-16T09:15:00");
    assert!(!check("1", &w, &monday_block()).is_available());
}

#[test]
fn same_time_on_another_weekday_is_available() {
    // Tuesday, same hours as the Monday block.
    let w = window("2026-03-17T09:00:00", "2026-03-17T11:00:00");
    assert!(check("1", &w, &monday_block()).is_available());
}

#[test]
fn any_monday_conflicts_regardless_of_date() {
    // Blocks recur weekly: a Monday two months later still collides.
    let w = window("2026-05-18T09:00:00", "2026-05-18T09:30:00");
    assert!(!check("1", &w, &monday_block()).is_available());
}

// ── No data policy ──────────────────────────────────────────────────────────

#[test]
fn no_blocks_for_venue_is_available_by_default() {
    let w = window("2026-03-16T09:00:00", "2026-03-16T11:00:00");
    // Blocks exist, but only for venue 1.
    assert!(check("2", &w, &monday_block()).is_available());
    assert!(check("2", &w, &[]).is_available());
}

#[test]
fn no_blocks_for_venue_fails_when_policy_is_strict() {
    let w = window("2026-03-16T09:00:00", "2026-03-16T11:00:00");
    let config = EvaluatorConfig::default().with_assume_available_when_no_data(false);

    let err = check_availability(&VenueId::from("2"), &w, &monday_block(), &config).unwrap_err();

    match err {
        AvailabilityError::NoScheduleData(id) => assert_eq!(id.as_str(), "2"),
        other => panic!("expected NoScheduleData, got {:?}", other),
    }
}

#[test]
fn strict_policy_still_evaluates_venues_with_data() {
    let w = window("2026-03-16T09:00:00", "2026-03-16T11:00:00");
    let config = EvaluatorConfig::default().with_assume_available_when_no_data(false);

    let result = check_availability(&VenueId::from("1"), &w, &monday_block(), &config).unwrap();
    assert!(!result.is_available());
}

// ── Venue id handling ───────────────────────────────────────────────────────

#[test]
fn numeric_and_string_ids_match() {
    let records: Vec<ScheduleRecord> = serde_json::from_str(
        r#"[{"ven_id": 12, "day_of_week": "Monday", "start_time": "08:00:00",
             "end_time": "10:00:00", "section_name": "BSCS-2B"}]"#,
    )
    .unwrap();
    let w = window("2026-03-16T09:00:00", "2026-03-16T09:30:00");

    let by_string = check("12", &w, &records);
    let by_number =
        check_availability(&VenueId::from(12u32), &w, &records, &EvaluatorConfig::default())
            .unwrap();

    assert_eq!(by_string, by_number);
    assert_eq!(by_string.conflict().unwrap().section_name, "BSCS-2B");
}

#[test]
fn blocks_of_other_venues_are_ignored() {
    let records = vec![
        record("2", "Monday", "08:00:00", "10:00:00", "OTHER"),
        record("1", "Monday", "13:00:00", "15:00:00", "MINE"),
    ];
    let w = window("2026-03-16T09:00:00", "2026-03-16T11:00:00");
    assert!(check("1", &w, &records).is_available());
}

// ── Ordering ────────────────────────────────────────────────────────────────

#[test]
fn first_conflict_follows_weekday_then_block_order() {
    // Window spans Sunday → Monday; Sunday is the first spanned weekday, so the
    // Sunday block wins even though the Monday block comes first in the input.
    let records = vec![
        record("1", "Monday", "00:00:00", "23:00:00", "MON-ALL-DAY"),
        record("1", "Sunday", "00:00:00", "23:00:00", "SUN-ALL-DAY"),
    ];
    let w = window("2026-03-15T09:00:00", "2026-03-16T10:00:00");

    let result = check("1", &w, &records);
    assert_eq!(result.conflict().unwrap().section_name, "SUN-ALL-DAY");
}

#[test]
fn first_conflict_within_a_day_follows_input_order() {
    let records = vec![
        record("1", "Monday", "09:30:00", "10:30:00", "SECOND-IN-TIME"),
        record("1", "Monday", "08:00:00", "09:30:00", "FIRST-IN-TIME"),
    ];
    let w = window("2026-03-16T09:00:00", "2026-03-16T10:00:00");

    let result = check("1", &w, &records);
    assert_eq!(result.conflict().unwrap().section_name, "SECOND-IN-TIME");
}

#[test]
fn find_conflicts_reports_every_collision_in_search_order() {
    let records = vec![
        record("1", "Monday", "09:30:00", "10:30:00", "A"),
        record("1", "Monday", "08:00:00", "09:30:00", "B"),
        record("1", "Monday", "12:00:00", "13:00:00", "C"),
    ];
    let w = window("2026-03-16T09:00:00", "2026-03-16T10:00:00");

    let conflicts =
        find_conflicts(&VenueId::from("1"), &w, &records, &EvaluatorConfig::default()).unwrap();

    let names: Vec<&str> = conflicts.iter().map(|c| c.section_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

// ── Multi-day windows ───────────────────────────────────────────────────────

#[test]
fn midnight_crossing_window_uses_same_minutes_on_both_days() {
    // Fri 23:00 → Sat 01:00 compares minutes 1380..60 on Friday and Saturday.
    let w = window("2026-03-20T23:00:00", "2026-03-21T01:00:00");

    // 1380 < 1439 && 60 > 0
    let all_day_saturday = vec![record("1", "Saturday", "00:00:00", "23:59:00", "SAT")];
    assert_eq!(check("1", &w, &all_day_saturday).conflict().unwrap().section_name, "SAT");

    // 1380 < 120 is false, so an early-Saturday block does not collide.
    let early_saturday = vec![record("1", "Saturday", "00:00:00", "02:00:00", "SAT-EARLY")];
    assert!(check("1", &w, &early_saturday).is_available());

    // Sunday is outside the span.
    let all_day_sunday = vec![record("1", "Sunday", "00:00:00", "23:59:00", "SUN")];
    assert!(check("1", &w, &all_day_sunday).is_available());
}

#[test]
fn multi_day_window_checks_every_spanned_weekday() {
    // Mon 09:00 → Wed 11:00; the Wednesday block is compared with 09:00-11:00.
    let records = vec![record("1", "Wednesday", "10:00:00", "12:00:00", "WED")];
    let w = window("2026-03-16T09:00:00", "2026-03-18T11:00:00");
    assert_eq!(check("1", &w, &records).conflict().unwrap().section_name, "WED");
}

#[test]
fn block_running_until_midnight_conflicts() {
    let records = vec![record("1", "Monday", "22:00:00", "24:00:00", "NSTP-N1")];

    let w = window("2026-03-16T22:30:00", "2026-03-16T23:00:00");
    let details = check("1", &w, &records).conflict().cloned().unwrap();
    assert_eq!(details.section_name, "NSTP-N1");
    assert_eq!(details.end_time.to_string(), "24:00:00");

    let before = window("2026-03-16T20:00:00", "2026-03-16T22:00:00");
    assert!(check("1", &before, &records).is_available());
}

// ── Timezone ────────────────────────────────────────────────────────────────

#[test]
fn offset_timestamps_are_projected_into_configured_timezone() {
    // 01:00Z-02:00Z is Monday 09:00-10:00 in Manila (UTC+8).
    let w = window("2026-03-16T01:00:00Z", "2026-03-16T02:00:00Z");
    assert!(!check("1", &w, &monday_block()).is_available());

    // Read in UTC instead, the same instants are Monday 01:00-02:00.
    let utc = EvaluatorConfig::default().with_timezone("UTC").unwrap();
    let result = check_availability(&VenueId::from("1"), &w, &monday_block(), &utc).unwrap();
    assert!(result.is_available());
}

#[test]
fn timezone_can_move_a_reservation_to_another_weekday() {
    // Sunday 20:00Z is already Monday 04:00 in Manila.
    let sunday_block = vec![record("1", "Sunday", "19:00:00", "21:00:00", "SUN")];
    let w = window("2026-03-15T20:00:00Z", "2026-03-15T20:30:00Z");

    assert!(check("1", &w, &sunday_block).is_available());

    let utc = EvaluatorConfig::default().with_timezone("UTC").unwrap();
    let result = check_availability(&VenueId::from("1"), &w, &sunday_block, &utc).unwrap();
    assert!(!result.is_available());
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn malformed_block_for_venue_is_an_error() {
    let records = vec![
        record("1", "Monday", "08:00:00", "10:00:00", "OK"),
        record("1", "Monday", "8 o'clock", "10:00:00", "BROKEN"),
    ];
    let w = window("2026-03-16T13:00:00", "2026-03-16T14:00:00");

    let err = check_availability(&VenueId::from("1"), &w, &records, &EvaluatorConfig::default())
        .unwrap_err();

    match err {
        AvailabilityError::InvalidScheduleBlock { index, reason } => {
            assert_eq!(index, 1);
            assert!(reason.contains("start_time"), "reason: {}", reason);
        }
        other => panic!("expected InvalidScheduleBlock, got {:?}", other),
    }
}

#[test]
fn unknown_weekday_for_venue_is_an_error() {
    let records = vec![record("1", "Funday", "08:00:00", "10:00:00", "X")];
    let w = window("2026-03-16T09:00:00", "2026-03-16T10:00:00");

    let err = check_availability(&VenueId::from("1"), &w, &records, &EvaluatorConfig::default())
        .unwrap_err();
    assert!(matches!(err, AvailabilityError::InvalidScheduleBlock { index: 0, .. }));
}

#[test]
fn malformed_block_of_other_venue_is_not_inspected() {
    let records = vec![
        record("9", "Funday", "nope", "nope", "X"),
        record("1", "Monday", "08:00:00", "10:00:00", "BSIT-1A"),
    ];
    let w = window("2026-03-16T09:00:00", "2026-03-16T10:00:00");
    assert!(!check("1", &w, &records).is_available());
}

#[test]
fn null_field_in_other_venue_record_does_not_block_check() {
    let records = parse_schedule_json(
        r#"[{"ven_id":9,"day_of_week":"Monday","start_time":null,"end_time":"10:00:00",
             "section_name":"BSN-2B"},
            {"ven_id":1,"day_of_week":"Monday","start_time":"08:00:00","end_time":"10:00:00",
             "section_name":"BSIT-1A"}]"#,
    )
    .unwrap();

    let busy = window("2026-03-16T09:00:00", "2026-03-16T09:30:00");
    assert!(check("1", &busy, &records).conflict().is_some());
    let free = window("2026-03-16T10:00:00", "2026-03-16T11:00:00");
    assert!(check("1", &free, &records).is_available());

    let err = check_availability(
        &VenueId::from("9"),
        &busy,
        &records,
        &EvaluatorConfig::default(),
    )
    .unwrap_err();
    match err {
        AvailabilityError::InvalidScheduleBlock { index, reason } => {
            assert_eq!(index, 0);
            assert!(reason.contains("start_time"), "reason: {}", reason);
        }
        other => panic!("expected InvalidScheduleBlock, got {:?}", other),
    }
}

#[test]
fn record_without_venue_id_matches_no_venue() {
    let records = parse_schedule_json(
        r#"[{"day_of_week":"Monday","start_time":"08:00:00","end_time":"10:00:00"}]"#,
    )
    .unwrap();

    let w = window("2026-03-16T09:00:00", "2026-03-16T09:30:00");
    assert!(check("1", &w, &records).is_available());
    assert!(check("", &w, &records).is_available());
}

// ── Multiple venues ─────────────────────────────────────────────────────────

#[test]
fn check_venues_returns_one_result_per_venue_in_order() {
    let records = vec![
        record("1", "Monday", "08:00:00", "10:00:00", "BSIT-1A"),
        record("2", "Monday", "13:00:00", "15:00:00", "BSIT-2A"),
    ];
    let w = window("2026-03-16T09:00:00", "2026-03-16T11:00:00");
    let ids = vec![VenueId::from("2"), VenueId::from("1"), VenueId::from("3")];

    let results = check_venues(&ids, &w, &records, &EvaluatorConfig::default()).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].venue_id.as_str(), "2");
    assert!(results[0].result.is_available());
    assert_eq!(results[1].venue_id.as_str(), "1");
    assert!(!results[1].result.is_available());
    assert!(results[2].result.is_available());
}

// ── Serialization ───────────────────────────────────────────────────────────

#[test]
fn results_serialize_as_tagged_objects() {
    let w = window("2026-03-16T09:00:00", "2026-03-16T11:00:00");

    let conflict = serde_json::to_value(check("1", &w, &monday_block())).unwrap();
    assert_eq!(
        conflict,
        serde_json::json!({
            "status": "conflict",
            "section_name": "BSIT-1A",
            "start_time": "08:00:00",
            "end_time": "10:00:00"
        })
    );

    let available = serde_json::to_value(check("2", &w, &monday_block())).unwrap();
    assert_eq!(available, serde_json::json!({"status": "available"}));
}
