use candlepane::core::timestamp::floor_to_interval;
use candlepane::core::{datetime_to_millis, to_millis, Granularity, MILLIS_BOUNDARY};
use chrono::{TimeZone, Utc};

#[test]
fn second_timestamps_are_scaled_to_millis() {
    assert_eq!(to_millis(1_749_664_800), 1_749_664_800_000);
}

#[test]
fn milli_timestamps_pass_through_unchanged() {
    assert_eq!(to_millis(1_749_664_800_000), 1_749_664_800_000);
}

#[test]
fn to_millis_is_idempotent() {
    let once = to_millis(1_749_664_800);
    assert_eq!(to_millis(once), once);
}

#[test]
fn boundary_value_is_treated_as_millis() {
    assert_eq!(to_millis(MILLIS_BOUNDARY), MILLIS_BOUNDARY);
}

#[test]
fn datetime_conversion_matches_unix_millis() {
    let time = Utc.with_ymd_and_hms(2025, 6, 11, 18, 0, 0).unwrap();
    assert_eq!(datetime_to_millis(time), 1_749_664_800_000);
}

#[test]
fn granularity_intervals_are_fixed() {
    assert_eq!(Granularity::OneMinute.millis(), 60_000);
    assert_eq!(Granularity::FiveMinutes.millis(), 300_000);
    assert_eq!(Granularity::FifteenMinutes.millis(), 900_000);
    assert_eq!(Granularity::OneHour.millis(), 3_600_000);
    assert_eq!(Granularity::SixHours.millis(), 21_600_000);
    assert_eq!(Granularity::OneDay.millis(), 86_400_000);
}

#[test]
fn floor_snaps_onto_slot_grid() {
    assert_eq!(floor_to_interval(125, 60), 120);
    assert_eq!(floor_to_interval(120, 60), 120);
    assert_eq!(floor_to_interval(119, 60), 60);
}

#[test]
fn floor_handles_pre_epoch_timestamps() {
    assert_eq!(floor_to_interval(-1, 60), -60);
    assert_eq!(floor_to_interval(-60, 60), -60);
    assert_eq!(floor_to_interval(-61, 60), -120);
}
