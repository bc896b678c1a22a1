use candlepane::core::{Candle, CandleSeries, CandleSource, Granularity};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

const MINUTE: i64 = 60_000;
// Epoch-scale base keeps timestamps unambiguously in milliseconds.
const BASE: i64 = 1_701_000_000_000;

fn candle(timestamp: i64, close: f64) -> Candle {
    Candle::new(timestamp, 100.0, close.max(101.0), 99.0, close, 10.0).expect("valid candle")
}

#[test]
fn candle_invariants_are_enforced() {
    assert!(Candle::new(0, 10.0, 9.0, 11.0, 10.0, 1.0).is_err(), "low > high");
    assert!(Candle::new(0, 12.0, 11.0, 9.0, 10.0, 1.0).is_err(), "open above high");
    assert!(Candle::new(0, 10.0, 11.0, 9.0, 8.0, 1.0).is_err(), "close below low");
    assert!(Candle::new(0, 10.0, 11.0, 9.0, 10.0, -1.0).is_err(), "negative volume");
    assert!(Candle::new(0, f64::NAN, 11.0, 9.0, 10.0, 1.0).is_err(), "non-finite");
    assert!(Candle::new(0, 10.0, 11.0, 9.0, 10.5, 1.0).is_ok());
}

#[test]
fn candle_timestamps_are_normalized_to_millis() {
    let from_seconds = candle(1_749_664_800, 102.0);
    let from_millis = candle(1_749_664_800_000, 102.0);
    assert_eq!(from_seconds.timestamp_ms, 1_749_664_800_000);
    assert_eq!(from_seconds.timestamp_ms, from_millis.timestamp_ms);
}

#[test]
fn bullish_uses_two_color_scheme() {
    assert!(candle(0, 101.0).is_bullish());
    assert!(!candle(0, 99.5).is_bullish());
    // Unchanged candle counts as bullish; there is no third state.
    let flat = Candle::new(0, 100.0, 101.0, 99.0, 100.0, 1.0).unwrap();
    assert!(flat.is_bullish());
}

#[test]
fn decimal_time_ingestion_round_trips() {
    let time = Utc.with_ymd_and_hms(2025, 6, 11, 18, 0, 0).unwrap();
    let candle = Candle::from_decimal_time(
        time,
        Decimal::new(10050, 2),
        Decimal::new(10110, 2),
        Decimal::new(9990, 2),
        Decimal::new(10080, 2),
        Decimal::new(125, 0),
    )
    .expect("valid decimal candle");

    assert_eq!(candle.timestamp_ms, 1_749_664_800_000);
    assert!((candle.open - 100.50).abs() <= 1e-9);
    assert!((candle.volume - 125.0).abs() <= 1e-9);
}

#[test]
fn series_snaps_inserts_onto_the_slot_grid() {
    let mut series = CandleSeries::new(Granularity::OneMinute);
    series.upsert(candle(BASE + 10 * MINUTE + 42_000, 102.0));

    let slot = BASE + 10 * MINUTE;
    assert!(series.candle_at(slot).is_some());
    assert_eq!(series.candle_at(slot).unwrap().timestamp_ms, slot);
}

#[test]
fn upsert_replaces_the_live_slot() {
    let mut series = CandleSeries::new(Granularity::OneMinute);
    series.upsert(candle(BASE + 10 * MINUTE, 101.0));
    series.upsert(candle(BASE + 10 * MINUTE + 30_000, 104.0));

    assert_eq!(series.len(), 1);
    assert!((series.candle_at(BASE + 10 * MINUTE).unwrap().close - 104.0).abs() <= 1e-9);
}

#[test]
fn range_queries_are_ordered_and_inclusive() {
    let mut series = CandleSeries::new(Granularity::OneMinute);
    for i in [12, 10, 14, 11] {
        series.upsert(candle(BASE + i * MINUTE, 100.0 + i as f64));
    }

    let range = series.candles_in_range(BASE + 10 * MINUTE, BASE + 12 * MINUTE);
    let timestamps: Vec<i64> = range.iter().map(|c| c.timestamp_ms).collect();
    assert_eq!(
        timestamps,
        vec![BASE + 10 * MINUTE, BASE + 11 * MINUTE, BASE + 12 * MINUTE]
    );
}

#[test]
fn gaps_in_the_series_are_preserved() {
    let mut series = CandleSeries::new(Granularity::OneMinute);
    series.upsert(candle(BASE + 10 * MINUTE, 101.0));
    series.upsert(candle(BASE + 13 * MINUTE, 103.0));

    assert!(series.candle_at(BASE + 11 * MINUTE).is_none());
    assert_eq!(
        series.candles_in_range(BASE + 10 * MINUTE, BASE + 13 * MINUTE).len(),
        2
    );
}

#[test]
fn inverted_range_query_is_empty() {
    let mut series = CandleSeries::new(Granularity::OneMinute);
    series.upsert(candle(BASE + 10 * MINUTE, 101.0));
    assert!(series
        .candles_in_range(BASE + 13 * MINUTE, BASE + 10 * MINUTE)
        .is_empty());
}
