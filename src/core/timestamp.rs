use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamps below this value are interpreted as seconds, at or above as
/// milliseconds.
///
/// `2_000_000_000` seconds is mid-2033; `2_000_000_000` milliseconds is early
/// 1970, so real feeds never sit near the boundary in both units at once.
/// Second-based timestamps at or beyond the boundary are out of contract and
/// would be misread as milliseconds.
pub const MILLIS_BOUNDARY: i64 = 2_000_000_000;

/// Normalizes an upstream timestamp of ambiguous unit to milliseconds.
///
/// Idempotent on millisecond input. Every comparison between an upstream
/// timestamp and a viewport bound must route through this first.
#[must_use]
pub fn to_millis(timestamp: i64) -> i64 {
    if timestamp < MILLIS_BOUNDARY {
        timestamp * 1000
    } else {
        timestamp
    }
}

/// Converts a typed UTC datetime to canonical milliseconds.
#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

/// Fixed time duration represented by one candle slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Granularity {
    OneMinute,
    #[default]
    FiveMinutes,
    FifteenMinutes,
    OneHour,
    SixHours,
    OneDay,
}

impl Granularity {
    #[must_use]
    pub const fn millis(self) -> i64 {
        match self {
            Self::OneMinute => 60_000,
            Self::FiveMinutes => 300_000,
            Self::FifteenMinutes => 900_000,
            Self::OneHour => 3_600_000,
            Self::SixHours => 21_600_000,
            Self::OneDay => 86_400_000,
        }
    }
}

/// Floors a timestamp onto its slot start for the given interval.
///
/// Uses Euclidean flooring so pre-epoch timestamps land on the slot at or
/// before them rather than rounding toward zero.
#[must_use]
pub fn floor_to_interval(timestamp_ms: i64, interval_ms: i64) -> i64 {
    debug_assert!(interval_ms > 0);
    timestamp_ms - timestamp_ms.rem_euclid(interval_ms)
}
