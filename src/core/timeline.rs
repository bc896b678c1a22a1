use serde::{Deserialize, Serialize};

use crate::core::timestamp::floor_to_interval;
use crate::core::transform::time_to_x;
use crate::core::TimeRange;

/// Inputs for one timeline walk over the visible range.
///
/// Slot boundaries are floored against `interval_ms`, so they depend only on
/// the interval (and optional local-time offset), never on where the viewport
/// happens to start. Panning therefore shifts slots smoothly instead of
/// re-bucketing them per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub time_range: TimeRange,
    pub width_px: f64,
    pub interval_ms: i64,
    /// Shifts slot alignment so boundaries land on local-time multiples
    /// (e.g. local midnight for daily slots). Zero keeps UTC alignment.
    pub utc_offset_ms: i64,
}

impl TimelineConfig {
    #[must_use]
    pub fn new(time_range: TimeRange, width_px: f64, interval_ms: i64) -> Self {
        Self {
            time_range,
            width_px,
            interval_ms,
            utc_offset_ms: 0,
        }
    }

    #[must_use]
    pub fn with_utc_offset_ms(mut self, utc_offset_ms: i64) -> Self {
        self.utc_offset_ms = utc_offset_ms;
        self
    }

    /// Starts a fresh walk. Calling again restarts from the first slot.
    #[must_use]
    pub fn slots(self) -> TimeSlots {
        TimeSlots::new(self)
    }
}

/// One expected candle slot in the visible range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlot {
    pub x_px: f64,
    pub timestamp_ms: i64,
}

/// Finite iterator of `(x pixel, slot timestamp)` pairs covering a viewport.
///
/// Timestamps are strictly increasing, one per expected slot, last slot at or
/// before the range end. Degenerate ranges and non-positive intervals yield
/// an empty sequence.
#[derive(Debug, Clone)]
pub struct TimeSlots {
    config: TimelineConfig,
    next_ms: i64,
    exhausted: bool,
}

impl TimeSlots {
    fn new(config: TimelineConfig) -> Self {
        if config.interval_ms <= 0 || config.time_range.is_degenerate() || config.width_px <= 0.0 {
            return Self {
                config,
                next_ms: 0,
                exhausted: true,
            };
        }

        let shifted = config.time_range.start_ms + config.utc_offset_ms;
        let first = floor_to_interval(shifted, config.interval_ms) - config.utc_offset_ms;
        Self {
            config,
            next_ms: first,
            exhausted: false,
        }
    }
}

impl Iterator for TimeSlots {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<TimeSlot> {
        if self.exhausted || self.next_ms > self.config.time_range.end_ms {
            self.exhausted = true;
            return None;
        }

        let timestamp_ms = self.next_ms;
        self.next_ms += self.config.interval_ms;
        Some(TimeSlot {
            x_px: time_to_x(timestamp_ms, self.config.time_range, self.config.width_px),
            timestamp_ms,
        })
    }
}
