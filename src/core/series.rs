use std::collections::BTreeMap;

use crate::core::timestamp::{floor_to_interval, to_millis, Granularity};
use crate::core::Candle;

/// Price-history collaborator consumed by the drawing layers.
///
/// Implementations expose an ordered, fixed-granularity, gap-tolerant candle
/// series. Timestamps passed in may still be unit-ambiguous; implementations
/// normalize before lookup.
pub trait CandleSource {
    fn granularity(&self) -> Granularity;

    fn interval_ms(&self) -> i64 {
        self.granularity().millis()
    }

    /// Candle at the slot covering `timestamp_ms`, if present.
    fn candle_at(&self, timestamp_ms: i64) -> Option<Candle>;

    /// Candles whose slot timestamp falls inside the inclusive window,
    /// ordered by timestamp.
    fn candles_in_range(&self, start_ms: i64, end_ms: i64) -> Vec<Candle>;
}

/// In-memory candle series keyed by slot start.
///
/// Inserts normalize the timestamp unit and snap it onto the slot grid, so a
/// live candle updates in place as new ticks land in its slot.
#[derive(Debug, Clone, Default)]
pub struct CandleSeries {
    granularity: Granularity,
    candles: BTreeMap<i64, Candle>,
}

impl CandleSeries {
    #[must_use]
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            candles: BTreeMap::new(),
        }
    }

    /// Inserts or replaces the candle in the slot covering its timestamp.
    pub fn upsert(&mut self, candle: Candle) {
        let slot = self.slot_of(candle.timestamp_ms);
        self.candles.insert(
            slot,
            Candle {
                timestamp_ms: slot,
                ..candle
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    fn slot_of(&self, timestamp: i64) -> i64 {
        floor_to_interval(to_millis(timestamp), self.granularity.millis())
    }
}

impl CandleSource for CandleSeries {
    fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn candle_at(&self, timestamp_ms: i64) -> Option<Candle> {
        self.candles.get(&self.slot_of(timestamp_ms)).copied()
    }

    fn candles_in_range(&self, start_ms: i64, end_ms: i64) -> Vec<Candle> {
        let start = to_millis(start_ms);
        let end = to_millis(end_ms);
        if end < start {
            return Vec::new();
        }
        self.candles.range(start..=end).map(|(_, c)| *c).collect()
    }
}
