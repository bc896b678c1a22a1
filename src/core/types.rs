use serde::{Deserialize, Serialize};

/// Logical pixel rectangle of the drawing area.
///
/// Zero-area sizes occur routinely while layout settles and are treated as
/// transient, not as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Visible time window in canonical milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeRange {
    #[must_use]
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    #[must_use]
    pub fn duration_ms(self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// A degenerate window (`end <= start`) maps nothing to pixels.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.end_ms <= self.start_ms
    }

    #[must_use]
    pub fn contains(self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.start_ms && timestamp_ms <= self.end_ms
    }
}

/// Visible price window mapped to the inverted Y pixel axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !self.min.is_finite() || !self.max.is_finite() || self.max <= self.min
    }

    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Full viewport: the time and price windows currently mapped to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRange {
    pub time: TimeRange,
    pub price: PriceRange,
}

impl ViewRange {
    #[must_use]
    pub fn new(time: TimeRange, price: PriceRange) -> Self {
        Self { time, price }
    }
}
