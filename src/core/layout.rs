use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Bar sizing policy in logical pixels.
///
/// Device-pixel-ratio scaling happens in the drawing surface; mixing it into
/// this computation misaligns layers and is deliberately impossible here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayoutSpec {
    pub gap_px: f64,
    pub min_width_px: f64,
    pub max_width_px: f64,
}

impl Default for BarLayoutSpec {
    fn default() -> Self {
        Self {
            gap_px: 1.0,
            min_width_px: 1.0,
            max_width_px: 24.0,
        }
    }
}

impl BarLayoutSpec {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.gap_px.is_finite() || self.gap_px < 0.0 {
            return Err(ChartError::InvalidData(
                "bar gap must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_width_px.is_finite()
            || !self.max_width_px.is_finite()
            || self.min_width_px <= 0.0
            || self.max_width_px < self.min_width_px
        {
            return Err(ChartError::InvalidData(
                "bar width clamps must be finite with 0 < min <= max".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Width of one bar when `item_count` bars plus gaps share
    /// `available_width_px`, clamped to the configured bounds.
    ///
    /// `item_count == 0` returns the configured minimum rather than dividing.
    #[must_use]
    pub fn bar_width(self, available_width_px: f64, item_count: usize) -> f64 {
        if item_count == 0 || available_width_px <= 0.0 || !available_width_px.is_finite() {
            return self.min_width_px;
        }

        let gaps = (item_count - 1) as f64 * self.gap_px;
        let raw = (available_width_px - gaps) / item_count as f64;
        raw.clamp(self.min_width_px, self.max_width_px)
    }
}
