use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineKind};

/// Stable identity of a price line within one overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PriceLineId(pub u64);

/// Horizontal price annotation, optionally draggable and interactive.
///
/// The owning application creates and destroys lines; the overlay only reads
/// them and emits change-intent events. In particular a drag never mutates
/// `price` here; the new price travels in the event and the owner commits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    pub id: PriceLineId,
    pub price: f64,
    pub color: Color,
    pub width_px: f64,
    pub kind: LineKind,
    pub draggable: bool,
    pub interactive: bool,
    pub extend_left: bool,
    pub extend_right: bool,
    pub z_index: i32,
    pub label: Option<String>,
    pub show_price_label: bool,
}

impl PriceLine {
    #[must_use]
    pub fn new(id: PriceLineId, price: f64) -> Self {
        Self {
            id,
            price,
            color: Color::rgb(0.25, 0.45, 0.85),
            width_px: 1.0,
            kind: LineKind::Solid,
            draggable: false,
            interactive: true,
            extend_left: true,
            extend_right: true,
            z_index: 0,
            label: None,
            show_price_label: false,
        }
    }

    #[must_use]
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: LineKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_price_label(mut self, show: bool) -> Self {
        self.show_price_label = show;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.price.is_finite() {
            return Err(ChartError::InvalidData(
                "price line price must be finite".to_owned(),
            ));
        }
        if !self.width_px.is_finite() || self.width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "price line width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
