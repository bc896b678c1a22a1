use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::BarLayoutSpec;
use crate::error::ChartResult;
use crate::render::candles::visible_slotted_candles;
use crate::render::{Color, LayerContext, RectPrimitive, RenderFrame, SurfaceLayer};

/// Volume bar palette, typically the candle palette at reduced opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeStyle {
    pub up_color: Color,
    pub down_color: Color,
}

impl Default for VolumeStyle {
    fn default() -> Self {
        Self {
            up_color: Color::rgb(0.15, 0.65, 0.40).with_alpha(0.5),
            down_color: Color::rgb(0.84, 0.29, 0.29).with_alpha(0.5),
        }
    }
}

impl VolumeStyle {
    pub fn validate(self) -> ChartResult<Self> {
        self.up_color.validate()?;
        self.down_color.validate()?;
        Ok(self)
    }
}

/// Volume histogram layer anchored to the bottom edge of the canvas.
///
/// Bar heights are proportional to the maximum volume in the visible range,
/// recomputed fresh every pass so viewport changes rescale immediately.
#[derive(Debug)]
pub struct VolumeLayer {
    style: VolumeStyle,
    layout: BarLayoutSpec,
}

impl VolumeLayer {
    pub fn new(style: VolumeStyle, layout: BarLayoutSpec) -> ChartResult<Self> {
        Ok(Self {
            style: style.validate()?,
            layout: layout.validate()?,
        })
    }

    #[must_use]
    pub fn style(&self) -> VolumeStyle {
        self.style
    }
}

impl SurfaceLayer for VolumeLayer {
    fn build(&mut self, frame: &mut RenderFrame, ctx: &LayerContext<'_>) -> ChartResult<()> {
        let slotted = visible_slotted_candles(ctx);
        if slotted.is_empty() {
            return Ok(());
        }

        // Denominator floor of 1.0 keeps all-zero-volume ranges at height 0
        // instead of dividing by zero.
        let max_volume = slotted
            .iter()
            .map(|(_, candle)| OrderedFloat(candle.volume))
            .max()
            .map(|v| v.0)
            .unwrap_or(0.0)
            .max(1.0);

        let height = f64::from(ctx.size.height);
        let bar_width = self
            .layout
            .bar_width(f64::from(ctx.size.width), slotted.len());
        let half = bar_width / 2.0;

        for (slot, candle) in slotted {
            let bar_height = (candle.volume / max_volume) * height;
            if bar_height <= 0.0 {
                continue;
            }
            let color = if candle.is_bullish() {
                self.style.up_color
            } else {
                self.style.down_color
            };
            frame.rects.push(RectPrimitive::new(
                slot.x_px - half,
                height - bar_height,
                bar_width,
                bar_height,
                color,
            ));
        }

        Ok(())
    }
}
