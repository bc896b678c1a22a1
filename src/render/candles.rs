use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::transform::price_to_y;
use crate::core::{BarLayoutSpec, Candle, PriceRange, TimeSlot, TimelineConfig};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LayerContext, LinePrimitive, RectPrimitive, RenderFrame, SurfaceLayer};
use crate::telemetry::{LiveCandleSnapshot, ThrottledLogger, DEFAULT_THROTTLE_WINDOW_MS};

/// Candlestick palette and stroke configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlestickStyle {
    pub up_color: Color,
    pub down_color: Color,
    pub wick_width_px: f64,
}

impl Default for CandlestickStyle {
    fn default() -> Self {
        Self {
            up_color: Color::rgb(0.15, 0.65, 0.40),
            down_color: Color::rgb(0.84, 0.29, 0.29),
            wick_width_px: 1.0,
        }
    }
}

impl CandlestickStyle {
    pub fn validate(self) -> ChartResult<Self> {
        self.up_color.validate()?;
        self.down_color.validate()?;
        if !self.wick_width_px.is_finite() || self.wick_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "wick width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Projected candle geometry in logical pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// Projects slotted candles into deterministic render geometry.
///
/// Pure so it can be exercised both by rendering and by regression tests.
/// A flat body keeps a one-pixel minimum height so doji candles stay visible.
#[must_use]
pub fn project_candles(
    slotted: &[(TimeSlot, Candle)],
    price_range: PriceRange,
    height_px: f64,
    body_width_px: f64,
) -> Vec<CandleGeometry> {
    #[cfg(feature = "parallel-projection")]
    {
        slotted
            .par_iter()
            .map(|(slot, candle)| {
                project_single_candle(*slot, *candle, price_range, height_px, body_width_px)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        slotted
            .iter()
            .map(|(slot, candle)| {
                project_single_candle(*slot, *candle, price_range, height_px, body_width_px)
            })
            .collect()
    }
}

fn project_single_candle(
    slot: TimeSlot,
    candle: Candle,
    price_range: PriceRange,
    height_px: f64,
    body_width_px: f64,
) -> CandleGeometry {
    let half = body_width_px / 2.0;
    let open_y = price_to_y(candle.open, price_range, height_px);
    let close_y = price_to_y(candle.close, price_range, height_px);
    let body_top = open_y.min(close_y);
    let body_bottom = open_y.max(close_y).max(body_top + 1.0);

    CandleGeometry {
        center_x: slot.x_px,
        body_left: slot.x_px - half,
        body_right: slot.x_px + half,
        body_top,
        body_bottom,
        wick_top: price_to_y(candle.high, price_range, height_px),
        wick_bottom: price_to_y(candle.low, price_range, height_px),
        is_bullish: candle.is_bullish(),
    }
}

/// Walks the visible timeline and pairs each slot with its candle.
///
/// Slots without a candle are skipped, not reported: gaps in a sparse series
/// are expected data, never draw failures.
pub(crate) fn visible_slotted_candles(ctx: &LayerContext<'_>) -> Vec<(TimeSlot, Candle)> {
    let timeline = TimelineConfig::new(
        ctx.view.time,
        f64::from(ctx.size.width),
        ctx.source.interval_ms(),
    );
    timeline
        .slots()
        .filter_map(|slot| {
            ctx.source
                .candle_at(slot.timestamp_ms)
                .map(|candle| (slot, candle))
        })
        .collect()
}

/// Candlestick series layer: one wick line and one body rect per slot.
#[derive(Debug)]
pub struct CandlestickLayer {
    style: CandlestickStyle,
    layout: BarLayoutSpec,
    diagnostics: ThrottledLogger<LiveCandleSnapshot>,
}

impl CandlestickLayer {
    pub fn new(style: CandlestickStyle, layout: BarLayoutSpec) -> ChartResult<Self> {
        Ok(Self {
            style: style.validate()?,
            layout: layout.validate()?,
            diagnostics: ThrottledLogger::new(DEFAULT_THROTTLE_WINDOW_MS),
        })
    }

    #[must_use]
    pub fn style(&self) -> CandlestickStyle {
        self.style
    }

    fn report_live_candle(&mut self, ctx: &LayerContext<'_>) {
        let Some(live) = ctx.live_candle else {
            return;
        };
        // A live candle is fresh while "now" is still inside its slot or the
        // very next one.
        let is_recent = ctx.now_ms < live.timestamp_ms + 2 * ctx.source.interval_ms();
        let snapshot = LiveCandleSnapshot {
            in_viewport: ctx.view.time.contains(live.timestamp_ms),
            is_recent,
            timestamp_ms: live.timestamp_ms,
        };
        self.diagnostics
            .observe(snapshot.qualifies(), snapshot, ctx.now_ms);
    }
}

impl SurfaceLayer for CandlestickLayer {
    fn build(&mut self, frame: &mut RenderFrame, ctx: &LayerContext<'_>) -> ChartResult<()> {
        self.report_live_candle(ctx);

        let slotted = visible_slotted_candles(ctx);
        if slotted.is_empty() {
            return Ok(());
        }

        let height = f64::from(ctx.size.height);
        let body_width = self
            .layout
            .bar_width(f64::from(ctx.size.width), slotted.len());

        for geometry in project_candles(&slotted, ctx.view.price, height, body_width) {
            let color = if geometry.is_bullish {
                self.style.up_color
            } else {
                self.style.down_color
            };

            frame.lines.push(LinePrimitive::new(
                geometry.center_x,
                geometry.wick_top,
                geometry.center_x,
                geometry.wick_bottom,
                self.style.wick_width_px,
                color,
            ));
            frame.rects.push(RectPrimitive::new(
                geometry.body_left,
                geometry.body_top,
                geometry.body_right - geometry.body_left,
                geometry.body_bottom - geometry.body_top,
                color,
            ));
        }

        Ok(())
    }
}
