//! Price-line overlay: registry, hit-testing, and the drag state machine.

mod drag;
mod price_line;

pub use drag::{ListenerHandle, ListenerRegistry};
pub use price_line::{PriceLine, PriceLineId};

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::transform::{price_to_y, time_to_x, y_to_price};
use crate::core::PriceRange;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    LayerContext, LinePrimitive, RenderFrame, SurfaceLayer, TextHAlign, TextPrimitive,
};

/// Change-intent events emitted to the owning application.
///
/// The overlay never commits a dragged price itself; `Dragged::new_price` is
/// authoritative only once the owner writes it back into the line.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLineEvent {
    Clicked {
        id: PriceLineId,
        line: PriceLine,
    },
    Hovered {
        id: PriceLineId,
        line: PriceLine,
    },
    Dragged {
        id: PriceLineId,
        old_price: f64,
        new_price: f64,
        line: PriceLine,
    },
}

/// Per-gesture event list; pointer handlers emit at most a couple of events.
pub type PriceLineEvents = SmallVec<[PriceLineEvent; 2]>;

#[derive(Debug)]
enum DragState {
    Idle,
    Dragging {
        line_id: PriceLineId,
        start_pointer_y: f64,
        start_price: f64,
        listener: ListenerHandle,
    },
}

/// Overlay component tracking price lines and the drag lifecycle.
///
/// Pointer handlers take the current price range and canvas height so drag
/// deltas go through the same transform the renderer uses; the emitted price
/// therefore matches the rendered pixel position under any viewport scale.
#[derive(Debug)]
pub struct PriceLineOverlay {
    lines: IndexMap<PriceLineId, PriceLine>,
    drag: DragState,
    listeners: ListenerRegistry,
    hit_tolerance_px: f64,
}

impl Default for PriceLineOverlay {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl PriceLineOverlay {
    #[must_use]
    pub fn new(hit_tolerance_px: f64) -> Self {
        Self {
            lines: IndexMap::new(),
            drag: DragState::Idle,
            listeners: ListenerRegistry::new(),
            hit_tolerance_px,
        }
    }

    /// Adds or replaces a line. Insertion order is the base draw order;
    /// `z_index` overrides it at render time.
    pub fn upsert_line(&mut self, line: PriceLine) -> ChartResult<()> {
        line.validate()?;
        self.lines.insert(line.id, line);
        Ok(())
    }

    /// Removes a line; an active drag on it is cancelled.
    pub fn remove_line(&mut self, id: PriceLineId) -> Option<PriceLine> {
        if let DragState::Dragging { line_id, .. } = &self.drag {
            if *line_id == id {
                self.end_drag();
            }
        }
        self.lines.shift_remove(&id)
    }

    #[must_use]
    pub fn line(&self, id: PriceLineId) -> Option<&PriceLine> {
        self.lines.get(&id)
    }

    /// Commits a new price for a line, typically in response to a
    /// [`PriceLineEvent::Dragged`] event.
    pub fn commit_price(&mut self, id: PriceLineId, price: f64) -> ChartResult<()> {
        if !price.is_finite() {
            return Err(ChartError::InvalidData(
                "committed price must be finite".to_owned(),
            ));
        }
        match self.lines.get_mut(&id) {
            Some(line) => {
                line.price = price;
                Ok(())
            }
            None => Err(ChartError::InvalidData(format!(
                "unknown price line id {}",
                id.0
            ))),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    #[must_use]
    pub fn listener_registry(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Lines inside the current price range, in insertion order.
    ///
    /// Recomputed on every call; visibility is never cached across viewport
    /// changes.
    #[must_use]
    pub fn visible_lines(&self, price_range: PriceRange) -> Vec<&PriceLine> {
        self.lines
            .values()
            .filter(|line| price_range.contains(line.price))
            .collect()
    }

    /// Nearest visible, interactive line within the hit tolerance.
    #[must_use]
    pub fn hit_test(
        &self,
        pointer_y: f64,
        price_range: PriceRange,
        height_px: f64,
    ) -> Option<PriceLineId> {
        self.visible_lines(price_range)
            .into_iter()
            .filter(|line| line.interactive)
            .map(|line| {
                let line_y = price_to_y(line.price, price_range, height_px);
                (line.id, OrderedFloat((line_y - pointer_y).abs()))
            })
            .filter(|(_, distance)| distance.0 <= self.hit_tolerance_px)
            .min_by_key(|(_, distance)| *distance)
            .map(|(id, _)| id)
    }

    /// Pointer-down: starts a drag on a draggable line, or emits `Clicked`
    /// on an interactive non-draggable one.
    pub fn pointer_down(
        &mut self,
        pointer_y: f64,
        price_range: PriceRange,
        height_px: f64,
    ) -> PriceLineEvents {
        let mut events = PriceLineEvents::new();
        let Some(id) = self.hit_test(pointer_y, price_range, height_px) else {
            return events;
        };
        let line = self.lines[&id].clone();

        if line.draggable {
            trace!(line = id.0, "drag start");
            self.drag = DragState::Dragging {
                line_id: id,
                start_pointer_y: pointer_y,
                start_price: line.price,
                listener: self.listeners.acquire(),
            };
        } else {
            events.push(PriceLineEvent::Clicked { id, line });
        }
        events
    }

    /// Pointer-move: emits `Dragged` while a session is active, `Hovered`
    /// otherwise. With no active session and no line under the pointer this
    /// emits nothing.
    pub fn pointer_move(
        &mut self,
        pointer_y: f64,
        price_range: PriceRange,
        height_px: f64,
    ) -> PriceLineEvents {
        let mut events = PriceLineEvents::new();

        match &self.drag {
            DragState::Dragging {
                line_id,
                start_pointer_y,
                start_price,
                ..
            } => {
                // Round-trip through the transform instead of a direct linear
                // formula so the drag tracks the rendered pixel position.
                let delta_y = pointer_y - start_pointer_y;
                let dragged_y = price_to_y(*start_price, price_range, height_px) + delta_y;
                let new_price = y_to_price(dragged_y, price_range, height_px);

                if let Some(line) = self.lines.get(line_id) {
                    events.push(PriceLineEvent::Dragged {
                        id: *line_id,
                        old_price: *start_price,
                        new_price,
                        line: line.clone(),
                    });
                }
            }
            DragState::Idle => {
                if let Some(id) = self.hit_test(pointer_y, price_range, height_px) {
                    events.push(PriceLineEvent::Hovered {
                        id,
                        line: self.lines[&id].clone(),
                    });
                }
            }
        }
        events
    }

    /// Pointer-up: ends the drag session. No-op without one.
    pub fn pointer_up(&mut self) {
        self.end_drag();
    }

    /// Component teardown: runs the same cleanup as pointer-up even when the
    /// up event was never received. No-op on an idle overlay.
    pub fn teardown(&mut self) {
        self.end_drag();
    }

    fn end_drag(&mut self) {
        if let DragState::Dragging { listener, .. } = &mut self.drag {
            listener.release();
        }
        self.drag = DragState::Idle;
    }
}

impl SurfaceLayer for PriceLineOverlay {
    fn build(&mut self, frame: &mut RenderFrame, ctx: &LayerContext<'_>) -> ChartResult<()> {
        let width = f64::from(ctx.size.width);
        let height = f64::from(ctx.size.height);

        // Partial lines span the candle data region; extend flags push either
        // end to the canvas edge.
        let data_span = data_span_px(ctx, width);

        let mut visible = self.visible_lines(ctx.view.price);
        visible.sort_by_key(|line| line.z_index);

        for line in visible {
            let y = price_to_y(line.price, ctx.view.price, height);
            let (data_start, data_end) = data_span;
            let x1 = if line.extend_left { 0.0 } else { data_start };
            let x2 = if line.extend_right { width } else { data_end };
            if x2 <= x1 {
                continue;
            }

            frame.lines.push(
                LinePrimitive::new(x1, y, x2, y, line.width_px, line.color).with_kind(line.kind),
            );

            if let Some(label) = &line.label {
                frame.texts.push(TextPrimitive::new(
                    label.clone(),
                    x1 + 4.0,
                    y - 4.0,
                    11.0,
                    line.color,
                    TextHAlign::Left,
                ));
            }
            if line.show_price_label {
                frame.texts.push(TextPrimitive::new(
                    format!("{:.2}", line.price),
                    width - 4.0,
                    y - 4.0,
                    11.0,
                    line.color,
                    TextHAlign::Right,
                ));
            }
        }

        Ok(())
    }
}

fn data_span_px(ctx: &LayerContext<'_>, width: f64) -> (f64, f64) {
    let candles = ctx
        .source
        .candles_in_range(ctx.view.time.start_ms, ctx.view.time.end_ms);
    match (candles.first(), candles.last()) {
        (Some(first), Some(last)) => (
            time_to_x(first.timestamp_ms, ctx.view.time, width),
            time_to_x(last.timestamp_ms, ctx.view.time, width),
        ),
        _ => (0.0, width),
    }
}
