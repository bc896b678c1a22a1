use tracing::{debug, trace};

use crate::core::{Candle, CandleSource, PixelSize, ViewRange};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

/// Lifecycle of a drawing surface instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// Created but not yet attached to a host; draws are no-ops.
    Detached,
    Ready,
    /// The backend reported context loss; the surface renders nothing further.
    Failed,
    /// Torn down by the host; terminal, draws are no-ops.
    TornDown,
}

/// Everything a layer may read while building its part of a frame.
pub struct LayerContext<'a> {
    pub view: ViewRange,
    pub size: PixelSize,
    pub source: &'a dyn CandleSource,
    pub live_candle: Option<Candle>,
    /// Wall-clock milliseconds for this pass, supplied by the host so draw
    /// passes stay deterministic under test.
    pub now_ms: i64,
}

/// Composable drawing capability implemented by each chart layer.
///
/// Layers append primitives to the shared frame; they never touch the backend
/// directly and never keep state from a previous pass in the frame.
pub trait SurfaceLayer {
    fn build(&mut self, frame: &mut RenderFrame, ctx: &LayerContext<'_>) -> ChartResult<()>;
}

/// Owns the backing renderer, logical size, and device pixel ratio.
///
/// All layer code operates in logical pixels; the DPR travels on the frame as
/// an absolute `device_scale`, recomputed every pass. Resizing therefore
/// never compounds scale factors.
pub struct DrawingSurface<R: Renderer> {
    renderer: R,
    logical: PixelSize,
    device_pixel_ratio: f64,
    state: SurfaceState,
}

impl<R: Renderer> DrawingSurface<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            logical: PixelSize::new(0, 0),
            device_pixel_ratio: 1.0,
            state: SurfaceState::Detached,
        }
    }

    /// Attaches the surface with its initial logical size and DPR.
    ///
    /// The host is expected to defer this until layout has stabilized and a
    /// real size is known; a zero-area initial size is accepted and simply
    /// draws nothing until the first non-zero resize arrives.
    pub fn attach(&mut self, size: PixelSize, device_pixel_ratio: f64) -> ChartResult<()> {
        if self.state == SurfaceState::TornDown {
            return Err(ChartError::InvalidData(
                "surface cannot be re-attached after teardown".to_owned(),
            ));
        }
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }

        self.logical = size;
        self.device_pixel_ratio = device_pixel_ratio;
        self.state = SurfaceState::Ready;
        Ok(())
    }

    /// Applies an external resize notification.
    ///
    /// Zero-area sizes are transient layout states and are ignored without
    /// touching the current size.
    pub fn resize(&mut self, size: PixelSize) {
        if self.state != SurfaceState::Ready {
            return;
        }
        if !size.is_valid() {
            trace!(width = size.width, height = size.height, "ignoring zero-area resize");
            return;
        }
        self.logical = size;
    }

    /// Runs one draw pass over `layers` in order.
    ///
    /// No-op when the surface is detached, failed, or torn down. Aborts early
    /// (without invoking the backend) when the viewport cannot map anything:
    /// zero-area size or an empty visible time range. Idempotent for
    /// unchanged inputs since the frame is rebuilt from scratch.
    pub fn draw(
        &mut self,
        layers: &mut [&mut dyn SurfaceLayer],
        ctx: &LayerContext<'_>,
    ) -> ChartResult<()> {
        if self.state != SurfaceState::Ready {
            trace!(state = ?self.state, "skipping draw on non-ready surface");
            return Ok(());
        }
        if !self.logical.is_valid() || ctx.view.time.is_degenerate() {
            return Ok(());
        }

        let mut frame = RenderFrame::new(self.logical, self.device_pixel_ratio);
        for layer in layers {
            layer.build(&mut frame, ctx)?;
        }

        match self.renderer.render(&frame) {
            Ok(()) => Ok(()),
            Err(ChartError::ContextUnavailable) => {
                debug!("render context unavailable; surface disabled");
                self.state = SurfaceState::Failed;
                Err(ChartError::ContextUnavailable)
            }
            Err(other) => Err(other),
        }
    }

    /// Idempotent teardown; drawing afterwards is a no-op, not an error.
    pub fn detach(&mut self) {
        self.state = SurfaceState::TornDown;
    }

    #[must_use]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    #[must_use]
    pub fn logical_size(&self) -> PixelSize {
        self.logical
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
