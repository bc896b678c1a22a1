mod candles;
mod frame;
mod null_renderer;
mod primitives;
mod surface;
mod volume;

pub use candles::{project_candles, CandleGeometry, CandlestickLayer, CandlestickStyle};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LineKind, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};
pub use surface::{DrawingSurface, LayerContext, SurfaceLayer, SurfaceState};
pub use volume::{VolumeLayer, VolumeStyle};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
