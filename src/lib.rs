//! candlepane: headless candlestick/volume chart core.
//!
//! The crate keeps chart math (coordinate transforms, timeline slotting, bar
//! layout), the drawing-surface lifecycle, and the price-line overlay state
//! machine free of any concrete rendering backend. Backends plug in behind
//! the [`render::Renderer`] trait and receive fully materialized frames.

pub mod core;
pub mod error;
pub mod overlay;
pub mod render;
pub mod store;
pub mod telemetry;

pub use error::{ChartError, ChartResult};
