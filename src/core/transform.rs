//! Pure price/time to pixel transforms shared by every drawing layer.
//!
//! Unlike most of the crate these functions are total: degenerate ranges and
//! zero-size canvases return defined fallback values instead of errors,
//! because transient zero-size states occur routinely while layout settles
//! and must never propagate `NaN` or `Infinity` into geometry.

use crate::core::{PriceRange, TimeRange};

/// Maps a price to a Y pixel on the inverted price axis.
///
/// `price_range.max` maps to `0.0` and `price_range.min` to `height_px`.
/// Returns `0.0` when the range or height is degenerate, or when the input
/// magnitudes overflow the mapping.
#[must_use]
pub fn price_to_y(price: f64, price_range: PriceRange, height_px: f64) -> f64 {
    let span = price_range.span();
    if !price.is_finite()
        || span <= 0.0
        || !span.is_finite()
        || !height_px.is_finite()
        || height_px <= 0.0
    {
        return 0.0;
    }
    let y = ((price_range.max - price) / span) * height_px;
    if y.is_finite() { y } else { 0.0 }
}

/// Exact inverse of [`price_to_y`].
///
/// Returns `price_range.max` (the price at `y == 0`) when the range or height
/// is degenerate or the mapping overflows, mirroring the forward fallback.
#[must_use]
pub fn y_to_price(y: f64, price_range: PriceRange, height_px: f64) -> f64 {
    let span = price_range.span();
    if !y.is_finite()
        || span <= 0.0
        || !span.is_finite()
        || !height_px.is_finite()
        || height_px <= 0.0
    {
        return price_range.max;
    }
    let price = price_range.max - (y / height_px) * span;
    if price.is_finite() { price } else { price_range.max }
}

/// Maps a millisecond timestamp to an X pixel.
///
/// `time_range.start_ms` maps to `0.0` and `time_range.end_ms` to `width_px`.
/// Returns `0.0` when the range or width is degenerate.
#[must_use]
pub fn time_to_x(timestamp_ms: i64, time_range: TimeRange, width_px: f64) -> f64 {
    let duration = time_range.duration_ms();
    if duration <= 0 || !width_px.is_finite() || width_px <= 0.0 {
        return 0.0;
    }
    let x = ((timestamp_ms - time_range.start_ms) as f64 / duration as f64) * width_px;
    if x.is_finite() { x } else { 0.0 }
}

/// Exact inverse of [`time_to_x`] in fractional milliseconds.
///
/// Returns `time_range.start_ms` when the range or width is degenerate.
#[must_use]
pub fn x_to_time(x: f64, time_range: TimeRange, width_px: f64) -> f64 {
    let duration = time_range.duration_ms();
    if !x.is_finite() || duration <= 0 || !width_px.is_finite() || width_px <= 0.0 {
        return time_range.start_ms as f64;
    }
    let timestamp = time_range.start_ms as f64 + (x / width_px) * duration as f64;
    if timestamp.is_finite() {
        timestamp
    } else {
        time_range.start_ms as f64
    }
}
