use approx::assert_relative_eq;
use candlepane::core::{price_to_y, time_to_x, x_to_time, y_to_price, PriceRange, TimeRange};

#[test]
fn price_round_trip_within_tolerance() {
    let range = PriceRange::new(10.0, 110.0);
    let height = 600.0;

    for price in [10.0, 42.5, 73.9, 110.0] {
        let y = price_to_y(price, range, height);
        let recovered = y_to_price(y, range, height);
        assert_relative_eq!(recovered, price, max_relative = 1e-12);
    }
}

#[test]
fn price_axis_is_inverted() {
    let range = PriceRange::new(10.0, 110.0);

    assert_eq!(price_to_y(110.0, range, 600.0), 0.0);
    assert_eq!(price_to_y(10.0, range, 600.0), 600.0);
}

#[test]
fn midpoint_maps_to_half_height() {
    let range = PriceRange::new(90.0, 110.0);
    assert_eq!(price_to_y(100.0, range, 200.0), 100.0);
}

#[test]
fn zero_height_falls_back_without_nan() {
    let range = PriceRange::new(10.0, 110.0);

    let y = price_to_y(50.0, range, 0.0);
    assert_eq!(y, 0.0);

    let price = y_to_price(100.0, range, 0.0);
    assert!(price.is_finite());
    assert_eq!(price, range.max);
}

#[test]
fn degenerate_price_range_falls_back_without_nan() {
    let range = PriceRange::new(100.0, 100.0);

    assert_eq!(price_to_y(100.0, range, 600.0), 0.0);
    assert_eq!(y_to_price(300.0, range, 600.0), 100.0);
}

#[test]
fn overflowing_magnitudes_fall_back_instead_of_propagating_infinity() {
    // Finite but extreme inputs whose product overflows f64.
    let range = PriceRange::new(0.0, 582_399_739.9);
    assert_eq!(price_to_y(-6.0e282, range, 2.0e299), 0.0);

    // A subnormal height blows up the division; the degenerate fallback
    // applies rather than -inf.
    let wide = PriceRange::new(0.0, 1.0e9);
    assert_eq!(y_to_price(1.0, wide, 5.0e-324), wide.max);
}

#[test]
fn non_finite_inputs_fall_back_to_defined_values() {
    let range = PriceRange::new(90.0, 110.0);
    assert_eq!(price_to_y(f64::NAN, range, 200.0), 0.0);
    assert_eq!(price_to_y(f64::INFINITY, range, 200.0), 0.0);
    assert_eq!(price_to_y(100.0, range, f64::NAN), 0.0);
    assert_eq!(y_to_price(f64::NEG_INFINITY, range, 200.0), range.max);
    assert_eq!(y_to_price(100.0, range, f64::NAN), range.max);

    let time = TimeRange::new(0, 10_000);
    assert_eq!(x_to_time(f64::NAN, time, 1000.0), 0.0);
    assert_eq!(time_to_x(5_000, time, f64::NAN), 0.0);
}

#[test]
fn time_round_trip_within_tolerance() {
    let range = TimeRange::new(1_700_000_000_000, 1_700_000_600_000);
    let width = 1200.0;

    let original = 1_700_000_123_000;
    let x = time_to_x(original, range, width);
    let recovered = x_to_time(x, range, width);
    assert_relative_eq!(recovered, original as f64, max_relative = 1e-12);
}

#[test]
fn time_range_bounds_map_to_canvas_edges() {
    let range = TimeRange::new(0, 10_000);

    assert_eq!(time_to_x(0, range, 1000.0), 0.0);
    assert_eq!(time_to_x(10_000, range, 1000.0), 1000.0);
    assert_eq!(time_to_x(5_000, range, 1000.0), 500.0);
}

#[test]
fn degenerate_time_range_falls_back_without_nan() {
    let range = TimeRange::new(5_000, 5_000);

    assert_eq!(time_to_x(5_000, range, 1000.0), 0.0);
    assert_eq!(x_to_time(500.0, range, 1000.0), 5_000.0);
}
