use candlepane::core::BarLayoutSpec;

fn spec() -> BarLayoutSpec {
    BarLayoutSpec {
        gap_px: 2.0,
        min_width_px: 1.0,
        max_width_px: 20.0,
    }
}

#[test]
fn width_divides_available_space_minus_gaps() {
    // 600 px, 50 bars, 49 gaps of 2 px => (600 - 98) / 50 = 10.04
    let width = spec().bar_width(600.0, 50);
    assert!((width - 10.04).abs() <= 1e-9);
}

#[test]
fn zero_item_count_returns_minimum_without_dividing() {
    assert_eq!(spec().bar_width(600.0, 0), 1.0);
}

#[test]
fn width_is_clamped_to_configured_bounds() {
    // Few bars in a wide canvas hit the max clamp.
    assert_eq!(spec().bar_width(600.0, 3), 20.0);
    // Many bars in a narrow canvas hit the min clamp.
    assert_eq!(spec().bar_width(100.0, 500), 1.0);
}

#[test]
fn non_positive_available_width_returns_minimum() {
    assert_eq!(spec().bar_width(0.0, 10), 1.0);
    assert_eq!(spec().bar_width(-50.0, 10), 1.0);
}

#[test]
fn invalid_specs_are_rejected() {
    assert!(BarLayoutSpec {
        gap_px: -1.0,
        ..spec()
    }
    .validate()
    .is_err());
    assert!(BarLayoutSpec {
        min_width_px: 0.0,
        ..spec()
    }
    .validate()
    .is_err());
    assert!(BarLayoutSpec {
        min_width_px: 5.0,
        max_width_px: 2.0,
        ..spec()
    }
    .validate()
    .is_err());
    assert!(spec().validate().is_ok());
}
