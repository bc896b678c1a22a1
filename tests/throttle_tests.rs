use candlepane::telemetry::{LiveCandleSnapshot, ThrottledLogger};

fn snapshot(in_viewport: bool, is_recent: bool, timestamp_ms: i64) -> LiveCandleSnapshot {
    LiveCandleSnapshot {
        in_viewport,
        is_recent,
        timestamp_ms,
    }
}

#[test]
fn first_qualifying_observation_always_logs() {
    let mut logger = ThrottledLogger::new(5_000);
    let snap = snapshot(false, false, 1_000);
    assert!(logger.observe(snap.qualifies(), snap, 0));
}

#[test]
fn unchanged_state_is_throttled_but_changes_log_immediately() {
    let mut logger = ThrottledLogger::new(5_000);
    let t = 1_000;

    // First qualifying observation logs.
    let first = snapshot(false, false, t);
    assert!(logger.observe(first.qualifies(), first, 0));

    // Identical repeat inside the window does not.
    assert!(!logger.observe(first.qualifies(), first, 0));

    // Any tracked field changing logs immediately, window notwithstanding.
    let moved = snapshot(false, false, t + 1);
    assert!(logger.observe(moved.qualifies(), moved, 0));

    // A state that stops qualifying never logs.
    let healthy = snapshot(true, true, t + 2);
    assert!(!logger.observe(healthy.qualifies(), healthy, 0));
}

#[test]
fn elapsed_window_re_permits_an_unchanged_state() {
    let mut logger = ThrottledLogger::new(100);
    let snap = snapshot(false, true, 42);

    assert!(logger.observe(snap.qualifies(), snap, 0));
    assert!(!logger.observe(snap.qualifies(), snap, 0));

    // Virtual time advances past the window; the same state logs again.
    assert!(logger.observe(snap.qualifies(), snap, 150));
}

#[test]
fn window_boundary_is_exclusive() {
    let mut logger = ThrottledLogger::new(100);
    let snap = snapshot(false, true, 42);

    assert!(logger.observe(snap.qualifies(), snap, 0));
    assert!(!logger.observe(snap.qualifies(), snap, 100), "elapsed == window stays throttled");
    assert!(logger.observe(snap.qualifies(), snap, 101));
}

#[test]
fn emission_resets_the_window_timer() {
    let mut logger = ThrottledLogger::new(100);
    let snap = snapshot(false, true, 42);

    assert!(logger.observe(snap.qualifies(), snap, 0));
    assert!(logger.observe(snap.qualifies(), snap, 150));
    // 50 ms after the second emission: still throttled.
    assert!(!logger.observe(snap.qualifies(), snap, 200));
    assert!(logger.observe(snap.qualifies(), snap, 251));
}

#[test]
fn never_qualifying_state_never_logs() {
    let mut logger = ThrottledLogger::new(100);
    let healthy = snapshot(true, true, 42);

    for now in [0, 50, 500, 5_000] {
        assert!(!logger.observe(healthy.qualifies(), healthy, now));
    }
}

#[test]
fn qualifying_condition_covers_offscreen_or_stale() {
    assert!(snapshot(false, true, 0).qualifies(), "off-screen");
    assert!(snapshot(true, false, 0).qualifies(), "stale");
    assert!(snapshot(false, false, 0).qualifies());
    assert!(!snapshot(true, true, 0).qualifies());
}
