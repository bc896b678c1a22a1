//! Telemetry helpers: opt-in tracing setup and throttled diagnostics.
//!
//! Tracing setup stays explicit and opt-in; hosts can either call
//! `init_default_tracing` or wire their own subscriber and filters.

use std::fmt::Debug;

use tracing::debug;

/// Default throttle window for repeated unchanged diagnostics.
pub const DEFAULT_THROTTLE_WINDOW_MS: i64 = 5_000;

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Rate-limits diagnostic emission on a changed-or-elapsed policy.
///
/// An observation emits iff its qualifying condition holds and either the
/// tracked snapshot differs from the last emitted one or more than the
/// throttle window has elapsed since the last emission. This guarantees the
/// first qualifying observation and every genuine state change log
/// immediately, while a continuously unchanged state logs at most once per
/// window and a never-qualifying state never logs.
///
/// The clock is the caller-supplied `now_ms`: the policy is a pure
/// elapsed-time comparison with no scheduled callback, which also makes it
/// trivially testable under virtual time.
#[derive(Debug, Clone)]
pub struct ThrottledLogger<S> {
    window_ms: i64,
    last_emitted: Option<(S, i64)>,
}

impl<S: PartialEq + Debug> ThrottledLogger<S> {
    #[must_use]
    pub fn new(window_ms: i64) -> Self {
        Self {
            window_ms,
            last_emitted: None,
        }
    }

    /// Feeds one observation; returns `true` when it was emitted.
    pub fn observe(&mut self, qualifies: bool, snapshot: S, now_ms: i64) -> bool {
        if !qualifies {
            return false;
        }

        let should_emit = match &self.last_emitted {
            None => true,
            Some((previous, emitted_at)) => {
                *previous != snapshot || now_ms - *emitted_at > self.window_ms
            }
        };

        if should_emit {
            debug!(?snapshot, "throttled diagnostic");
            self.last_emitted = Some((snapshot, now_ms));
        }
        should_emit
    }

    #[must_use]
    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }
}

/// Tracked fields for the live-candle visibility diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveCandleSnapshot {
    pub in_viewport: bool,
    pub is_recent: bool,
    pub timestamp_ms: i64,
}

impl LiveCandleSnapshot {
    /// The condition of interest: the live candle is off-screen or stale.
    #[must_use]
    pub fn qualifies(self) -> bool {
        !self.in_viewport || !self.is_recent
    }
}
