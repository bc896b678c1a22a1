//! Explicit shared chart state with deterministic subscriptions.
//!
//! Components receive a reference to the store at construction instead of
//! reaching into ambient global state, and every subscription returns a
//! handle so teardown is deterministic. Single-threaded by contract: handlers
//! run to completion, so no locking is involved.

use indexmap::IndexMap;
use tracing::trace;

use crate::core::{Candle, PriceRange, TimeRange, ViewRange};
use crate::error::{ChartError, ChartResult};

/// Observable chart state shared by all components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartState {
    pub view: ViewRange,
    pub live_candle: Option<Candle>,
}

/// Subscription handle returned by [`ChartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

type Subscriber = Box<dyn FnMut(&ChartState)>;

/// Owning state store; mutators validate, update, then notify subscribers in
/// insertion order.
pub struct ChartStore {
    state: ChartState,
    next_subscription: u64,
    subscribers: IndexMap<u64, Subscriber>,
}

impl ChartStore {
    #[must_use]
    pub fn new(view: ViewRange) -> Self {
        Self {
            state: ChartState {
                view,
                live_candle: None,
            },
            next_subscription: 0,
            subscribers: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ChartState {
        self.state
    }

    #[must_use]
    pub fn view(&self) -> ViewRange {
        self.state.view
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&ChartState) + 'static) -> SubscriptionHandle {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.insert(id, Box::new(callback));
        SubscriptionHandle(id)
    }

    /// Removes a subscription; returns whether it was still registered.
    /// Unsubscribing twice is a no-op.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        self.subscribers.shift_remove(&handle.0).is_some()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn set_view(&mut self, view: ViewRange) -> ChartResult<()> {
        validate_time_range(view.time)?;
        validate_price_range(view.price)?;
        self.state.view = view;
        self.notify();
        Ok(())
    }

    pub fn set_time_range(&mut self, time: TimeRange) -> ChartResult<()> {
        validate_time_range(time)?;
        self.state.view.time = time;
        self.notify();
        Ok(())
    }

    pub fn set_price_range(&mut self, price: PriceRange) -> ChartResult<()> {
        validate_price_range(price)?;
        self.state.view.price = price;
        self.notify();
        Ok(())
    }

    pub fn set_live_candle(&mut self, candle: Option<Candle>) {
        self.state.live_candle = candle;
        self.notify();
    }

    /// Pans the visible time window by an additive millisecond delta.
    ///
    /// Saturates at the ends of the timestamp domain; a delta whose
    /// saturation would collapse the window leaves the state untouched.
    pub fn pan_time_by_ms(&mut self, delta_ms: i64) {
        let time = self.state.view.time;
        let panned = TimeRange::new(
            time.start_ms.saturating_add(delta_ms),
            time.end_ms.saturating_add(delta_ms),
        );
        if panned.is_degenerate() {
            return;
        }
        self.state.view.time = panned;
        self.notify();
    }

    /// Zooms the visible time window around an anchor timestamp.
    ///
    /// `factor > 1.0` zooms in, `0.0 < factor < 1.0` zooms out. The resulting
    /// span is clamped so the window never degenerates.
    pub fn zoom_time_about(
        &mut self,
        factor: f64,
        anchor_ms: i64,
        min_span_ms: i64,
    ) -> ChartResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if min_span_ms <= 0 {
            return Err(ChartError::InvalidData(
                "zoom min span must be > 0".to_owned(),
            ));
        }

        let time = self.state.view.time;
        if time.is_degenerate() {
            return Err(ChartError::InvalidData(
                "cannot zoom a degenerate time range".to_owned(),
            ));
        }
        let current_span = time.duration_ms() as f64;
        let target_span = (current_span / factor).max(min_span_ms as f64);
        let left_ratio = (anchor_ms - time.start_ms) as f64 / current_span;

        let new_start = anchor_ms as f64 - left_ratio * target_span;
        let new_end = new_start + target_span;
        self.state.view.time = TimeRange::new(new_start.round() as i64, new_end.round() as i64);
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        trace!(
            subscribers = self.subscribers.len(),
            "notifying chart state change"
        );
        let state = self.state;
        for subscriber in self.subscribers.values_mut() {
            subscriber(&state);
        }
    }
}

fn validate_time_range(time: TimeRange) -> ChartResult<()> {
    if time.is_degenerate() {
        return Err(ChartError::InvalidData(
            "time range end must be > start".to_owned(),
        ));
    }
    Ok(())
}

fn validate_price_range(price: PriceRange) -> ChartResult<()> {
    if !price.min.is_finite() || !price.max.is_finite() || price.max < price.min {
        return Err(ChartError::InvalidData(
            "price range must be finite with max >= min".to_owned(),
        ));
    }
    Ok(())
}
