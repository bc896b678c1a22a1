//! Scoped acquisition of drag-session listeners.
//!
//! While a drag is active the overlay holds pointer move/up listeners that
//! outlive the line itself (equivalent to document-level listeners in a UI
//! host). Registration is modeled as a handle whose release is idempotent and
//! also runs on `Drop`, so pointer-up and forced teardown both deregister
//! exactly once.

use std::cell::Cell;
use std::rc::Rc;

/// Counts currently registered drag listeners. Single-threaded by contract.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    active: Rc<Cell<usize>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the move/up listener pair and returns its release handle.
    #[must_use]
    pub fn acquire(&self) -> ListenerHandle {
        self.active.set(self.active.get() + 1);
        ListenerHandle {
            registry: Rc::clone(&self.active),
            released: false,
        }
    }

    /// Number of listener registrations currently held.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.get()
    }
}

/// Disposable registration handle; releasing twice is a no-op.
#[derive(Debug)]
pub struct ListenerHandle {
    registry: Rc<Cell<usize>>,
    released: bool,
}

impl ListenerHandle {
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let current = self.registry.get();
        debug_assert!(current > 0, "listener released more times than acquired");
        self.registry.set(current.saturating_sub(1));
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.release();
    }
}
