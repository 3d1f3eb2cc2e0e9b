//! Change notification for collection stores.

use trellis_core::Signal;
use trellis_core::logging::targets;

/// What a store mutation did, in broad strokes.
///
/// The payload exists for logging and tests. It is *not* a diff: every
/// event, whatever its variant, means "re-render everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// Rows `first..=last` were inserted.
    Inserted {
        /// First inserted row.
        first: usize,
        /// Last inserted row.
        last: usize,
    },
    /// Rows `first..=last` were removed.
    Removed {
        /// First removed row.
        first: usize,
        /// Last removed row.
        last: usize,
    },
    /// The row (or, for grouped stores, the group) at `index` changed in
    /// place.
    Replaced {
        /// The affected row.
        index: usize,
    },
    /// The store was rebuilt wholesale.
    Reset,
}

/// The signal set a store exposes to its owning adapter.
pub struct StoreSignals {
    /// Emitted after every signaling mutation.
    pub changed: Signal<StoreEvent>,
}

impl StoreSignals {
    /// Creates a new signal set.
    pub fn new() -> Self {
        Self {
            changed: Signal::new(),
        }
    }

    /// Emits an insertion event.
    pub fn notify_inserted(&self, first: usize, last: usize) {
        self.notify(StoreEvent::Inserted { first, last });
    }

    /// Emits a removal event.
    pub fn notify_removed(&self, first: usize, last: usize) {
        self.notify(StoreEvent::Removed { first, last });
    }

    /// Emits an in-place replacement event.
    pub fn notify_replaced(&self, index: usize) {
        self.notify(StoreEvent::Replaced { index });
    }

    /// Emits a reset event.
    pub fn notify_reset(&self) {
        self.notify(StoreEvent::Reset);
    }

    fn notify(&self, event: StoreEvent) {
        tracing::debug!(target: targets::STORE, ?event, "store changed");
        self.changed.emit(event);
    }
}

impl Default for StoreSignals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_notify_helpers_emit_events() {
        let signals = StoreSignals::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        signals.changed.connect(move |event| {
            recv.lock().push(*event);
        });

        signals.notify_inserted(0, 2);
        signals.notify_removed(1, 1);
        signals.notify_replaced(4);
        signals.notify_reset();

        let events = received.lock();
        assert_eq!(
            *events,
            vec![
                StoreEvent::Inserted { first: 0, last: 2 },
                StoreEvent::Removed { first: 1, last: 1 },
                StoreEvent::Replaced { index: 4 },
                StoreEvent::Reset,
            ]
        );
    }
}
