//! Flat-list adapter.

use std::sync::Arc;

use trellis_core::logging::targets;
use trellis_core::{ConnectionId, Signal};

use crate::adapter::{
    PlaceholderGate, RealizedRow, RowBinder, RowEntry, RowKind, entry_at, kind_at, padded_count,
};
use crate::host::{LayoutId, LinearSurface, ViewBackend};
use crate::recycle::{RowContext, RowSlot};
use crate::store::RowStore;

/// Adapter for a flat scrolling list.
///
/// Composes a [`RowStore`] with a bind hook and a layout template, and
/// implements [`LinearSurface`] for the host. Mutate the store (shared via
/// [`store`](Self::store)) and the host is invalidated automatically;
/// toggle the trailing loading row with
/// [`set_show_placeholder`](Self::set_show_placeholder).
///
/// # Example
///
/// ```ignore
/// const TRACK_ROW: LayoutId = LayoutId::new(1);
///
/// let store = Arc::new(RowStore::from_items(tracks));
/// let adapter = LinearAdapter::new(store.clone(), TRACK_ROW, TrackBinder);
///
/// adapter.invalidated().connect(|_| host.request_refresh());
/// store.push(another_track); // host sees the invalidation
/// ```
///
/// [`RowStore`]: crate::store::RowStore
pub struct LinearAdapter<V: ViewBackend, T> {
    store: Arc<RowStore<T>>,
    layout: LayoutId,
    binder: Box<dyn RowBinder<V, T>>,
    invalidated: Arc<Signal<()>>,
    gate: PlaceholderGate,
    store_conn: ConnectionId,
}

impl<V, T> LinearAdapter<V, T>
where
    V: ViewBackend,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates an adapter over `store`, inflating content rows from
    /// `layout` and binding them through `binder`.
    pub fn new(
        store: Arc<RowStore<T>>,
        layout: LayoutId,
        binder: impl RowBinder<V, T> + 'static,
    ) -> Self {
        let invalidated = Arc::new(Signal::new());
        let forward = invalidated.clone();
        let store_conn = store.signals().changed.connect(move |_| forward.emit(()));
        Self {
            gate: PlaceholderGate::new(invalidated.clone()),
            store,
            layout,
            binder: Box::new(binder),
            invalidated,
            store_conn,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<RowStore<T>> {
        &self.store
    }

    /// Whether the trailing loading row is currently shown.
    pub fn show_placeholder(&self) -> bool {
        self.gate.is_shown()
    }

    /// Shows or hides the trailing loading row. A no-op when the value is
    /// unchanged; otherwise the host is invalidated.
    pub fn set_show_placeholder(&self, show: bool) {
        self.gate.set(show);
    }

    /// Resolves `position` to its entry.
    pub fn entry(&self, position: usize) -> RowEntry<T> {
        let items = self.store.items();
        entry_at(items.as_slice(), self.gate.is_shown(), position)
    }
}

impl<V: ViewBackend, T> Drop for LinearAdapter<V, T> {
    fn drop(&mut self) {
        self.store.signals().changed.disconnect(self.store_conn);
    }
}

impl<V, T> LinearSurface<V> for LinearAdapter<V, T>
where
    V: ViewBackend,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    type Item = T;

    fn count(&self) -> usize {
        padded_count(self.store.len(), self.gate.is_shown())
    }

    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    fn row_kind(&self, position: usize) -> RowKind {
        kind_at(self.store.len(), self.gate.is_shown(), position)
    }

    fn realize(
        &self,
        backend: &mut V,
        position: usize,
        recycled: Option<RealizedRow<V, T>>,
        parent: Option<&V::Container>,
    ) -> Option<RealizedRow<V, T>> {
        match self.entry(position) {
            RowEntry::OutOfRange => {
                tracing::debug!(target: targets::ADAPTER, position, "realize out of range");
                None
            }
            RowEntry::Placeholder => {
                let container = recycled
                    .and_then(RealizedRow::into_placeholder)
                    .unwrap_or_else(|| backend.placeholder());
                Some(RealizedRow::Placeholder(container))
            }
            RowEntry::Content(item) => {
                let mut slot = RowSlot::acquire(
                    backend,
                    self.layout,
                    position,
                    recycled.and_then(RealizedRow::into_slot),
                    parent,
                );
                slot.cache_mut().bind(item.clone());
                let mut ctx = RowContext::new(backend, &mut slot);
                self.binder.bind(&mut ctx, &item);
                Some(RealizedRow::Content(slot))
            }
        }
    }

    fn invalidated(&self) -> &Signal<()> {
        &self.invalidated
    }
}
