//! Paged-carousel adapter.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use trellis_core::logging::targets;
use trellis_core::{ConnectionId, Signal};

use crate::adapter::{
    PlaceholderGate, RealizedRow, RowBinder, RowEntry, RowKind, entry_at, kind_at, padded_count,
};
use crate::host::{LayoutId, PageResolution, PagedSurface, ViewBackend};
use crate::recycle::{RowContext, RowSlot};
use crate::store::RowStore;

/// Adapter for a paged carousel.
///
/// Unlike list rows, pages are not pooled by the host: several are alive at
/// once, addressed by logical position. The adapter therefore tracks the
/// most recently instantiated row per position itself and rebinds it when
/// the same position is instantiated again; [`destroy`](PagedSurface::destroy)
/// forgets a position.
///
/// After any structural mutation, previously returned page identities are
/// entirely stale: [`resolve_after_mutation`](PagedSurface::resolve_after_mutation)
/// always answers [`PageResolution::Stale`], requiring the host to discard
/// and re-instantiate all live pages. No positional diffing is attempted.
pub struct PagedAdapter<V: ViewBackend, T> {
    store: Arc<RowStore<T>>,
    layout: LayoutId,
    binder: Box<dyn RowBinder<V, T>>,
    /// Most recently instantiated row per logical position.
    pages: RwLock<HashMap<usize, RealizedRow<V, T>>>,
    invalidated: Arc<Signal<()>>,
    gate: PlaceholderGate,
    store_conn: ConnectionId,
}

impl<V, T> PagedAdapter<V, T>
where
    V: ViewBackend,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates an adapter over `store`, inflating pages from `layout` and
    /// binding them through `binder`.
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
            pages: RwLock::new(HashMap::new()),
            invalidated,
            store_conn,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<RowStore<T>> {
        &self.store
    }

    /// Whether the trailing loading page is currently shown.
    pub fn show_placeholder(&self) -> bool {
        self.gate.is_shown()
    }

    /// Shows or hides the trailing loading page. A no-op when the value is
    /// unchanged; otherwise the host is invalidated.
    pub fn set_show_placeholder(&self, show: bool) {
        self.gate.set(show);
    }

    /// The container of the page currently tracked at `position`, if any.
    pub fn page(&self, position: usize) -> Option<V::Container> {
        self.pages.read().get(&position).map(|row| row.container().clone())
    }

    /// Number of positions with a tracked page.
    pub fn live_pages(&self) -> usize {
        self.pages.read().len()
    }
}

impl<V: ViewBackend, T> Drop for PagedAdapter<V, T> {
    fn drop(&mut self) {
        self.store.signals().changed.disconnect(self.store_conn);
    }
}

impl<V, T> PagedSurface<V> for PagedAdapter<V, T>
where
    V: ViewBackend,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn count(&self) -> usize {
        padded_count(self.store.len(), self.gate.is_shown())
    }

    fn page_kind(&self, position: usize) -> RowKind {
        kind_at(self.store.len(), self.gate.is_shown(), position)
    }

    fn instantiate(
        &self,
        backend: &mut V,
        position: usize,
        parent: Option<&V::Container>,
    ) -> Option<V::Container> {
        let entry = {
            let items = self.store.items();
            entry_at(items.as_slice(), self.gate.is_shown(), position)
        };
        // The previously instantiated row for this position, if any, is the
        // recycling candidate.
        let recycled = self.pages.write().remove(&position);

        let realized = match entry {
            RowEntry::OutOfRange => {
                tracing::debug!(target: targets::ADAPTER, position, "instantiate out of range");
                return None;
            }
            RowEntry::Placeholder => {
                let container = recycled
                    .and_then(RealizedRow::into_placeholder)
                    .unwrap_or_else(|| backend.placeholder());
                RealizedRow::Placeholder(container)
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
                RealizedRow::Content(slot)
            }
        };

        let container = realized.container().clone();
        self.pages.write().insert(position, realized);
        Some(container)
    }

    fn destroy(&self, position: usize) {
        if self.pages.write().remove(&position).is_some() {
            tracing::trace!(target: targets::ADAPTER, position, "page destroyed");
        }
    }

    fn owns(&self, container: &V::Container, page: &V::Container) -> bool {
        container == page
    }

    fn resolve_after_mutation(&self, _page: &V::Container) -> PageResolution {
        // No stable identity across mutation: every live page is rebuilt.
        PageResolution::Stale
    }

    fn invalidated(&self) -> &Signal<()> {
        &self.invalidated
    }
}
