//! Reusable container slots and the bind-call context.

use trellis_core::logging::targets;

use crate::host::{LayoutId, RegionId, ViewBackend};
use crate::recycle::RowCache;

/// One reusable container together with its [`RowCache`].
///
/// Slots are the unit of recycling: the adapter returns a slot to the host
/// inside a realized row, the host hands it back when the position is
/// recycled, and [`acquire`](Self::acquire) decides whether the container
/// can be reused. The cache travels with the container, never with the
/// position.
pub struct RowSlot<V: ViewBackend, T> {
    /// The layout template this slot's container was inflated from.
    layout: LayoutId,
    /// The position this slot currently serves; restamped on every acquire.
    position: usize,
    container: V::Container,
    cache: RowCache<T, V::Region>,
}

impl<V: ViewBackend, T> RowSlot<V, T> {
    /// Acquires a slot for `position`, recycling `recycled` when possible.
    ///
    /// With no recycled slot, a new container is inflated from `layout` and
    /// attached to a fresh, empty cache. A recycled slot inflated from the
    /// same layout is restamped with the new position and returned with its
    /// cache intact. A recycled slot from a *different* layout is discarded
    /// and a fresh one inflated; caches never migrate across layouts.
    pub fn acquire(
        backend: &mut V,
        layout: LayoutId,
        position: usize,
        recycled: Option<Self>,
        parent: Option<&V::Container>,
    ) -> Self {
        match recycled {
            Some(mut slot) if slot.layout == layout => {
                tracing::trace!(
                    target: targets::RECYCLE,
                    position,
                    layout = layout.raw(),
                    "reusing recycled container"
                );
                slot.position = position;
                slot
            }
            other => {
                if other.is_some() {
                    tracing::debug!(
                        target: targets::RECYCLE,
                        position,
                        layout = layout.raw(),
                        "recycled container has a different layout, inflating fresh"
                    );
                } else {
                    tracing::trace!(
                        target: targets::RECYCLE,
                        position,
                        layout = layout.raw(),
                        "no recycled container, inflating fresh"
                    );
                }
                Self {
                    layout,
                    position,
                    container: backend.inflate(layout, parent),
                    cache: RowCache::new(),
                }
            }
        }
    }

    /// The layout template this slot was inflated from.
    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    /// The position this slot currently serves.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The container handle.
    pub fn container(&self) -> &V::Container {
        &self.container
    }

    /// The slot's cache.
    pub fn cache(&self) -> &RowCache<T, V::Region> {
        &self.cache
    }

    /// Mutable access to the slot's cache.
    pub fn cache_mut(&mut self) -> &mut RowCache<T, V::Region> {
        &mut self.cache
    }

    /// Resolves a child region of this slot's container through the cache.
    pub fn region(&mut self, backend: &V, region: RegionId) -> V::Region {
        let Self {
            container, cache, ..
        } = self;
        cache.resolve_with(region, || backend.resolve_region(container, region))
    }
}

/// The view of a slot handed to application bind hooks.
///
/// Borrows the backend for region lookups and the slot for cache access;
/// everything a hook writes must happen synchronously before the hook
/// returns.
///
/// # Example
///
/// ```ignore
/// fn bind(&self, ctx: &mut RowContext<'_, V, Track>, item: &Track) {
///     let title = ctx.region(regions::TITLE);
///     let duration = ctx.region(regions::DURATION);
///     // ... write item fields into the resolved elements ...
/// }
/// ```
pub struct RowContext<'a, V: ViewBackend, T> {
    backend: &'a V,
    slot: &'a mut RowSlot<V, T>,
}

impl<'a, V: ViewBackend, T> RowContext<'a, V, T> {
    /// Creates a context for a bind call.
    pub fn new(backend: &'a V, slot: &'a mut RowSlot<V, T>) -> Self {
        Self { backend, slot }
    }

    /// Resolves a child region of the bound container, cached per container.
    pub fn region(&mut self, region: RegionId) -> V::Region {
        self.slot.region(self.backend, region)
    }

    /// The container being bound.
    pub fn container(&self) -> &V::Container {
        self.slot.container()
    }

    /// The position being bound.
    pub fn position(&self) -> usize {
        self.slot.position()
    }

    /// The item currently bound into the slot's cache.
    pub fn bound(&self) -> Option<&T> {
        self.slot.cache().bound()
    }
}
