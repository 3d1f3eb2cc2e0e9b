//! Boundary traits between Trellis and the host UI toolkit.
//!
//! Trellis does not render, measure, or route input. The host toolkit does
//! all of that and is reached exclusively through the traits in this module:
//!
//! - [`ViewBackend`] is what Trellis *requires* from the host: template
//!   inflation, sub-element lookup within a container, and production of the
//!   built-in loading-spinner container.
//! - [`LinearSurface`], [`TwoLevelSurface`] and [`PagedSurface`] are what
//!   Trellis *provides* to the host: the per-surface adapter protocols the
//!   host drives to populate a flat list, a two-level expandable list, or a
//!   paged carousel. The adapter types in [`crate::adapter`] implement them.
//!
//! # Recycling Protocol
//!
//! The host owns realized views. When a position scrolls back into range the
//! host hands the previously returned [`RealizedRow`] back through the
//! `recycled` parameter and receives a rebound row in return; when it has
//! nothing to offer it passes `None` and a fresh container is inflated.
//! Hosts are expected to pool rows by [`RowKind`], but a mismatched row is
//! tolerated and simply not reused.
//!
//! Re-render notification is pull-based: adapters expose an `invalidated`
//! signal, the host connects to it, and on every mutation it must treat all
//! realized views as stale and re-query.

use trellis_core::Signal;

use crate::adapter::{RealizedRow, RowKind};

/// Identifies a layout template understood by the host's inflation service.
///
/// Values are assigned by the application (typically constants next to the
/// layout definitions) and are opaque to Trellis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutId(u32);

impl LayoutId {
    /// Creates a layout id from its raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Identifies a child region within an inflated container.
///
/// Like [`LayoutId`], values are application-assigned constants; Trellis
/// only uses them as cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(u32);

impl RegionId {
    /// Creates a region id from its raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// View services Trellis requires from the host toolkit.
///
/// `Container` and `Region` are handles, not views: they must be cheap to
/// clone and comparable, so the host can answer "is this view still mine"
/// by equality. `Rc`s, arena keys, and plain ids all qualify.
pub trait ViewBackend {
    /// Handle to a reusable container view produced from a layout template.
    type Container: Clone + PartialEq + Send + Sync;

    /// Handle to a resolved sub-element within a container.
    type Region: Clone + Send + Sync;

    /// Instantiates a new container from the given layout template.
    ///
    /// `parent` is the surface the container will eventually be attached to,
    /// when the host needs it for measurement; backends may ignore it.
    fn inflate(
        &mut self,
        layout: LayoutId,
        parent: Option<&Self::Container>,
    ) -> Self::Container;

    /// Looks up a child region inside a container.
    ///
    /// This is infallible by contract: a region id that does not exist in
    /// the container's layout is a static configuration defect, and the
    /// backend is expected to fail loudly rather than return a dummy handle.
    /// Trellis caches the result per container and never looks up the same
    /// id twice for the same container.
    fn resolve_region(&self, container: &Self::Container, region: RegionId) -> Self::Region;

    /// Produces the minimal centered-spinner container used for the
    /// trailing "loading more" placeholder row.
    fn placeholder(&mut self) -> Self::Container;
}

/// Adapter protocol for a flat scrolling list.
///
/// Implemented by [`crate::adapter::LinearAdapter`]. The host calls
/// [`count`](Self::count) to size the surface, [`row_kind`](Self::row_kind)
/// to pick a recycling pool, and [`realize`](Self::realize) to produce or
/// rebind the view for a position.
pub trait LinearSurface<V: ViewBackend>: Send + Sync {
    /// The domain item type backing content rows.
    type Item;

    /// Total number of addressable positions, including the trailing
    /// placeholder row when it is shown.
    fn count(&self) -> usize;

    /// Per-position identity. Not stable across mutations unless
    /// [`has_stable_ids`](Self::has_stable_ids) says otherwise.
    fn item_id(&self, position: usize) -> u64;

    /// The kind of row at `position`.
    fn row_kind(&self, position: usize) -> RowKind;

    /// Number of distinct row kinds this surface produces.
    fn kind_count(&self) -> usize {
        2
    }

    /// Whether [`item_id`](Self::item_id) values survive mutations.
    fn has_stable_ids(&self) -> bool {
        false
    }

    /// Produces the view for `position`, recycling `recycled` when possible.
    ///
    /// Returns `None` for an out-of-range position: the host may race a
    /// mutation with its own re-query and is expected to discard the
    /// position rather than display it.
    fn realize(
        &self,
        backend: &mut V,
        position: usize,
        recycled: Option<RealizedRow<V, Self::Item>>,
        parent: Option<&V::Container>,
    ) -> Option<RealizedRow<V, Self::Item>>;

    /// Structural-change notification. Emitted after every backing-store
    /// mutation and placeholder toggle; the host must then treat every
    /// realized view as stale.
    fn invalidated(&self) -> &Signal<()>;
}

/// Adapter protocol for a two-level expandable list.
///
/// Implemented by [`crate::adapter::TwoLevelAdapter`] and
/// [`crate::adapter::EnhancedTwoLevelAdapter`]. Both levels resolve row
/// kinds independently through the same rule, so a group row and a child
/// row can each be the loading placeholder.
pub trait TwoLevelSurface<V: ViewBackend>: Send + Sync {
    /// The domain item type backing group rows.
    type Group;

    /// The domain item type backing child rows.
    type Child;

    /// Number of group positions, including the trailing placeholder group
    /// when it is shown.
    fn group_count(&self) -> usize;

    /// Number of child positions under `group_position`, including that
    /// group's trailing placeholder child when it is shown.
    fn child_count(&self, group_position: usize) -> usize;

    /// Per-group identity.
    fn group_id(&self, group_position: usize) -> u64;

    /// Per-child identity.
    fn child_id(&self, group_position: usize, child_position: usize) -> u64;

    /// The kind of the group row at `group_position`.
    fn group_kind(&self, group_position: usize) -> RowKind;

    /// The kind of the child row at the given position pair.
    fn child_kind(&self, group_position: usize, child_position: usize) -> RowKind;

    /// Number of distinct group-row kinds.
    fn group_kind_count(&self) -> usize {
        2
    }

    /// Number of distinct child-row kinds.
    fn child_kind_count(&self) -> usize {
        2
    }

    /// Whether id values survive mutations.
    fn has_stable_ids(&self) -> bool {
        false
    }

    /// Whether the child row at the given position pair responds to
    /// selection.
    fn child_selectable(&self, group_position: usize, child_position: usize) -> bool;

    /// Produces the view for a group row. `expanded` reflects the host's
    /// current expansion state for the group and is forwarded to the bind
    /// hook.
    fn realize_group(
        &self,
        backend: &mut V,
        group_position: usize,
        expanded: bool,
        recycled: Option<RealizedRow<V, Self::Group>>,
        parent: Option<&V::Container>,
    ) -> Option<RealizedRow<V, Self::Group>>;

    /// Produces the view for a child row.
    fn realize_child(
        &self,
        backend: &mut V,
        group_position: usize,
        child_position: usize,
        recycled: Option<RealizedRow<V, Self::Child>>,
        parent: Option<&V::Container>,
    ) -> Option<RealizedRow<V, Self::Child>>;

    /// Structural-change notification, as for [`LinearSurface::invalidated`].
    fn invalidated(&self) -> &Signal<()>;
}

/// Outcome of re-resolving a live page against a mutated backing store.
///
/// Returned by [`PagedSurface::resolve_after_mutation`]. [`Retained`]
/// promises the page still shows the content now at the carried position;
/// [`Stale`] tells the host to discard and re-instantiate the page.
///
/// [`Retained`]: PageResolution::Retained
/// [`Stale`]: PageResolution::Stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageResolution {
    /// The page remains valid at the given logical position.
    Retained(usize),
    /// The page no longer has a stable identity and must be rebuilt.
    Stale,
}

/// Adapter protocol for a paged carousel.
///
/// Pages differ from list rows: several are alive at once, addressed by
/// logical position, and the host never pools them for reuse. Implemented
/// by [`crate::adapter::PagedAdapter`].
pub trait PagedSurface<V: ViewBackend>: Send + Sync {
    /// Total number of pages, including the trailing placeholder page when
    /// it is shown.
    fn count(&self) -> usize;

    /// The kind of the page at `position`.
    fn page_kind(&self, position: usize) -> RowKind;

    /// Creates (or rebinds the tracked view for) the page at `position`
    /// and returns its container. Returns `None` for an out-of-range
    /// position.
    fn instantiate(
        &self,
        backend: &mut V,
        position: usize,
        parent: Option<&V::Container>,
    ) -> Option<V::Container>;

    /// Forgets the page tracked at `position`. The host detaches the
    /// container itself.
    fn destroy(&self, position: usize);

    /// Whether `container` is the view backing `page`: the host's
    /// "is this view still mine" equality check.
    fn owns(&self, container: &V::Container, page: &V::Container) -> bool;

    /// Re-resolves a live page after a structural mutation.
    fn resolve_after_mutation(&self, page: &V::Container) -> PageResolution;

    /// Structural-change notification, as for [`LinearSurface::invalidated`].
    fn invalidated(&self) -> &Signal<()>;
}
