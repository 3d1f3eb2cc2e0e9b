//! Two-level expandable-list adapter.

use std::hash::Hash;
use std::sync::Arc;

use trellis_core::logging::targets;
use trellis_core::{ConnectionId, Signal};

use crate::adapter::{
    EnhancedTwoLevelBinder, PlaceholderGate, RealizedRow, RowEntry, RowKind, TwoLevelBinder,
    kind_at, padded_count,
};
use crate::host::{LayoutId, TwoLevelSurface, ViewBackend};
use crate::recycle::{RowContext, RowSlot};
use crate::store::GroupedStore;

/// The group/child bind hooks, with or without change detection.
enum GroupHook<V: ViewBackend, G, C> {
    Plain(Box<dyn TwoLevelBinder<V, G, C>>),
    ChangeAware(Box<dyn EnhancedTwoLevelBinder<V, G, C>>),
}

/// Adapter for a two-level expandable list.
///
/// Composes a [`GroupedStore`] with a pair of bind hooks and two layout
/// templates (one per level), and implements [`TwoLevelSurface`] for the
/// host. Both levels resolve row kinds independently from one shared
/// placeholder flag: when the flag is on, one synthetic group trails the
/// real groups and one synthetic child trails every group's children (the
/// synthetic group therefore shows exactly one placeholder child).
/// Per-group placeholder override is not supported.
pub struct TwoLevelAdapter<V: ViewBackend, G, C> {
    store: Arc<GroupedStore<G, C>>,
    group_layout: LayoutId,
    child_layout: LayoutId,
    binder: GroupHook<V, G, C>,
    invalidated: Arc<Signal<()>>,
    gate: PlaceholderGate,
    store_conn: ConnectionId,
}

impl<V, G, C> TwoLevelAdapter<V, G, C>
where
    V: ViewBackend,
    G: Eq + Hash + Clone + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates an adapter over `store` with a plain binder.
    pub fn new(
        store: Arc<GroupedStore<G, C>>,
        group_layout: LayoutId,
        child_layout: LayoutId,
        binder: impl TwoLevelBinder<V, G, C> + 'static,
    ) -> Self {
        Self::with_hook(store, group_layout, child_layout, GroupHook::Plain(Box::new(binder)))
    }

    fn with_hook(
        store: Arc<GroupedStore<G, C>>,
        group_layout: LayoutId,
        child_layout: LayoutId,
        binder: GroupHook<V, G, C>,
    ) -> Self {
        let invalidated = Arc::new(Signal::new());
        let forward = invalidated.clone();
        let store_conn = store.signals().changed.connect(move |_| forward.emit(()));
        Self {
            gate: PlaceholderGate::new(invalidated.clone()),
            store,
            group_layout,
            child_layout,
            binder,
            invalidated,
            store_conn,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<GroupedStore<G, C>> {
        &self.store
    }

    /// Whether the trailing loading rows are currently shown.
    pub fn show_placeholder(&self) -> bool {
        self.gate.is_shown()
    }

    /// Shows or hides the trailing loading rows at both levels. A no-op
    /// when the value is unchanged; otherwise the host is invalidated.
    pub fn set_show_placeholder(&self, show: bool) {
        self.gate.set(show);
    }

    /// Resolves a group position to its entry.
    pub fn group_entry(&self, group_position: usize) -> RowEntry<G> {
        let len = self.store.group_count();
        if self.gate.is_shown() && group_position == len {
            return RowEntry::Placeholder;
        }
        match self.store.group(group_position) {
            Some(group) => RowEntry::Content(group),
            None => RowEntry::OutOfRange,
        }
    }

    /// Resolves a child position pair to its entry.
    ///
    /// The synthetic trailing group has no children of its own, so its
    /// single visible child resolves straight to the placeholder.
    pub fn child_entry(&self, group_position: usize, child_position: usize) -> RowEntry<C> {
        let len = self.store.child_count(group_position);
        if self.gate.is_shown() && child_position == len {
            return RowEntry::Placeholder;
        }
        match self.store.child(group_position, child_position) {
            Some(child) => RowEntry::Content(child),
            None => RowEntry::OutOfRange,
        }
    }
}

impl<V: ViewBackend, G, C> Drop for TwoLevelAdapter<V, G, C> {
    fn drop(&mut self) {
        self.store.signals().changed.disconnect(self.store_conn);
    }
}

impl<V, G, C> TwoLevelSurface<V> for TwoLevelAdapter<V, G, C>
where
    V: ViewBackend,
    G: Eq + Hash + Clone + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    type Group = G;
    type Child = C;

    fn group_count(&self) -> usize {
        padded_count(self.store.group_count(), self.gate.is_shown())
    }

    fn child_count(&self, group_position: usize) -> usize {
        padded_count(self.store.child_count(group_position), self.gate.is_shown())
    }

    fn group_id(&self, group_position: usize) -> u64 {
        group_position as u64
    }

    fn child_id(&self, _group_position: usize, child_position: usize) -> u64 {
        child_position as u64
    }

    fn group_kind(&self, group_position: usize) -> RowKind {
        kind_at(self.store.group_count(), self.gate.is_shown(), group_position)
    }

    fn child_kind(&self, group_position: usize, child_position: usize) -> RowKind {
        kind_at(
            self.store.child_count(group_position),
            self.gate.is_shown(),
            child_position,
        )
    }

    fn child_selectable(&self, group_position: usize, child_position: usize) -> bool {
        match &self.binder {
            GroupHook::Plain(binder) => binder.child_selectable(group_position, child_position),
            GroupHook::ChangeAware(binder) => {
                binder.child_selectable(group_position, child_position)
            }
        }
    }

    fn realize_group(
        &self,
        backend: &mut V,
        group_position: usize,
        expanded: bool,
        recycled: Option<RealizedRow<V, G>>,
        parent: Option<&V::Container>,
    ) -> Option<RealizedRow<V, G>> {
        match self.group_entry(group_position) {
            RowEntry::OutOfRange => {
                tracing::debug!(target: targets::ADAPTER, group_position, "realize_group out of range");
                None
            }
            RowEntry::Placeholder => {
                let container = recycled
                    .and_then(RealizedRow::into_placeholder)
                    .unwrap_or_else(|| backend.placeholder());
                Some(RealizedRow::Placeholder(container))
            }
            RowEntry::Content(group) => {
                let mut slot = RowSlot::acquire(
                    backend,
                    self.group_layout,
                    group_position,
                    recycled.and_then(RealizedRow::into_slot),
                    parent,
                );
                let changed = !slot.cache().was_bound_to(&group);
                slot.cache_mut().bind(group.clone());
                let mut ctx = RowContext::new(backend, &mut slot);
                match &self.binder {
                    GroupHook::Plain(binder) => binder.bind_group(&mut ctx, &group, expanded),
                    GroupHook::ChangeAware(binder) => {
                        binder.bind_group(&mut ctx, &group, expanded, changed)
                    }
                }
                Some(RealizedRow::Content(slot))
            }
        }
    }

    fn realize_child(
        &self,
        backend: &mut V,
        group_position: usize,
        child_position: usize,
        recycled: Option<RealizedRow<V, C>>,
        parent: Option<&V::Container>,
    ) -> Option<RealizedRow<V, C>> {
        match self.child_entry(group_position, child_position) {
            RowEntry::OutOfRange => {
                tracing::debug!(
                    target: targets::ADAPTER,
                    group_position,
                    child_position,
                    "realize_child out of range"
                );
                None
            }
            RowEntry::Placeholder => {
                let container = recycled
                    .and_then(RealizedRow::into_placeholder)
                    .unwrap_or_else(|| backend.placeholder());
                Some(RealizedRow::Placeholder(container))
            }
            RowEntry::Content(child) => {
                let mut slot = RowSlot::acquire(
                    backend,
                    self.child_layout,
                    child_position,
                    recycled.and_then(RealizedRow::into_slot),
                    parent,
                );
                let changed = !slot.cache().was_bound_to(&child);
                slot.cache_mut().bind(child.clone());
                let mut ctx = RowContext::new(backend, &mut slot);
                match &self.binder {
                    GroupHook::Plain(binder) => binder.bind_child(&mut ctx, &child),
                    GroupHook::ChangeAware(binder) => {
                        binder.bind_child(&mut ctx, &child, changed)
                    }
                }
                Some(RealizedRow::Content(slot))
            }
        }
    }

    fn invalidated(&self) -> &Signal<()> {
        &self.invalidated
    }
}

/// [`TwoLevelAdapter`] with identity-change detection.
///
/// Before each bind the slot's previously bound item is compared (by value
/// equality) against the incoming one; the resulting `changed` flag is
/// passed to the [`EnhancedTwoLevelBinder`] hooks. A freshly inflated
/// container always reports changed.
///
/// Dereferences to [`TwoLevelAdapter`] for store access and the placeholder
/// toggle.
pub struct EnhancedTwoLevelAdapter<V: ViewBackend, G, C> {
    inner: TwoLevelAdapter<V, G, C>,
}

impl<V, G, C> EnhancedTwoLevelAdapter<V, G, C>
where
    V: ViewBackend,
    G: Eq + Hash + Clone + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates an adapter over `store` with a change-aware binder.
    pub fn new(
        store: Arc<GroupedStore<G, C>>,
        group_layout: LayoutId,
        child_layout: LayoutId,
        binder: impl EnhancedTwoLevelBinder<V, G, C> + 'static,
    ) -> Self {
        Self {
            inner: TwoLevelAdapter::with_hook(
                store,
                group_layout,
                child_layout,
                GroupHook::ChangeAware(Box::new(binder)),
            ),
        }
    }
}

impl<V: ViewBackend, G, C> std::ops::Deref for EnhancedTwoLevelAdapter<V, G, C> {
    type Target = TwoLevelAdapter<V, G, C>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<V, G, C> TwoLevelSurface<V> for EnhancedTwoLevelAdapter<V, G, C>
where
    V: ViewBackend,
    G: Eq + Hash + Clone + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    type Group = G;
    type Child = C;

    fn group_count(&self) -> usize {
        self.inner.group_count()
    }

    fn child_count(&self, group_position: usize) -> usize {
        self.inner.child_count(group_position)
    }

    fn group_id(&self, group_position: usize) -> u64 {
        self.inner.group_id(group_position)
    }

    fn child_id(&self, group_position: usize, child_position: usize) -> u64 {
        self.inner.child_id(group_position, child_position)
    }

    fn group_kind(&self, group_position: usize) -> RowKind {
        self.inner.group_kind(group_position)
    }

    fn child_kind(&self, group_position: usize, child_position: usize) -> RowKind {
        self.inner.child_kind(group_position, child_position)
    }

    fn child_selectable(&self, group_position: usize, child_position: usize) -> bool {
        TwoLevelSurface::child_selectable(&self.inner, group_position, child_position)
    }

    fn realize_group(
        &self,
        backend: &mut V,
        group_position: usize,
        expanded: bool,
        recycled: Option<RealizedRow<V, G>>,
        parent: Option<&V::Container>,
    ) -> Option<RealizedRow<V, G>> {
        self.inner
            .realize_group(backend, group_position, expanded, recycled, parent)
    }

    fn realize_child(
        &self,
        backend: &mut V,
        group_position: usize,
        child_position: usize,
        recycled: Option<RealizedRow<V, C>>,
        parent: Option<&V::Container>,
    ) -> Option<RealizedRow<V, C>> {
        self.inner
            .realize_child(backend, group_position, child_position, recycled, parent)
    }

    fn invalidated(&self) -> &Signal<()> {
        self.inner.invalidated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{CHILD_ROW, GROUP_ROW, TestBackend, regions};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingBinder {
        groups: Arc<Mutex<Vec<(String, bool)>>>,
        children: Arc<Mutex<Vec<i32>>>,
    }

    impl TwoLevelBinder<TestBackend, String, i32> for RecordingBinder {
        fn bind_group(
            &self,
            ctx: &mut RowContext<'_, TestBackend, String>,
            group: &String,
            expanded: bool,
        ) {
            ctx.region(regions::TITLE);
            self.groups.lock().push((group.clone(), expanded));
        }

        fn bind_child(&self, ctx: &mut RowContext<'_, TestBackend, i32>, child: &i32) {
            ctx.region(regions::TITLE);
            self.children.lock().push(*child);
        }
    }

    struct ChangeRecorder {
        groups: Arc<Mutex<Vec<(String, bool)>>>,
        children: Arc<Mutex<Vec<(i32, bool)>>>,
    }

    impl EnhancedTwoLevelBinder<TestBackend, String, i32> for ChangeRecorder {
        fn bind_group(
            &self,
            _ctx: &mut RowContext<'_, TestBackend, String>,
            group: &String,
            _expanded: bool,
            changed: bool,
        ) {
            self.groups.lock().push((group.clone(), changed));
        }

        fn bind_child(
            &self,
            _ctx: &mut RowContext<'_, TestBackend, i32>,
            child: &i32,
            changed: bool,
        ) {
            self.children.lock().push((*child, changed));
        }
    }

    fn sample_store() -> Arc<GroupedStore<String, i32>> {
        Arc::new(GroupedStore::from_pairs(vec![
            ("fruit".to_string(), vec![1, 2]),
            ("veg".to_string(), vec![3]),
        ]))
    }

    fn plain_adapter(
        store: Arc<GroupedStore<String, i32>>,
    ) -> (
        TwoLevelAdapter<TestBackend, String, i32>,
        Arc<Mutex<Vec<(String, bool)>>>,
        Arc<Mutex<Vec<i32>>>,
    ) {
        let groups = Arc::new(Mutex::new(Vec::new()));
        let children = Arc::new(Mutex::new(Vec::new()));
        let binder = RecordingBinder {
            groups: groups.clone(),
            children: children.clone(),
        };
        let adapter = TwoLevelAdapter::new(store, GROUP_ROW, CHILD_ROW, binder);
        (adapter, groups, children)
    }

    #[test]
    fn test_counts_without_placeholder() {
        let (adapter, _, _) = plain_adapter(sample_store());

        assert_eq!(adapter.group_count(), 2);
        assert_eq!(adapter.child_count(0), 2);
        assert_eq!(adapter.child_count(1), 1);
        assert_eq!(adapter.child_count(9), 0); // unknown group
    }

    #[test]
    fn test_placeholder_adds_one_per_level() {
        let (adapter, _, _) = plain_adapter(sample_store());
        adapter.set_show_placeholder(true);

        assert_eq!(adapter.group_count(), 3);
        assert_eq!(adapter.group_kind(1), RowKind::Content);
        assert_eq!(adapter.group_kind(2), RowKind::Placeholder);

        assert_eq!(adapter.child_count(0), 3);
        assert_eq!(adapter.child_kind(0, 1), RowKind::Content);
        assert_eq!(adapter.child_kind(0, 2), RowKind::Placeholder);

        // The synthetic group shows exactly one child: the placeholder.
        assert_eq!(adapter.child_count(2), 1);
        assert_eq!(adapter.child_kind(2, 0), RowKind::Placeholder);
        assert_eq!(adapter.child_entry(2, 0), RowEntry::Placeholder);
    }

    #[test]
    fn test_toggle_reverses_exactly() {
        let (adapter, _, _) = plain_adapter(sample_store());

        adapter.set_show_placeholder(true);
        adapter.set_show_placeholder(false);

        assert_eq!(adapter.group_count(), 2);
        assert_eq!(adapter.child_count(0), 2);
        assert_eq!(adapter.group_kind(2), RowKind::Content);
    }

    #[test]
    fn test_realize_group_passes_expanded() {
        let (adapter, groups, _) = plain_adapter(sample_store());
        let mut backend = TestBackend::new();

        adapter.realize_group(&mut backend, 0, true, None, None).unwrap();
        adapter.realize_group(&mut backend, 1, false, None, None).unwrap();

        assert_eq!(
            *groups.lock(),
            vec![("fruit".to_string(), true), ("veg".to_string(), false)]
        );
    }

    #[test]
    fn test_realize_child_binds_value() {
        let (adapter, _, children) = plain_adapter(sample_store());
        let mut backend = TestBackend::new();

        let row = adapter.realize_child(&mut backend, 0, 1, None, None).unwrap();

        assert_eq!(*children.lock(), vec![2]);
        assert!(row.into_slot().unwrap().cache().was_bound_to(&2));
    }

    #[test]
    fn test_realize_placeholder_group_never_touches_cache() {
        let (adapter, groups, _) = plain_adapter(sample_store());
        adapter.set_show_placeholder(true);
        let mut backend = TestBackend::new();

        let row = adapter.realize_group(&mut backend, 2, false, None, None).unwrap();

        assert_eq!(row.kind(), RowKind::Placeholder);
        assert!(groups.lock().is_empty()); // bind hook skipped
        assert_eq!(backend.lookups(), 0);
    }

    #[test]
    fn test_out_of_range_realization_is_none() {
        let (adapter, _, _) = plain_adapter(sample_store());
        let mut backend = TestBackend::new();

        assert!(adapter.realize_group(&mut backend, 7, false, None, None).is_none());
        assert!(adapter.realize_child(&mut backend, 0, 7, None, None).is_none());
        assert!(adapter.realize_child(&mut backend, 7, 0, None, None).is_none());
    }

    #[test]
    fn test_store_mutation_invalidates_host() {
        let store = sample_store();
        let (adapter, _, _) = plain_adapter(store.clone());
        let fired = Arc::new(AtomicUsize::new(0));

        let count = fired.clone();
        adapter.invalidated().connect(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });

        store.insert_group("grain".to_string(), vec![7]);
        store.remove_group(&"fruit".to_string());

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_enhanced_reports_changed_on_new_binding() {
        let store = sample_store();
        let groups = Arc::new(Mutex::new(Vec::new()));
        let children = Arc::new(Mutex::new(Vec::new()));
        let adapter = EnhancedTwoLevelAdapter::new(
            store,
            GROUP_ROW,
            CHILD_ROW,
            ChangeRecorder {
                groups: groups.clone(),
                children: children.clone(),
            },
        );
        let mut backend = TestBackend::new();

        // First bind of a fresh container: changed.
        let row = adapter.realize_child(&mut backend, 0, 0, None, None).unwrap();
        // Same item rebound into the same container: unchanged.
        let row = adapter.realize_child(&mut backend, 0, 0, Some(row), None).unwrap();
        // Different item into the same container: changed.
        adapter.realize_child(&mut backend, 0, 1, Some(row), None).unwrap();

        assert_eq!(*children.lock(), vec![(1, true), (1, false), (2, true)]);
    }

    #[test]
    fn test_enhanced_group_change_detection() {
        let store = sample_store();
        let groups = Arc::new(Mutex::new(Vec::new()));
        let adapter = EnhancedTwoLevelAdapter::new(
            store,
            GROUP_ROW,
            CHILD_ROW,
            ChangeRecorder {
                groups: groups.clone(),
                children: Arc::new(Mutex::new(Vec::new())),
            },
        );
        let mut backend = TestBackend::new();

        let row = adapter.realize_group(&mut backend, 0, false, None, None).unwrap();
        let row = adapter.realize_group(&mut backend, 0, false, Some(row), None).unwrap();
        adapter.realize_group(&mut backend, 1, false, Some(row), None).unwrap();

        assert_eq!(
            *groups.lock(),
            vec![
                ("fruit".to_string(), true),
                ("fruit".to_string(), false),
                ("veg".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_enhanced_derefs_to_inner() {
        let store = sample_store();
        let adapter: EnhancedTwoLevelAdapter<TestBackend, String, i32> =
            EnhancedTwoLevelAdapter::new(
                store,
                GROUP_ROW,
                CHILD_ROW,
                ChangeRecorder {
                    groups: Arc::new(Mutex::new(Vec::new())),
                    children: Arc::new(Mutex::new(Vec::new())),
                },
            );

        adapter.set_show_placeholder(true); // via Deref
        assert_eq!(adapter.group_count(), 3);
        assert!(adapter.child_selectable(0, 0));
    }
}
