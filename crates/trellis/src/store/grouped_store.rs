//! Two-level store backing the expandable-list surface.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;

use trellis_core::logging::targets;

use super::signals::StoreSignals;

/// The two structures that must stay in agreement.
struct GroupedInner<G, C> {
    /// Group keys, in display order.
    groups: Vec<G>,
    /// Child sequences, keyed by group.
    children: HashMap<G, Vec<C>>,
}

impl<G: Eq + Hash, C> GroupedInner<G, C> {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            children: HashMap::new(),
        }
    }

    /// Invariant: the group sequence and the child-map key set agree:
    /// no orphaned keys, no group present in one but not the other.
    fn invariant_holds(&self) -> bool {
        self.groups.len() == self.children.len()
            && self.groups.iter().all(|g| self.children.contains_key(g))
    }
}

/// An ordered sequence of group keys, each mapped to an ordered sequence of
/// child items, with automatic re-render signaling.
///
/// Group keys double as map keys, so `G` needs `Eq + Hash + Clone`; value
/// equality is also what group-keyed operations resolve against, which makes
/// duplicate-equal groups a caller contract violation (the structure itself
/// forbids them: inserting an equal group replaces its children instead of
/// duplicating the key).
///
/// Every mutation maintains the structural invariant that the group
/// sequence and the child-map key set agree exactly, and
/// [`remove_group`](Self::remove_group) removes the key and its child
/// sequence atomically.
///
/// # Signaling
///
/// As for [`RowStore`](super::RowStore): one event per mutation, except the
/// silent [`clear`](Self::clear), empty [`extend_groups`](Self::extend_groups),
/// and group-keyed operations on an unknown group, which warn and do
/// nothing. Child-level mutations signal at group granularity.
pub struct GroupedStore<G, C> {
    inner: RwLock<GroupedInner<G, C>>,
    signals: StoreSignals,
}

impl<G, C> GroupedStore<G, C> {
    /// Returns the signals for this store.
    pub fn signals(&self) -> &StoreSignals {
        &self.signals
    }
}

impl<G: Eq + Hash + Clone, C> GroupedStore<G, C> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(GroupedInner::new()),
            signals: StoreSignals::new(),
        }
    }

    /// Creates a store from `(group, children)` pairs, preserving pair
    /// order. A repeated group key keeps its first position and takes the
    /// later children.
    pub fn from_pairs(pairs: Vec<(G, Vec<C>)>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            for (group, children) in pairs {
                Self::put(&mut inner, group, children);
            }
            debug_assert!(inner.invariant_holds());
        }
        store
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.inner.read().groups.len()
    }

    /// Returns `true` if the store has no groups.
    pub fn is_empty(&self) -> bool {
        self.inner.read().groups.is_empty()
    }

    /// A copy of the group key at `index`, or `None` past the end.
    pub fn group(&self, index: usize) -> Option<G> {
        self.inner.read().groups.get(index).cloned()
    }

    /// A copy of the group sequence.
    pub fn groups(&self) -> Vec<G> {
        self.inner.read().groups.clone()
    }

    /// Whether the store contains a group equal to `group`.
    pub fn contains_group(&self, group: &G) -> bool {
        self.inner.read().children.contains_key(group)
    }

    /// Number of children under the group at `index`; 0 for an
    /// out-of-range index.
    pub fn child_count(&self, index: usize) -> usize {
        let inner = self.inner.read();
        inner
            .groups
            .get(index)
            .and_then(|g| inner.children.get(g))
            .map_or(0, Vec::len)
    }

    /// Inserts a group with its children, or replaces the children of an
    /// already-present equal group (keeping its position).
    pub fn insert_group(&self, group: G, children: Vec<C>) {
        let (index, replaced) = {
            let mut inner = self.inner.write();
            let result = Self::put(&mut inner, group, children);
            debug_assert!(inner.invariant_holds());
            result
        };
        if replaced {
            self.signals.notify_replaced(index);
        } else {
            self.signals.notify_inserted(index, index);
        }
    }

    /// Inserts all `(group, children)` pairs, preserving pair order and
    /// signaling once. An empty collection is a silent no-op.
    pub fn extend_groups(&self, pairs: Vec<(G, Vec<C>)>) {
        if pairs.is_empty() {
            tracing::trace!(target: targets::STORE, "extend_groups with no pairs, ignoring");
            return;
        }
        let (before, after) = {
            let mut inner = self.inner.write();
            let before = inner.groups.len();
            for (group, children) in pairs {
                Self::put(&mut inner, group, children);
            }
            debug_assert!(inner.invariant_holds());
            (before, inner.groups.len())
        };
        if after > before {
            self.signals.notify_inserted(before, after - 1);
        } else {
            // Every pair replaced an existing group's children.
            self.signals.notify_reset();
        }
    }

    /// Removes a group and its child sequence atomically.
    ///
    /// Returns `true` if a removal happened; an unknown group is a silent
    /// no-op returning `false`.
    pub fn remove_group(&self, group: &G) -> bool {
        let index = {
            let mut inner = self.inner.write();
            match inner.groups.iter().position(|g| g == group) {
                Some(index) => {
                    inner.groups.remove(index);
                    inner.children.remove(group);
                    debug_assert!(inner.invariant_holds());
                    index
                }
                None => {
                    tracing::debug!(target: targets::STORE, "remove_group target not found, ignoring");
                    return false;
                }
            }
        };
        self.signals.notify_removed(index, index);
        true
    }

    /// Removes the group at `index` and its child sequence atomically,
    /// returning the group key.
    ///
    /// # Panics
    ///
    /// Panics if `index >= group_count()`. The store is unchanged when this
    /// panics.
    pub fn remove_group_at(&self, index: usize) -> G {
        let group = {
            let mut inner = self.inner.write();
            let group = inner.groups.remove(index);
            inner.children.remove(&group);
            debug_assert!(inner.invariant_holds());
            group
        };
        self.signals.notify_removed(index, index);
        group
    }

    /// Replaces the entire contents from `(group, children)` pairs,
    /// signaling exactly once.
    pub fn replace_all(&self, pairs: Vec<(G, Vec<C>)>) {
        {
            let mut inner = self.inner.write();
            inner.groups.clear();
            inner.children.clear();
            for (group, children) in pairs {
                Self::put(&mut inner, group, children);
            }
            debug_assert!(inner.invariant_holds());
        }
        self.signals.notify_reset();
    }

    /// Removes all groups and children *without* signaling.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.groups.clear();
        inner.children.clear();
    }

    /// Removes all groups and children and signals.
    pub fn clear_and_notify(&self) {
        self.clear();
        self.signals.notify_reset();
    }

    /// Appends a child under `group`. An unknown group is a warned no-op.
    pub fn push_child(&self, group: &G, child: C) {
        let index = {
            let mut inner = self.inner.write();
            let Some(index) = inner.groups.iter().position(|g| g == group) else {
                tracing::warn!(target: targets::STORE, "push_child on unknown group, ignoring");
                return;
            };
            inner
                .children
                .get_mut(group)
                .expect("group sequence and child map agree")
                .push(child);
            index
        };
        self.signals.notify_replaced(index);
    }

    /// Appends all children from an iterator under `group`. An empty
    /// iterator or an unknown group is a silent no-op.
    pub fn extend_children(&self, group: &G, children: impl IntoIterator<Item = C>) {
        let new: Vec<C> = children.into_iter().collect();
        if new.is_empty() {
            tracing::trace!(target: targets::STORE, "extend_children with no items, ignoring");
            return;
        }
        let index = {
            let mut inner = self.inner.write();
            let Some(index) = inner.groups.iter().position(|g| g == group) else {
                tracing::warn!(target: targets::STORE, "extend_children on unknown group, ignoring");
                return;
            };
            inner
                .children
                .get_mut(group)
                .expect("group sequence and child map agree")
                .extend(new);
            index
        };
        self.signals.notify_replaced(index);
    }

    /// Removes and returns the child at `child_index` under `group`.
    /// Returns `None` for an unknown group.
    ///
    /// # Panics
    ///
    /// Panics if the group is present but `child_index` is out of range.
    pub fn remove_child(&self, group: &G, child_index: usize) -> Option<C> {
        let (index, child) = {
            let mut inner = self.inner.write();
            let Some(index) = inner.groups.iter().position(|g| g == group) else {
                tracing::debug!(target: targets::STORE, "remove_child on unknown group, ignoring");
                return None;
            };
            let child = inner
                .children
                .get_mut(group)
                .expect("group sequence and child map agree")
                .remove(child_index);
            (index, child)
        };
        self.signals.notify_replaced(index);
        Some(child)
    }

    /// Inserts or replaces under an exclusive lock; returns the group's
    /// index and whether an existing group was replaced.
    fn put(inner: &mut GroupedInner<G, C>, group: G, children: Vec<C>) -> (usize, bool) {
        match inner.groups.iter().position(|g| *g == group) {
            Some(index) => {
                inner.children.insert(group, children);
                (index, true)
            }
            None => {
                inner.groups.push(group.clone());
                inner.children.insert(group, children);
                (inner.groups.len() - 1, false)
            }
        }
    }
}

impl<G: Eq + Hash + Clone, C: Clone> GroupedStore<G, C> {
    /// A copy of the children under `group`, or `None` for an unknown group.
    pub fn children_of(&self, group: &G) -> Option<Vec<C>> {
        self.inner.read().children.get(group).cloned()
    }

    /// A copy of the child at `child_index` under the group at
    /// `group_index`, or `None` if either index is out of range.
    pub fn child(&self, group_index: usize, child_index: usize) -> Option<C> {
        let inner = self.inner.read();
        inner
            .groups
            .get(group_index)
            .and_then(|g| inner.children.get(g))
            .and_then(|children| children.get(child_index))
            .cloned()
    }
}

impl<G: Eq + Hash + Clone, C> Default for GroupedStore<G, C> {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(GroupedStore<String, String>: Send, Sync);
