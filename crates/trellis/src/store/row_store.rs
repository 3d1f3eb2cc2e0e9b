//! Ordered linear store backing the flat-list and paged surfaces.

use parking_lot::RwLock;

use trellis_core::logging::targets;

use super::signals::StoreSignals;

/// An ordered, mutable sequence of domain items with positional CRUD and
/// automatic re-render signaling.
///
/// Items are owned by the store; constructing from existing data moves or
/// copies it, so later mutation of the caller's collection can never
/// desynchronize the store. All mutators take `&self`: the store uses a
/// read/write lock internally and is safe to share behind an `Arc` between
/// an adapter and application code, though the framework contract is strict
/// sequential access from the host's UI context.
///
/// # Signaling
///
/// Every mutation emits exactly one [`StoreEvent`] on
/// [`signals().changed`](Self::signals), with three exceptions, all
/// deliberate: empty additive calls ([`extend`](Self::extend),
/// [`insert_all`](Self::insert_all)) are silent no-ops, a failed
/// [`replace`](Self::replace) is a silent no-op, and [`clear`](Self::clear)
/// is silent so multiple mutations can be batched before one
/// [`clear_and_notify`](Self::clear_and_notify) or other signaling call.
///
/// # Example
///
/// ```
/// use trellis::store::RowStore;
///
/// let store = RowStore::from_items(vec!["a", "b", "c"]);
/// store.signals().changed.connect(|event| {
///     println!("changed: {:?}", event);
/// });
///
/// store.push("d");
/// assert!(store.remove_item(&"b"));
/// assert_eq!(store.snapshot(), vec!["a", "c", "d"]);
/// ```
///
/// [`StoreEvent`]: super::StoreEvent
pub struct RowStore<T> {
    items: RwLock<Vec<T>>,
    signals: StoreSignals,
}

impl<T> RowStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            signals: StoreSignals::new(),
        }
    }

    /// Creates a store owning the given items.
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            signals: StoreSignals::new(),
        }
    }

    /// Returns the signals for this store.
    pub fn signals(&self) -> &StoreSignals {
        &self.signals
    }

    /// Returns the number of items in the store.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a read guard over the items.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Appends an item to the end of the store.
    pub fn push(&self, item: T) {
        let row = {
            let mut items = self.items.write();
            items.push(item);
            items.len() - 1
        };
        self.signals.notify_inserted(row, row);
    }

    /// Inserts an item at the specified index.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&self, index: usize, item: T) {
        self.items.write().insert(index, item);
        self.signals.notify_inserted(index, index);
    }

    /// Appends all items from an iterator.
    ///
    /// An empty iterator is a silent no-op: nothing changes and no signal
    /// is emitted.
    pub fn extend(&self, items: impl IntoIterator<Item = T>) {
        let new: Vec<T> = items.into_iter().collect();
        if new.is_empty() {
            tracing::trace!(target: targets::STORE, "extend with no items, ignoring");
            return;
        }
        let (first, last) = {
            let mut items = self.items.write();
            let first = items.len();
            items.extend(new);
            (first, items.len() - 1)
        };
        self.signals.notify_inserted(first, last);
    }

    /// Inserts all items from an iterator at the specified index.
    ///
    /// An empty iterator is a silent no-op.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_all(&self, index: usize, items: impl IntoIterator<Item = T>) {
        let new: Vec<T> = items.into_iter().collect();
        if new.is_empty() {
            tracing::trace!(target: targets::STORE, "insert_all with no items, ignoring");
            return;
        }
        let last = index + new.len() - 1;
        {
            let mut items = self.items.write();
            assert!(
                index <= items.len(),
                "insert_all index {index} out of range for store of len {}",
                items.len()
            );
            items.splice(index..index, new);
        }
        self.signals.notify_inserted(index, last);
    }

    /// Replaces the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn replace_at(&self, index: usize, item: T) {
        {
            let mut items = self.items.write();
            items[index] = item;
        }
        self.signals.notify_replaced(index);
    }

    /// Removes and returns the item at the specified index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. The store is unchanged when this panics.
    pub fn remove(&self, index: usize) -> T {
        let removed = self.items.write().remove(index);
        self.signals.notify_removed(index, index);
        removed
    }

    /// Replaces all items in the store, signaling exactly once.
    ///
    /// The store afterwards is observably identical to a fresh store
    /// populated with `items`.
    pub fn set_items(&self, items: Vec<T>) {
        *self.items.write() = items;
        self.signals.notify_reset();
    }

    /// Removes all items *without* signaling.
    ///
    /// Use this to batch further mutations before a single signaling call;
    /// use [`clear_and_notify`](Self::clear_and_notify) otherwise.
    pub fn clear(&self) {
        self.items.write().clear();
    }

    /// Removes all items and signals.
    pub fn clear_and_notify(&self) {
        self.clear();
        self.signals.notify_reset();
    }

    /// Sorts the items with the provided comparator and signals.
    pub fn sort_by<F>(&self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.items.write().sort_by(compare);
        self.signals.notify_reset();
    }

    /// Provides mutable access to the item at `index` via a closure,
    /// signaling afterwards. Returns `None` (and stays silent) if `index`
    /// is out of range.
    pub fn modify<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = {
            let mut items = self.items.write();
            if index >= items.len() {
                return None;
            }
            f(&mut items[index])
        };
        self.signals.notify_replaced(index);
        Some(result)
    }
}

impl<T: PartialEq> RowStore<T> {
    /// Replaces the first item equal to `old` with `new`.
    ///
    /// Returns `true` if a replacement happened. An absent `old` is a
    /// silent no-op returning `false`. Duplicate-equal items resolve to
    /// the first match; disambiguating duplicates is the caller's
    /// responsibility.
    pub fn replace(&self, old: &T, new: T) -> bool {
        let index = {
            let mut items = self.items.write();
            match items.iter().position(|it| it == old) {
                Some(index) => {
                    items[index] = new;
                    index
                }
                None => {
                    tracing::debug!(target: targets::STORE, "replace target not found, ignoring");
                    return false;
                }
            }
        };
        self.signals.notify_replaced(index);
        true
    }

    /// Removes the first item equal to `item`.
    ///
    /// Returns `true` if a removal happened; an absent item is a silent
    /// no-op returning `false`.
    pub fn remove_item(&self, item: &T) -> bool {
        let index = {
            let mut items = self.items.write();
            match items.iter().position(|it| it == item) {
                Some(index) => {
                    items.remove(index);
                    index
                }
                None => {
                    tracing::debug!(target: targets::STORE, "remove target not found, ignoring");
                    return false;
                }
            }
        };
        self.signals.notify_removed(index, index);
        true
    }

    /// Whether the store contains an item equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.items.read().iter().any(|it| it == item)
    }
}

impl<T: Clone> RowStore<T> {
    /// Creates a store by copying the given slice.
    pub fn from_slice(items: &[T]) -> Self {
        Self::from_items(items.to_vec())
    }

    /// Returns a clone of the item at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a copy of all items.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T> Default for RowStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(RowStore<String>: Send, Sync);
