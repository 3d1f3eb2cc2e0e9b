//! The three adapter surfaces and the strategies they share.
//!
//! Each adapter composes a store (the data), a [`PlaceholderGate`] (the
//! trailing "loading more" row), slot acquisition from [`crate::recycle`]
//! (container reuse), and the position-resolution helpers in this module.
//! There is no adapter hierarchy; the surfaces are independent types
//! implementing their respective protocol traits from [`crate::host`].
//!
//! # Position Resolution
//!
//! A position resolves to exactly one [`RowEntry`], computed once per query
//! by [`entry_at`]:
//!
//! - `Content(item)` while the position indexes into the store;
//! - `Placeholder` for the single trailing position while the placeholder
//!   flag is on;
//! - `OutOfRange` otherwise. A well-behaved host never queries such a
//!   position, but between a mutation and the host's re-query its view of
//!   the count is transiently stale, so realization answers `None` instead
//!   of failing.
//!
//! [`kind_at`] derives the row type from the same rule, so the type a host
//! pools by and the content it receives can never disagree.

mod linear;
mod paged;
mod two_level;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use trellis_core::Signal;
use trellis_core::logging::targets;

use crate::host::ViewBackend;
use crate::recycle::{RowContext, RowSlot};

pub use linear::LinearAdapter;
pub use paged::PagedAdapter;
pub use two_level::{EnhancedTwoLevelAdapter, TwoLevelAdapter};

/// The two row types every surface produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RowKind {
    /// A row backed by a domain item.
    Content = 0,
    /// The synthetic trailing "loading more" row.
    Placeholder = 1,
}

impl RowKind {
    /// The wire value of this kind (`Content` = 0, `Placeholder` = 1).
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// What one position resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEntry<T> {
    /// A real row with its item.
    Content(T),
    /// The synthetic trailing loading row.
    Placeholder,
    /// A position beyond the surface; tolerated, never realized.
    OutOfRange,
}

/// Total addressable positions for a store of `len` items.
pub fn padded_count(len: usize, placeholder: bool) -> usize {
    len + placeholder as usize
}

/// The row kind at `position` for a store of `len` items.
pub fn kind_at(len: usize, placeholder: bool, position: usize) -> RowKind {
    if placeholder && position >= len {
        RowKind::Placeholder
    } else {
        RowKind::Content
    }
}

/// Resolves `position` against a snapshot of the store.
pub fn entry_at<T: Clone>(items: &[T], placeholder: bool, position: usize) -> RowEntry<T> {
    match items.get(position) {
        Some(item) => RowEntry::Content(item.clone()),
        None if placeholder && position == items.len() => RowEntry::Placeholder,
        None => RowEntry::OutOfRange,
    }
}

/// A realized row as handed to (and back from) the host.
///
/// Content rows carry their slot so the region cache survives recycling;
/// placeholder rows are a bare spinner container and never own a cache.
pub enum RealizedRow<V: ViewBackend, T> {
    /// A bound content row.
    Content(RowSlot<V, T>),
    /// The loading placeholder.
    Placeholder(V::Container),
}

impl<V: ViewBackend, T> RealizedRow<V, T> {
    /// The container handle for attaching/detaching.
    pub fn container(&self) -> &V::Container {
        match self {
            Self::Content(slot) => slot.container(),
            Self::Placeholder(container) => container,
        }
    }

    /// The kind of this row.
    pub fn kind(&self) -> RowKind {
        match self {
            Self::Content(_) => RowKind::Content,
            Self::Placeholder(_) => RowKind::Placeholder,
        }
    }

    /// Extracts the slot of a content row.
    pub fn into_slot(self) -> Option<RowSlot<V, T>> {
        match self {
            Self::Content(slot) => Some(slot),
            Self::Placeholder(_) => None,
        }
    }

    /// Extracts the bare container of a placeholder row.
    pub fn into_placeholder(self) -> Option<V::Container> {
        match self {
            Self::Content(_) => None,
            Self::Placeholder(container) => Some(container),
        }
    }
}

/// The shared "show loading" strategy: a flag plus the adapter's
/// `invalidated` signal, flipped together.
pub(crate) struct PlaceholderGate {
    show: AtomicBool,
    invalidated: Arc<Signal<()>>,
}

impl PlaceholderGate {
    pub(crate) fn new(invalidated: Arc<Signal<()>>) -> Self {
        Self {
            show: AtomicBool::new(false),
            invalidated,
        }
    }

    pub(crate) fn is_shown(&self) -> bool {
        self.show.load(Ordering::SeqCst)
    }

    /// Sets the flag; an unchanged value is a no-op, otherwise the host is
    /// invalidated.
    pub(crate) fn set(&self, show: bool) {
        if self.show.swap(show, Ordering::SeqCst) == show {
            return;
        }
        tracing::debug!(target: targets::ADAPTER, show, "placeholder toggled");
        self.invalidated.emit(());
    }
}

/// Hook that binds a domain item into a content row.
///
/// Implement the trait for a named binder, or pass a closure; both work:
///
/// ```ignore
/// let adapter = LinearAdapter::new(store, ROW_LAYOUT, |ctx: &mut RowContext<'_, B, Track>, item: &Track| {
///     let title = ctx.region(regions::TITLE);
///     // ... write item fields ...
/// });
/// ```
///
/// All visual state must be written synchronously before the hook returns;
/// there is no asynchronous completion.
pub trait RowBinder<V: ViewBackend, T>: Send + Sync {
    /// Adapts the row's view to `item` through the context.
    fn bind(&self, ctx: &mut RowContext<'_, V, T>, item: &T);
}

impl<V: ViewBackend, T, F> RowBinder<V, T> for F
where
    F: Fn(&mut RowContext<'_, V, T>, &T) + Send + Sync,
{
    fn bind(&self, ctx: &mut RowContext<'_, V, T>, item: &T) {
        self(ctx, item)
    }
}

/// Hook pair for the two-level surface: one bind per level.
pub trait TwoLevelBinder<V: ViewBackend, G, C>: Send + Sync {
    /// Adapts a group row to `group`. `expanded` is the host's current
    /// expansion state for the group.
    fn bind_group(&self, ctx: &mut RowContext<'_, V, G>, group: &G, expanded: bool);

    /// Adapts a child row to `child`.
    fn bind_child(&self, ctx: &mut RowContext<'_, V, C>, child: &C);

    /// Whether the child row at the given position pair responds to
    /// selection.
    fn child_selectable(&self, _group_position: usize, _child_position: usize) -> bool {
        true
    }
}

/// [`TwoLevelBinder`] with identity-change detection.
///
/// `changed` is `true` when the slot was previously bound to a different
/// item (or to nothing), a cheap heuristic for resetting animations or
/// transient view state only when the row really moved to new data.
pub trait EnhancedTwoLevelBinder<V: ViewBackend, G, C>: Send + Sync {
    /// Adapts a group row to `group`.
    fn bind_group(&self, ctx: &mut RowContext<'_, V, G>, group: &G, expanded: bool, changed: bool);

    /// Adapts a child row to `child`.
    fn bind_child(&self, ctx: &mut RowContext<'_, V, C>, child: &C, changed: bool);

    /// Whether the child row at the given position pair responds to
    /// selection.
    fn child_selectable(&self, _group_position: usize, _child_position: usize) -> bool {
        true
    }
}
