//! Container recycling: per-row lookup caches and reusable slots.
//!
//! A [`RowCache`] is the association a reusable container carries for its
//! whole life: resolved sub-element handles keyed by [`RegionId`], plus the
//! domain item the container is currently bound to. A [`RowSlot`] pairs a
//! container with its cache; [`RowSlot::acquire`] is the recycling entry
//! point that either inflates a fresh container or rebinds a recycled one
//! with its cache intact. [`RowContext`] is the borrowed view of a slot
//! handed to application bind hooks.
//!
//! [`RegionId`]: crate::host::RegionId

mod cache;
mod slots;

pub use cache::RowCache;
pub use slots::{RowContext, RowSlot};
