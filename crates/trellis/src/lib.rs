//! Trellis - a view-recycling adapter layer for retained-mode UI hosts.
//!
//! Trellis sits between an application's data and a host toolkit's
//! scrollable containers (flat lists, two-level expandable lists, paged
//! carousels). The application supplies only "what a row looks like given an
//! item"; Trellis supplies container reuse, per-row sub-element lookup
//! caching, ordered CRUD on the backing collection with automatic re-render
//! signaling, and a built-in trailing "loading more" placeholder row.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐      ┌──────────────┐      ┌─────────────┐
//! │    Store    │─────>│   Adapter    │─────>│    Host     │
//! │  (RowStore, │ chgd │  (Linear,    │ inv. │  (Linear/   │
//! │   Grouped)  │      │   TwoLevel,  │      │   TwoLevel/ │
//! └─────────────┘      │   Paged)     │      │   Paged     │
//!                      └──────┬───────┘      │   Surface)  │
//!                             │ bind         └──────┬──────┘
//!                      ┌──────▼───────┐             │ recycle
//!                      │  RowContext  │      ┌──────▼──────┐
//!                      │  / RowCache  │<─────│   RowSlot   │
//!                      └──────────────┘      └─────────────┘
//! ```
//!
//! The host drives an adapter through its surface protocol (counts, row
//! kinds, realization); the adapter resolves each position against its
//! store, acquires a recycled or fresh [`RowSlot`](recycle::RowSlot), binds
//! the item, and invokes the application's bind hook with a
//! [`RowContext`](recycle::RowContext). Mutations flow the other way: the
//! store signals the adapter, the adapter invalidates the host, the host
//! re-queries.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trellis::adapter::LinearAdapter;
//! use trellis::host::{LayoutId, LinearSurface, RegionId};
//! use trellis::recycle::RowContext;
//! use trellis::store::RowStore;
//! # use trellis::host::ViewBackend;
//! # struct NullBackend;
//! # impl ViewBackend for NullBackend {
//! #     type Container = u32;
//! #     type Region = u32;
//! #     fn inflate(&mut self, _: LayoutId, _: Option<&u32>) -> u32 { 0 }
//! #     fn resolve_region(&self, _: &u32, _: RegionId) -> u32 { 0 }
//! #     fn placeholder(&mut self) -> u32 { 0 }
//! # }
//!
//! const CONTACT_ROW: LayoutId = LayoutId::new(1);
//! const NAME: RegionId = RegionId::new(1);
//!
//! let store = Arc::new(RowStore::from_items(vec!["Ada", "Grace"]));
//! let adapter: LinearAdapter<NullBackend, &str> = LinearAdapter::new(
//!     store.clone(),
//!     CONTACT_ROW,
//!     |ctx: &mut RowContext<'_, NullBackend, &str>, _item: &&str| {
//!         let _name_element = ctx.region(NAME);
//!         // ... write the item into the element ...
//!     },
//! );
//!
//! adapter.invalidated().connect(|_| { /* host refresh */ });
//! store.push("Edsger"); // host is invalidated automatically
//! assert_eq!(adapter.count(), 3);
//! ```
//!
//! Signals come from [`trellis-core`](trellis_core), re-exported here.

pub mod adapter;
pub mod host;
pub mod recycle;
pub mod store;

#[cfg(test)]
pub(crate) mod testkit;

pub use trellis_core::{ConnectionGuard, ConnectionId, Signal, logging};
