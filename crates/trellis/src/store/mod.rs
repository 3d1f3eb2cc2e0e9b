//! Ordered, mutable collection stores with re-render signaling.
//!
//! Stores own the domain data behind an adapter. Every mutating operation
//! (except the deliberately silent [`clear`](RowStore::clear) variants and
//! empty additive no-ops) emits exactly one [`StoreEvent`] on the store's
//! `changed` signal; the owning adapter forwards that into its own
//! `invalidated` signal so the host re-queries everything. Event payloads
//! are advisory only; consumers must not diff against them.
//!
//! [`RowStore`] backs the linear and paged surfaces; [`GroupedStore`] backs
//! the two-level surface.

mod grouped_store;
mod row_store;
mod signals;

pub use grouped_store::GroupedStore;
pub use row_store::RowStore;
pub use signals::{StoreEvent, StoreSignals};
