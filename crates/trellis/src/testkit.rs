//! Scripted fake backend for adapter tests.
//!
//! `TestBackend` fabricates container and region handles and records every
//! inflation, region lookup, and placeholder construction, so tests can
//! assert recycling behavior (no re-inflation, no repeat lookups) instead of
//! just final state.

use std::sync::Once;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::host::{LayoutId, RegionId, ViewBackend};

/// Installs a fmt subscriber once, so tests print framework logs when run
/// with `RUST_LOG` set.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Layout ids used across adapter tests.
pub const LIST_ROW: LayoutId = LayoutId::new(10);
/// Group-row layout for two-level tests.
pub const GROUP_ROW: LayoutId = LayoutId::new(20);
/// Child-row layout for two-level tests.
pub const CHILD_ROW: LayoutId = LayoutId::new(21);
/// Page layout for paged tests.
pub const PAGE_LAYOUT: LayoutId = LayoutId::new(30);

/// Region ids used across adapter tests.
pub mod regions {
    use crate::host::RegionId;

    pub const TITLE: RegionId = RegionId::new(1);
    pub const SUBTITLE: RegionId = RegionId::new(2);
}

/// A fabricated container handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestContainer {
    /// Unique per inflation.
    pub id: u32,
    /// The layout it was inflated from; `None` for the spinner placeholder.
    pub layout: Option<LayoutId>,
}

/// A fabricated sub-element handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRegion {
    pub container: u32,
    pub region: RegionId,
}

/// Backend that fabricates handles and counts what was asked of it.
pub struct TestBackend {
    next_id: AtomicU32,
    inflated: AtomicUsize,
    placeholders: AtomicUsize,
    lookups: Mutex<Vec<(u32, RegionId)>>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU32::new(1),
            inflated: AtomicUsize::new(0),
            placeholders: AtomicUsize::new(0),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Containers inflated from a layout so far.
    pub fn inflated(&self) -> usize {
        self.inflated.load(Ordering::SeqCst)
    }

    /// Placeholder containers built so far.
    pub fn placeholders(&self) -> usize {
        self.placeholders.load(Ordering::SeqCst)
    }

    /// Region lookups performed so far.
    pub fn lookups(&self) -> usize {
        self.lookups.lock().len()
    }

    fn next_container(&self, layout: Option<LayoutId>) -> TestContainer {
        TestContainer {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            layout,
        }
    }
}

impl ViewBackend for TestBackend {
    type Container = TestContainer;
    type Region = TestRegion;

    fn inflate(&mut self, layout: LayoutId, _parent: Option<&TestContainer>) -> TestContainer {
        self.inflated.fetch_add(1, Ordering::SeqCst);
        self.next_container(Some(layout))
    }

    fn resolve_region(&self, container: &TestContainer, region: RegionId) -> TestRegion {
        self.lookups.lock().push((container.id, region));
        TestRegion {
            container: container.id,
            region,
        }
    }

    fn placeholder(&mut self) -> TestContainer {
        self.placeholders.fetch_add(1, Ordering::SeqCst);
        self.next_container(None)
    }
}
