//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Store mutations log at debug level, recycling decisions and signal
//! emissions at trace level. Use the constants in [`targets`] with `tracing`
//! directives (e.g. `RUST_LOG=trellis::store=debug`) to filter by subsystem.

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "trellis_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Collection store target.
    pub const STORE: &str = "trellis::store";
    /// Adapter surface target.
    pub const ADAPTER: &str = "trellis::adapter";
    /// Container/slot recycling target.
    pub const RECYCLE: &str = "trellis::recycle";
}
