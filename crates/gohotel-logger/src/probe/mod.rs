//! Environment introspection
//!
//! The logger asks a `PlatformProbe` for the platform (once, at build time),
//! the current page and device details (per entry / per report).

mod traits;
mod host;
mod fixed;

pub use traits::{Platform, PlatformProbe, ProbeError, ProbeResult, SharedProbe};
pub use host::HostProbe;
pub use fixed::StaticProbe;
