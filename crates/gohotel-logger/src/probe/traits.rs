//! Environment introspection trait

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::DeviceInfo;

/// Client platform the logger runs on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Mobile web (H5 build)
    H5,
    /// WeChat mini program
    WeChat,
    /// Alipay mini program
    Alipay,
    /// Packaged mobile app
    App,
    /// Native desktop or server process
    Native,
    /// Anything else, by name
    Other(String),
    Unknown,
}

impl Platform {
    pub fn label(&self) -> &str {
        match self {
            Platform::H5 => "H5",
            Platform::WeChat => "WeChat Mini Program",
            Platform::Alipay => "Alipay Mini Program",
            Platform::App => "App",
            Platform::Native => "Native",
            Platform::Other(name) => name,
            Platform::Unknown => crate::types::UNKNOWN,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Errors raised by environment lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Lookup not supported: {0}")]
    Unsupported(String),

    #[error("Lookup failed: {0}")]
    Failed(String),
}

pub type ProbeResult<T> = Result<T, ProbeError>;

/// Source of the environment context stamped onto each entry
///
/// Every lookup may fail on its own; the logger falls back to `"Unknown"`
/// (or an empty [`DeviceInfo`]) for that field and carries on.
///
/// Implementations:
/// - `HostProbe`: the current process and an app-maintained page stack
/// - `StaticProbe`: fixed answers, for tests and embedding hosts
pub trait PlatformProbe: Send + Sync {
    /// Identify the platform
    ///
    /// Called once when the logger is built.
    fn platform(&self) -> ProbeResult<Platform>;

    /// Route of the page currently on screen, if any
    fn current_page(&self) -> ProbeResult<Option<String>>;

    /// Device and system description
    fn device_info(&self) -> ProbeResult<DeviceInfo>;
}

/// Type alias for an Arc-wrapped probe
pub type SharedProbe = Arc<dyn PlatformProbe>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_labels() {
        assert_eq!(Platform::H5.to_string(), "H5");
        assert_eq!(Platform::Other("Kiosk".to_string()).to_string(), "Kiosk");
        assert_eq!(Platform::Unknown.to_string(), "Unknown");
        assert_eq!(serde_json::to_string(&Platform::App).unwrap(), "\"App\"");
    }
}
