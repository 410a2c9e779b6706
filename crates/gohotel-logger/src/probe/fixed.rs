//! Probe with fixed answers

use parking_lot::RwLock;

use super::traits::{Platform, PlatformProbe, ProbeError, ProbeResult};
use crate::types::DeviceInfo;

/// A probe that returns whatever it was configured with
///
/// Each lookup can be made to fail independently, which is how the
/// "Unknown" fallbacks are exercised.
#[derive(Debug)]
pub struct StaticProbe {
    platform: Option<Platform>,
    page: RwLock<Option<String>>,
    device: Option<DeviceInfo>,
    page_fails: bool,
}

impl Default for StaticProbe {
    fn default() -> Self {
        Self::new(Platform::Unknown)
    }
}

impl StaticProbe {
    /// A probe for `platform` with no page and empty device info
    pub fn new(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
            page: RwLock::new(None),
            device: Some(DeviceInfo::default()),
            page_fails: false,
        }
    }

    /// A probe whose every lookup fails
    pub fn failing() -> Self {
        Self {
            platform: None,
            page: RwLock::new(None),
            device: None,
            page_fails: true,
        }
    }

    pub fn with_page(self, page: impl Into<String>) -> Self {
        *self.page.write() = Some(page.into());
        self
    }

    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.device = Some(device);
        self
    }

    /// Change the reported page
    pub fn set_page(&self, page: Option<String>) {
        *self.page.write() = page;
    }
}

impl PlatformProbe for StaticProbe {
    fn platform(&self) -> ProbeResult<Platform> {
        self.platform
            .clone()
            .ok_or_else(|| ProbeError::Unsupported("platform".to_string()))
    }

    fn current_page(&self) -> ProbeResult<Option<String>> {
        if self.page_fails {
            return Err(ProbeError::Failed("page stack unavailable".to_string()));
        }
        Ok(self.page.read().clone())
    }

    fn device_info(&self) -> ProbeResult<DeviceInfo> {
        self.device
            .clone()
            .ok_or_else(|| ProbeError::Failed("system info unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_probe() {
        let probe = StaticProbe::new(Platform::WeChat).with_page("pages/index/index");
        assert_eq!(probe.platform().unwrap(), Platform::WeChat);
        assert_eq!(probe.current_page().unwrap().as_deref(), Some("pages/index/index"));

        probe.set_page(None);
        assert_eq!(probe.current_page().unwrap(), None);
    }

    #[test]
    fn test_failing_probe() {
        let probe = StaticProbe::failing();
        assert!(probe.platform().is_err());
        assert!(probe.current_page().is_err());
        assert!(probe.device_info().is_err());
    }
}
