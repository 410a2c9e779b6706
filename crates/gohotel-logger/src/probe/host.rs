//! Probe for the current host process

use parking_lot::RwLock;

use super::traits::{Platform, PlatformProbe, ProbeResult};
use crate::types::DeviceInfo;

/// Probe describing the process the logger runs in
///
/// Device details come from the compile target and the `LANG` environment
/// variable. The host application keeps the page stack current by calling
/// [`HostProbe::push_page`] / [`HostProbe::pop_page`] as it navigates; the top
/// of the stack is the current page.
#[derive(Debug)]
pub struct HostProbe {
    platform: Platform,
    app_version: Option<String>,
    pages: RwLock<Vec<String>>,
}

impl Default for HostProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbe {
    /// Create a probe reporting the `Native` platform
    pub fn new() -> Self {
        Self {
            platform: Platform::Native,
            app_version: None,
            pages: RwLock::new(Vec::new()),
        }
    }

    /// Report a different platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Report the host application's version in device info
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    /// Navigate to a new page
    pub fn push_page(&self, route: impl Into<String>) {
        self.pages.write().push(route.into());
    }

    /// Navigate back, returning the page that was left
    pub fn pop_page(&self) -> Option<String> {
        self.pages.write().pop()
    }

    /// Replace the current page (a redirect)
    pub fn replace_page(&self, route: impl Into<String>) {
        let mut pages = self.pages.write();
        pages.pop();
        pages.push(route.into());
    }

    /// Number of pages on the stack
    pub fn depth(&self) -> usize {
        self.pages.read().len()
    }

    fn language() -> Option<String> {
        let raw = std::env::var("LC_ALL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var("LANG").ok())
            .filter(|v| !v.is_empty())?;
        // "en_US.UTF-8" -> "en_US"
        let lang = raw.split('.').next().unwrap_or(&raw);
        if lang == "C" || lang == "POSIX" {
            None
        } else {
            Some(lang.to_string())
        }
    }
}

impl PlatformProbe for HostProbe {
    fn platform(&self) -> ProbeResult<Platform> {
        Ok(self.platform.clone())
    }

    fn current_page(&self) -> ProbeResult<Option<String>> {
        Ok(self.pages.read().last().cloned())
    }

    fn device_info(&self) -> ProbeResult<DeviceInfo> {
        Ok(DeviceInfo {
            platform: Some(std::env::consts::OS.to_string()),
            system: Some(format!("{} {}", std::env::consts::FAMILY, std::env::consts::OS)),
            model: Some(std::env::consts::ARCH.to_string()),
            version: self.app_version.clone(),
            language: Self::language(),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_stack() {
        let probe = HostProbe::new();
        assert_eq!(probe.current_page().unwrap(), None);

        probe.push_page("pages/index/index");
        probe.push_page("pages/room/detail");
        assert_eq!(probe.current_page().unwrap().as_deref(), Some("pages/room/detail"));
        assert_eq!(probe.depth(), 2);

        probe.replace_page("pages/order/confirm");
        assert_eq!(probe.current_page().unwrap().as_deref(), Some("pages/order/confirm"));

        assert_eq!(probe.pop_page().as_deref(), Some("pages/order/confirm"));
        assert_eq!(probe.current_page().unwrap().as_deref(), Some("pages/index/index"));
    }

    #[test]
    fn test_device_info_describes_host() {
        let probe = HostProbe::new()
            .with_platform(Platform::App)
            .with_app_version("2.3.0");
        assert_eq!(probe.platform().unwrap(), Platform::App);

        let info = probe.device_info().unwrap();
        assert_eq!(info.platform.as_deref(), Some(std::env::consts::OS));
        assert_eq!(info.model.as_deref(), Some(std::env::consts::ARCH));
        assert_eq!(info.version.as_deref(), Some("2.3.0"));
        assert!(info.user_agent().is_some());
    }
}
