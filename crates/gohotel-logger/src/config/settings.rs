//! Logger configuration values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::traits::ConfigError;
use crate::types::LogLevel;

/// Default ingestion path, relative to the API base
pub const DEFAULT_REPORT_URL: &str = "/logs/report";

/// Default storage key for the persisted buffer
pub const DEFAULT_STORAGE_KEY: &str = "gohotel_logs";

/// Default buffer capacity
pub const DEFAULT_MAX_STORAGE_SIZE: usize = 100;

/// Deployment environment, which picks the default configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Read `GOHOTEL_ENV`; anything other than `production`/`prod` is development
    pub fn detect() -> Self {
        std::env::var("GOHOTEL_ENV")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "test" => Ok(Environment::Development),
            other => Err(ConfigError::invalid("environment", other)),
        }
    }
}

/// Process-wide logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Minimum accepted severity
    pub level: LogLevel,
    /// Mirror accepted entries to the console
    pub enable_console: bool,
    /// Persist the buffer to local storage
    pub enable_storage: bool,
    /// Send entries at or above `auto_report_level` immediately
    pub enable_report: bool,
    /// Buffer capacity; the oldest entries are evicted first
    pub max_storage_size: usize,
    /// Ingestion path, relative to the transport's API base
    pub report_url: String,
    /// Minimum severity that triggers an immediate report
    pub auto_report_level: LogLevel,
    /// Storage key for the persisted buffer
    pub storage_key: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggerConfig {
    /// Defaults for an environment
    ///
    /// Production drops DEBUG entries and keeps the console quiet.
    pub fn for_environment(env: Environment) -> Self {
        let production = env == Environment::Production;
        Self {
            level: if production { LogLevel::Info } else { LogLevel::Debug },
            enable_console: !production,
            enable_storage: true,
            enable_report: true,
            max_storage_size: DEFAULT_MAX_STORAGE_SIZE,
            report_url: DEFAULT_REPORT_URL.to_string(),
            auto_report_level: LogLevel::Error,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Shallow-merge the fields present in `patch`
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(enable_console) = patch.enable_console {
            self.enable_console = enable_console;
        }
        if let Some(enable_storage) = patch.enable_storage {
            self.enable_storage = enable_storage;
        }
        if let Some(enable_report) = patch.enable_report {
            self.enable_report = enable_report;
        }
        if let Some(max_storage_size) = patch.max_storage_size {
            self.max_storage_size = max_storage_size;
        }
        if let Some(report_url) = &patch.report_url {
            self.report_url = report_url.clone();
        }
        if let Some(auto_report_level) = patch.auto_report_level {
            self.auto_report_level = auto_report_level;
        }
        if let Some(storage_key) = &patch.storage_key {
            self.storage_key = storage_key.clone();
        }
    }

    /// Consume and return a merged copy
    pub fn merged(mut self, patch: &ConfigPatch) -> Self {
        self.apply(patch);
        self
    }
}

/// Partial configuration; absent fields leave the current value alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_console: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_storage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_report: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_storage_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_report_level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn enable_console(mut self, enabled: bool) -> Self {
        self.enable_console = Some(enabled);
        self
    }

    pub fn enable_storage(mut self, enabled: bool) -> Self {
        self.enable_storage = Some(enabled);
        self
    }

    pub fn enable_report(mut self, enabled: bool) -> Self {
        self.enable_report = Some(enabled);
        self
    }

    pub fn max_storage_size(mut self, size: usize) -> Self {
        self.max_storage_size = Some(size);
        self
    }

    pub fn report_url(mut self, url: impl Into<String>) -> Self {
        self.report_url = Some(url.into());
        self
    }

    pub fn auto_report_level(mut self, level: LogLevel) -> Self {
        self.auto_report_level = Some(level);
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    /// Overlay `other` on top of this patch (fields in `other` win)
    pub fn overlay(mut self, other: &ConfigPatch) -> Self {
        macro_rules! take {
            ($($field:ident),+) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )+
            };
        }
        take!(
            level,
            enable_console,
            enable_storage,
            enable_report,
            max_storage_size,
            report_url,
            auto_report_level,
            storage_key
        );
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ConfigPatch::default()
    }
}
