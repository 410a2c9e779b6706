//! Environment variable configuration source

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::settings::ConfigPatch;
use super::traits::{ConfigError, ConfigResult, ConfigSource};

/// Config field -> environment variable
static ENV_VAR_MAP: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("level", "GOHOTEL_LOG_LEVEL"),
        ("enable_console", "GOHOTEL_LOG_CONSOLE"),
        ("enable_storage", "GOHOTEL_LOG_STORAGE"),
        ("enable_report", "GOHOTEL_LOG_REPORT"),
        ("max_storage_size", "GOHOTEL_LOG_MAX_STORAGE"),
        ("report_url", "GOHOTEL_LOG_REPORT_URL"),
        ("auto_report_level", "GOHOTEL_LOG_AUTO_REPORT_LEVEL"),
        ("storage_key", "GOHOTEL_LOG_STORAGE_KEY"),
    ]
});

/// Reads `GOHOTEL_LOG_*` variables
///
/// | variable | field |
/// |---|---|
/// | `GOHOTEL_LOG_LEVEL` | `level` |
/// | `GOHOTEL_LOG_CONSOLE` | `enable_console` |
/// | `GOHOTEL_LOG_STORAGE` | `enable_storage` |
/// | `GOHOTEL_LOG_REPORT` | `enable_report` |
/// | `GOHOTEL_LOG_MAX_STORAGE` | `max_storage_size` |
/// | `GOHOTEL_LOG_REPORT_URL` | `report_url` |
/// | `GOHOTEL_LOG_AUTO_REPORT_LEVEL` | `auto_report_level` |
/// | `GOHOTEL_LOG_STORAGE_KEY` | `storage_key` |
///
/// Empty variables are ignored; unparseable ones are an error.
#[derive(Debug, Default)]
pub struct EnvConfigSource {
    overrides: Option<HashMap<String, String>>,
}

impl EnvConfigSource {
    /// Read from the process environment
    pub fn new() -> Self {
        Self { overrides: None }
    }

    /// Read from a fixed set of variables instead of the process environment
    pub fn with_vars(vars: HashMap<String, String>) -> Self {
        Self {
            overrides: Some(vars),
        }
    }

    /// The variable that sets `field`
    pub fn var_for(field: &str) -> Option<&'static str> {
        ENV_VAR_MAP
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, var)| *var)
    }

    fn lookup(&self, var: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(vars) => vars.get(var).cloned(),
            None => std::env::var(var).ok(),
        }?;
        let value = value.trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    fn parse_bool(field: &str, value: &str) -> ConfigResult<bool> {
        match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::invalid(field, value)),
        }
    }
}

impl ConfigSource for EnvConfigSource {
    fn name(&self) -> &str {
        "env"
    }

    fn load(&self) -> ConfigResult<ConfigPatch> {
        let mut patch = ConfigPatch::default();

        for (field, var) in ENV_VAR_MAP.iter() {
            let Some(value) = self.lookup(var) else {
                continue;
            };
            match *field {
                "level" => {
                    patch.level = Some(value.parse().map_err(|_| ConfigError::invalid(*var, &value))?)
                }
                "auto_report_level" => {
                    patch.auto_report_level =
                        Some(value.parse().map_err(|_| ConfigError::invalid(*var, &value))?)
                }
                "enable_console" => patch.enable_console = Some(Self::parse_bool(var, &value)?),
                "enable_storage" => patch.enable_storage = Some(Self::parse_bool(var, &value)?),
                "enable_report" => patch.enable_report = Some(Self::parse_bool(var, &value)?),
                "max_storage_size" => {
                    patch.max_storage_size =
                        Some(value.parse().map_err(|_| ConfigError::invalid(*var, &value))?)
                }
                "report_url" => patch.report_url = Some(value),
                "storage_key" => patch.storage_key = Some(value),
                _ => {}
            }
        }

        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;

    fn vars(pairs: &[(&str, &str)]) -> EnvConfigSource {
        EnvConfigSource::with_vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_env_source_reads_vars() {
        let source = vars(&[
            ("GOHOTEL_LOG_LEVEL", "warn"),
            ("GOHOTEL_LOG_CONSOLE", "off"),
            ("GOHOTEL_LOG_MAX_STORAGE", "25"),
            ("GOHOTEL_LOG_REPORT_URL", "/api/logs/report"),
            ("GOHOTEL_LOG_AUTO_REPORT_LEVEL", "4"),
            ("GOHOTEL_LOG_STORAGE_KEY", ""),
        ]);

        let patch = source.load().unwrap();
        assert_eq!(patch.level, Some(LogLevel::Warn));
        assert_eq!(patch.enable_console, Some(false));
        assert_eq!(patch.max_storage_size, Some(25));
        assert_eq!(patch.report_url.as_deref(), Some("/api/logs/report"));
        assert_eq!(patch.auto_report_level, Some(LogLevel::Fatal));
        assert_eq!(patch.storage_key, None);
        assert_eq!(patch.enable_report, None);
    }

    #[test]
    fn test_env_source_rejects_garbage() {
        let err = vars(&[("GOHOTEL_LOG_MAX_STORAGE", "lots")]).load().unwrap_err();
        assert!(err.to_string().contains("GOHOTEL_LOG_MAX_STORAGE"));

        assert!(vars(&[("GOHOTEL_LOG_REPORT", "maybe")]).load().is_err());
        assert!(vars(&[("GOHOTEL_LOG_LEVEL", "loud")]).load().is_err());
    }

    #[test]
    fn test_var_for() {
        assert_eq!(EnvConfigSource::var_for("level"), Some("GOHOTEL_LOG_LEVEL"));
        assert_eq!(EnvConfigSource::var_for("nope"), None);
    }
}
