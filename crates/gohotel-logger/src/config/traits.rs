//! Configuration source trait

use super::settings::ConfigPatch;

/// A layer of configuration
///
/// Sources only report the fields they set; [`super::resolve_config`] stacks
/// them over the environment defaults.
///
/// Implementations:
/// - `MemoryConfigSource`: fixed patch, for tests and embedding hosts
/// - `FileConfigSource`: YAML file (user or workspace level)
/// - `EnvConfigSource`: `GOHOTEL_LOG_*` environment variables
pub trait ConfigSource: Send + Sync {
    /// Source name, for error messages
    fn name(&self) -> &str;

    /// Read the fields this source sets
    fn load(&self) -> ConfigResult<ConfigPatch>;
}

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
