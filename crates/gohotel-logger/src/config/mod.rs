//! Logger configuration
//!
//! `LoggerConfig` starts from per-environment defaults and is overlaid by
//! configuration sources, in order:
//! - `FileConfigSource`: YAML file (user or workspace level)
//! - `EnvConfigSource`: `GOHOTEL_LOG_*` variables
//! - `MemoryConfigSource`: fixed patch, for tests and hosts

mod traits;
mod settings;
mod memory;
mod file;
mod env;

pub use traits::{ConfigSource, ConfigError, ConfigResult};
pub use settings::{
    ConfigPatch, Environment, LoggerConfig,
    DEFAULT_MAX_STORAGE_SIZE, DEFAULT_REPORT_URL, DEFAULT_STORAGE_KEY,
};
pub use memory::MemoryConfigSource;
pub use file::{FileConfigSource, ConfigLevel};
pub use env::EnvConfigSource;

/// Build a configuration from `env` defaults overlaid by `sources`
///
/// Later sources override earlier ones field by field.
pub fn resolve_config(env: Environment, sources: &[&dyn ConfigSource]) -> ConfigResult<LoggerConfig> {
    let mut config = LoggerConfig::for_environment(env);
    for source in sources {
        config.apply(&source.load()?);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;
    use std::collections::HashMap;

    #[test]
    fn test_later_sources_win() {
        let file = MemoryConfigSource::new(
            ConfigPatch::new().level(LogLevel::Info).max_storage_size(50),
        );
        let mut vars = HashMap::new();
        vars.insert("GOHOTEL_LOG_LEVEL".to_string(), "error".to_string());
        let env = EnvConfigSource::with_vars(vars);

        let config = resolve_config(Environment::Production, &[&file, &env]).unwrap();
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.max_storage_size, 50);
        assert!(!config.enable_console);
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        let config = resolve_config(Environment::Development, &[]).unwrap();
        assert_eq!(config, LoggerConfig::for_environment(Environment::Development));
    }
}
