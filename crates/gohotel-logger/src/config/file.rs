//! File-based configuration source (YAML)
//!
//! Supports a user-level file (`~/.config/gohotel/logger.yaml`) and a
//! workspace-level file (`.config/gohotel/logger.yaml` under a project root).

use std::fs;
use std::path::{Path, PathBuf};

use super::settings::ConfigPatch;
use super::traits::{ConfigResult, ConfigSource};

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    User,
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

/// YAML configuration file
///
/// A missing file is an empty patch, not an error.
///
/// ```yaml
/// level: info
/// enable_console: false
/// max_storage_size: 200
/// auto_report_level: error
/// ```
///
/// # Example
///
/// ```no_run
/// use gohotel_logger::config::FileConfigSource;
///
/// let user = FileConfigSource::user();
/// let workspace = FileConfigSource::workspace("/srv/front-desk");
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
    level: ConfigLevel,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
        }
    }

    /// User-level config in the platform config directory
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("gohotel").join("logger.yaml"), ConfigLevel::User)
    }

    /// Workspace-level config under `root`
    pub fn workspace(root: impl AsRef<Path>) -> Self {
        let path = root.as_ref().join(".config").join("gohotel").join("logger.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write `patch` to the file, creating parent directories
    pub fn save(&self, patch: &ConfigPatch) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(patch)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ConfigSource for FileConfigSource {
    fn name(&self) -> &str {
        self.level.as_str()
    }

    fn load(&self) -> ConfigResult<ConfigPatch> {
        if !self.path.exists() {
            return Ok(ConfigPatch::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigPatch::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}
