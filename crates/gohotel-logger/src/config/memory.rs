//! In-memory configuration source

use parking_lot::RwLock;

use super::settings::ConfigPatch;
use super::traits::{ConfigResult, ConfigSource};

/// Configuration source holding a fixed patch
#[derive(Debug, Default)]
pub struct MemoryConfigSource {
    patch: RwLock<ConfigPatch>,
}

impl MemoryConfigSource {
    pub fn new(patch: ConfigPatch) -> Self {
        Self {
            patch: RwLock::new(patch),
        }
    }

    /// Replace the held patch
    pub fn set(&self, patch: ConfigPatch) {
        *self.patch.write() = patch;
    }
}

impl ConfigSource for MemoryConfigSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> ConfigResult<ConfigPatch> {
        Ok(self.patch.read().clone())
    }
}
