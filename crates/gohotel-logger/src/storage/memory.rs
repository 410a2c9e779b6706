//! In-memory storage

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use super::traits::{LogStorage, StorageResult};

/// In-memory storage for tests and ephemeral use
///
/// Values are lost when the store is dropped. Share one instance through an
/// `Arc` to simulate a restart: build a second logger over the same store and
/// it reloads what the first one persisted.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial values
    pub fn with_values(initial: HashMap<String, Value>) -> Self {
        Self {
            values: RwLock::new(initial),
        }
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }
}

impl LogStorage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> StorageResult<()> {
        self.values.write().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.values.write().remove(key);
        Ok(())
    }
}
