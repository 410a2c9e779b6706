//! Core trait and errors for local key-value persistence

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value store the logger persists its buffer into
///
/// Values are JSON documents. A missing key is `Ok(None)`, not an error; the
/// logger substitutes its own default.
///
/// Implementations:
/// - `MemoryStorage`: in-process map, for tests and ephemeral hosts
/// - `FileStorage`: one JSON file per key in a data directory
pub trait LogStorage: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &Value) -> StorageResult<()>;

    /// Delete the value stored under `key`
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Read `key`, falling back to `default` when it is absent
    fn get_or(&self, key: &str, default: Value) -> StorageResult<Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }
}
