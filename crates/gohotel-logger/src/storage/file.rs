//! File-backed storage
//!
//! Each key lives in its own `<key>.json` file under a data directory
//! (`~/.local/share/gohotel` on Linux by default).

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::Value;

use super::traits::{LogStorage, StorageError, StorageResult};

/// File-backed storage
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write leaves the previous value readable.
///
/// # Example
///
/// ```no_run
/// use gohotel_logger::storage::FileStorage;
///
/// let storage = FileStorage::user();
/// let custom = FileStorage::new("/var/lib/front-desk/logs");
/// ```
pub struct FileStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a store rooted at `dir` (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store in the user's data directory
    pub fn user() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".local").join("share"));
        Self::new(data_dir.join("gohotel"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl std::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage").field("dir", &self.dir).finish()
    }
}

impl LogStorage for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &Value) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let content = serde_json::to_string(value)?;

        let _guard = self.write_lock.lock();
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
