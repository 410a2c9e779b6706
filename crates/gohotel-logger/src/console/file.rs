//! File-backed console
//!
//! Useful when stdout/stderr are not visible (a daemonized host, a GUI shell).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::traits::Console;
use crate::types::LogLevel;

/// A console that appends timestamped lines to a file
///
/// If the file cannot be opened the console silently discards output; the
/// logger must keep working regardless of where its console points.
pub struct FileConsole {
    path: PathBuf,
    file: Mutex<Option<File>>,
    min_level: LogLevel,
}

impl FileConsole {
    /// Open (or create) `path` for appending
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file = Self::open(&path);
        Self {
            path,
            file: Mutex::new(file),
            min_level: LogLevel::Debug,
        }
    }

    /// Console writing to `<temp_dir>/gohotel-console.log`
    pub fn default_location() -> Self {
        Self::new(Self::default_path())
    }

    /// Default console file path
    pub fn default_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push("gohotel-console.log");
        path
    }

    /// Drop lines below `level`
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the file and reopen it for appending
    pub fn clear(&self) {
        if let Ok(file) = File::create(&self.path) {
            drop(file);
        }
        *self.file.lock() = Self::open(&self.path);
    }

    fn open(path: &Path) -> Option<File> {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    }

    fn write(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }

        let mut guard = self.file.lock();
        if let Some(file) = guard.as_mut() {
            let timestamp = Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] [{:<5}] {}", timestamp, level.as_str(), message);
            let _ = file.flush();
        }
    }
}

impl std::fmt::Debug for FileConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConsole")
            .field("path", &self.path)
            .field("min_level", &self.min_level)
            .finish()
    }
}

impl Console for FileConsole {
    fn debug(&self, message: &str) {
        self.write(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.write(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.write(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.write(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_console_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("console.log");
        let console = FileConsole::new(&path);

        console.info("checked in room 1204");
        console.error("upload failed");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[INFO ] checked in room 1204"));
        assert!(lines[1].contains("[ERROR] upload failed"));
    }

    #[test]
    fn test_file_console_min_level_and_clear() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("console.log");
        let console = FileConsole::new(&path).with_min_level(LogLevel::Warn);

        console.debug("hidden");
        console.warn("shown");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("hidden"));
        assert!(content.contains("shown"));

        console.clear();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        console.error("after clear");
        assert!(std::fs::read_to_string(&path).unwrap().contains("after clear"));
    }
}
