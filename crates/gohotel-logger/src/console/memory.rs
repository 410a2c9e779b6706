//! Capturing console for tests

use parking_lot::Mutex;

use super::traits::Console;
use crate::types::LogLevel;

/// A console that keeps every line in memory
///
/// Lines are recorded with the severity they were written at (`Debug`,
/// `Info`, `Warn` or `Error`).
///
/// # Example
///
/// ```
/// use gohotel_logger::console::{Console, MemoryConsole};
///
/// let console = MemoryConsole::new();
/// console.error("upload failed");
/// assert!(console.contains("upload failed"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines, oldest first
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().clone()
    }

    /// Captured lines written at error level
    pub fn errors(&self) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(level, _)| *level == LogLevel::Error)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Whether any captured line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|(_, line)| line.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lines.lock().push((level, message.to_string()));
    }
}

impl Console for MemoryConsole {
    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}
