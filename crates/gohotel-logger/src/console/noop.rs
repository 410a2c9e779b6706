//! No-op console implementation

use super::traits::Console;

/// A console that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpConsole;

impl NoOpConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for NoOpConsole {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
