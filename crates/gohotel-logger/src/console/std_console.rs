//! Standard stream console

use super::traits::Console;

/// A console that writes to stdout (debug/info) and stderr (warn/error)
#[derive(Debug, Clone)]
pub struct StdConsole {
    prefix: String,
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl StdConsole {
    /// Create a console with the default `[gohotel]` prefix
    pub fn new() -> Self {
        Self {
            prefix: "[gohotel]".to_string(),
        }
    }

    /// Create a console with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn line(&self, message: &str) -> String {
        if self.prefix.is_empty() {
            message.to_string()
        } else {
            format!("{} {}", self.prefix, message)
        }
    }
}

impl Console for StdConsole {
    fn debug(&self, message: &str) {
        println!("{}", self.line(message));
    }

    fn info(&self, message: &str) {
        println!("{}", self.line(message));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", self.line(message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.line(message));
    }
}
