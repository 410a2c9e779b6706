//! Console sink trait definition

use std::sync::Arc;

/// Console abstraction the logger mirrors accepted entries to
///
/// The logger also reports its own trouble here (failed storage writes,
/// failed uploads), always at error level, since those must never reach the
/// caller.
///
/// Implementations:
/// - `StdConsole`: stdout/stderr
/// - `FileConsole`: appends to a file, for hosts where stdio is not visible
/// - `MemoryConsole`: captures lines for tests
/// - `NoOpConsole`: discards everything
pub trait Console: Send + Sync {
    /// Write a debug line
    fn debug(&self, message: &str);

    /// Write an info line
    fn info(&self, message: &str);

    /// Write a warning line
    fn warn(&self, message: &str);

    /// Write an error line
    fn error(&self, message: &str);
}

/// Type alias for an Arc-wrapped console
pub type SharedConsole = Arc<dyn Console>;

/// Extension trait for writing with format arguments
pub trait ConsoleExt: Console {
    fn debug_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.debug(&args.to_string());
    }

    fn info_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.info(&args.to_string());
    }

    fn warn_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.warn(&args.to_string());
    }

    fn error_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.error(&args.to_string());
    }
}

impl<T: Console + ?Sized> ConsoleExt for T {}
