//! Console sinks
//!
//! Accepted entries are mirrored here when console output is enabled, and the
//! logger's own diagnostics always land here.

mod traits;
mod noop;
mod std_console;
mod memory;
mod file;

pub use traits::{Console, ConsoleExt, SharedConsole};
pub use noop::NoOpConsole;
pub use std_console::StdConsole;
pub use memory::MemoryConsole;
pub use file::FileConsole;
