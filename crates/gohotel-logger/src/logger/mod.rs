//! The logger and its construction
//!
//! ```text
//! log() ──► threshold ──► context (probe) ──► buffer + storage
//!                                        ├──► console mirror
//!                                        └──► auto-report (background)
//! ```

mod buffer;
mod builder;
mod core;
mod helpers;
mod panic;

pub use self::builder::LoggerBuilder;
pub use self::core::{BatchOutcome, Logger};
pub use self::panic::install_panic_hook;
