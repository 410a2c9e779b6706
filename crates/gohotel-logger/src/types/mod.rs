//! Core logging types
//!
//! Shared by the logger, the storage backends and the report transports.

mod level;
mod entry;
mod filter;
mod stats;
mod device;

pub use level::{LogLevel, ParseLevelError};
pub use entry::{LogEntry, LogData, EntryContext, UNKNOWN};
pub use filter::{LogFilter, LogView};
pub use stats::{Statistics, RECENT_ERROR_LIMIT};
pub use device::DeviceInfo;
