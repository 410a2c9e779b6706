//! Local persistence for the log buffer
//!
//! - `LogStorage` trait for pluggable key-value stores
//! - Built-in implementations: `MemoryStorage`, `FileStorage`

mod traits;
mod memory;
mod file;

pub use traits::{LogStorage, StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use file::FileStorage;
