//! GoHotel client logger
//!
//! Leveled, structured logging for the GoHotel client apps. Entries are
//! mirrored to a console, kept in a bounded buffer that survives restarts,
//! and shipped to the backend ingestion endpoint either immediately (for
//! errors) or in batches on demand.
//!
//! Everything the logger touches in the outside world sits behind a trait:
//! - `console::Console`: where mirrored lines and diagnostics go
//! - `storage::LogStorage`: key-value persistence for the buffer
//! - `probe::PlatformProbe`: platform, current page and device details
//! - `report::LogTransport`: delivery to the ingestion endpoint
//!
//! ```rust,ignore
//! use gohotel_logger::{log_data, Logger};
//! use gohotel_logger::report::HttpTransport;
//!
//! let logger = Arc::new(
//!     Logger::builder()
//!         .transport(Arc::new(HttpTransport::new("https://api.gohotel.example")))
//!         .build(),
//! );
//! logger.error("payment failed", Some(log_data! { "orderId" => "A-1001" }));
//! logger.flush_reports().await;
//! ```

pub mod types;
pub mod console;
pub mod storage;
pub mod probe;
pub mod report;
pub mod config;
pub mod logger;

// Re-export commonly used types
pub use types::{
    DeviceInfo, EntryContext, LogData, LogEntry, LogFilter, LogLevel, LogView, Statistics,
};

pub use logger::{install_panic_hook, BatchOutcome, Logger, LoggerBuilder};

pub use config::{resolve_config, ConfigPatch, Environment, LoggerConfig};
