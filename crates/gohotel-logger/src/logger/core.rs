//! The logger

use std::sync::Arc;

use chrono::{Local, Utc};
use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::buffer::LogBuffer;
use super::builder::LoggerBuilder;
use crate::config::{ConfigPatch, LoggerConfig};
use crate::console::{ConsoleExt, SharedConsole};
use crate::probe::{Platform, SharedProbe};
use crate::report::{ReportPayload, SharedTransport};
use crate::storage::LogStorage;
use crate::types::{
    DeviceInfo, EntryContext, LogData, LogEntry, LogFilter, LogLevel, LogView, Statistics, UNKNOWN,
};

/// Result of a batch report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Nothing to send; no request was made
    Skipped,
    /// The endpoint accepted this many entries
    Delivered(usize),
    /// The request failed; the buffer is untouched
    Failed,
}

impl BatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, BatchOutcome::Delivered(_))
    }

    /// `Some(true)` / `Some(false)` for a real attempt, `None` when skipped
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BatchOutcome::Skipped => None,
            BatchOutcome::Delivered(_) => Some(true),
            BatchOutcome::Failed => Some(false),
        }
    }
}

/// Who asked for an entry to be recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Caller,
    PanicHook,
}

/// Leveled log recorder with local retention and remote delivery
///
/// Owned by the application's composition root and shared as `Arc<Logger>`.
/// Every accepted entry is mirrored to the console (when enabled), appended to
/// a bounded buffer that is persisted after each append, and, at or above the
/// auto-report level, posted to the ingestion endpoint in the background.
///
/// Nothing here returns an error to the caller: storage, network and
/// environment failures are written to the console and otherwise ignored.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gohotel_logger::{log_data, Logger, LogFilter, LogLevel};
/// use gohotel_logger::config::ConfigPatch;
/// use gohotel_logger::console::NoOpConsole;
/// use gohotel_logger::report::MockTransport;
///
/// let logger = Logger::builder()
///     .console(Arc::new(NoOpConsole))
///     .transport(Arc::new(MockTransport::new()))
///     .build();
/// logger.set_config(ConfigPatch::new().enable_report(false));
///
/// logger.info("room 1204 checked in", Some(log_data! { "roomId" => 1204 }));
/// logger.debug("cache warm", None);
///
/// let infos = logger.get_logs(LogFilter::new().with_level(LogLevel::Info));
/// assert_eq!(infos.count(), 1);
/// ```
pub struct Logger {
    config: RwLock<LoggerConfig>,
    buffer: Mutex<LogBuffer>,
    storage: Arc<dyn LogStorage>,
    transport: SharedTransport,
    probe: SharedProbe,
    console: SharedConsole,
    platform: Platform,
    runtime: Option<Handle>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl Logger {
    /// Start building a logger
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn from_parts(
        config: LoggerConfig,
        storage: Arc<dyn LogStorage>,
        transport: SharedTransport,
        probe: SharedProbe,
        console: SharedConsole,
        runtime: Option<Handle>,
    ) -> Self {
        // Resolved once; the platform does not change while the process runs
        let platform = probe.platform().unwrap_or(Platform::Unknown);
        let buffer = if config.enable_storage {
            Self::load_buffer(storage.as_ref(), &config)
        } else {
            LogBuffer::default()
        };

        Self {
            config: RwLock::new(config),
            buffer: Mutex::new(buffer),
            storage,
            transport,
            probe,
            console,
            platform,
            runtime,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Read the persisted buffer; anything unreadable means "no prior logs"
    fn load_buffer(storage: &dyn LogStorage, config: &LoggerConfig) -> LogBuffer {
        let entries = storage
            .get(&config.storage_key)
            .ok()
            .flatten()
            .and_then(|value| serde_json::from_value::<Vec<LogEntry>>(value).ok())
            .unwrap_or_default();
        LogBuffer::restore(entries, config.max_storage_size)
    }

    // ------------------------------------------------------------------
    // Recording
    // ------------------------------------------------------------------

    /// Record an entry at `level`
    ///
    /// Returns `None`, with no side effects at all, when `level` is below the
    /// configured threshold. Otherwise returns the stored entry. `data`
    /// defaults to an empty mapping.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        data: Option<LogData>,
    ) -> Option<Arc<LogEntry>> {
        self.record(self.config(), level, message.into(), data, Origin::Caller)
    }

    /// Record a panic captured by the panic hook as an ERROR entry
    ///
    /// Never blocks: if the panicking thread already holds the configuration
    /// or the buffer, the entry is dropped. Never auto-reported, so a
    /// panicking transport cannot feed itself.
    pub(crate) fn record_panic(&self, data: LogData) -> Option<Arc<LogEntry>> {
        let config = self.config.try_read()?.clone();
        self.record(
            config,
            LogLevel::Error,
            "Uncaught panic".to_string(),
            Some(data),
            Origin::PanicHook,
        )
    }

    fn record(
        &self,
        config: LoggerConfig,
        level: LogLevel,
        message: String,
        data: Option<LogData>,
        origin: Origin,
    ) -> Option<Arc<LogEntry>> {
        if level < config.level {
            return None;
        }

        let context = self.capture_context();
        let entry = {
            let mut buffer = match origin {
                Origin::Caller => self.buffer.lock(),
                Origin::PanicHook => self.buffer.try_lock()?,
            };
            let timestamp = buffer.next_timestamp(Utc::now());
            let entry = Arc::new(
                LogEntry::new(level, message)
                    .with_data(data.unwrap_or_default())
                    .with_timestamp(timestamp)
                    .with_context(context),
            );
            buffer.push(Arc::clone(&entry), config.max_storage_size);
            if config.enable_storage {
                self.persist(&buffer, &config.storage_key);
            }
            entry
        };

        if config.enable_console {
            self.mirror_to_console(&entry);
        }

        if origin == Origin::Caller && config.enable_report && level >= config.auto_report_level {
            self.dispatch_report(Arc::clone(&entry), config.report_url);
        }

        Some(entry)
    }

    pub fn debug(&self, message: impl Into<String>, data: Option<LogData>) -> Option<Arc<LogEntry>> {
        self.log(LogLevel::Debug, message, data)
    }

    pub fn info(&self, message: impl Into<String>, data: Option<LogData>) -> Option<Arc<LogEntry>> {
        self.log(LogLevel::Info, message, data)
    }

    pub fn warn(&self, message: impl Into<String>, data: Option<LogData>) -> Option<Arc<LogEntry>> {
        self.log(LogLevel::Warn, message, data)
    }

    pub fn error(&self, message: impl Into<String>, data: Option<LogData>) -> Option<Arc<LogEntry>> {
        self.log(LogLevel::Error, message, data)
    }

    pub fn fatal(&self, message: impl Into<String>, data: Option<LogData>) -> Option<Arc<LogEntry>> {
        self.log(LogLevel::Fatal, message, data)
    }

    fn capture_context(&self) -> EntryContext {
        let page = match self.probe.current_page() {
            Ok(Some(page)) => page,
            Ok(None) | Err(_) => UNKNOWN.to_string(),
        };
        let user_agent = self
            .probe
            .device_info()
            .ok()
            .and_then(|info| info.user_agent())
            .unwrap_or_else(|| UNKNOWN.to_string());

        EntryContext {
            platform: self.platform.label().to_string(),
            page,
            user_agent,
        }
    }

    /// Current page as seen by the probe, `"Unknown"` on failure
    pub fn current_page(&self) -> String {
        self.probe
            .current_page()
            .ok()
            .flatten()
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Device details for report payloads, empty on failure
    pub fn device_info(&self) -> DeviceInfo {
        self.probe.device_info().unwrap_or_default()
    }

    /// Platform resolved when the logger was built
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    fn mirror_to_console(&self, entry: &LogEntry) {
        let time = entry.timestamp().with_timezone(&Local).format("%H:%M:%S");
        let mut line = format!("[{}] [{}] {}", entry.level_name(), time, entry.message());
        if !entry.data().is_empty() {
            if let Ok(data) = serde_json::to_string(entry.data()) {
                line.push(' ');
                line.push_str(&data);
            }
        }

        match entry.level() {
            LogLevel::Debug => self.console.debug(&line),
            LogLevel::Info => self.console.info(&line),
            LogLevel::Warn => self.console.warn(&line),
            LogLevel::Error | LogLevel::Fatal => self.console.error(&line),
        }
    }

    fn persist(&self, buffer: &LogBuffer, key: &str) {
        let result = serde_json::to_value(buffer.entries())
            .map_err(Into::into)
            .and_then(|value| self.storage.set(key, &value));
        if let Err(e) = result {
            self.console
                .error_fmt(format_args!("Failed to persist logs to {} storage: {}", self.storage.name(), e));
        }
    }

    // ------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------

    fn dispatch_report(&self, entry: Arc<LogEntry>, report_url: String) {
        let Some(runtime) = &self.runtime else {
            self.console
                .error("Failed to report log: no async runtime available for background delivery");
            return;
        };

        let payload = ReportPayload::new(vec![entry], self.device_info());
        let transport = Arc::clone(&self.transport);
        let console = Arc::clone(&self.console);
        let handle = runtime.spawn(async move {
            if let Err(e) = transport.send(&report_url, &payload).await {
                console.error_fmt(format_args!("Failed to report log: {}", e));
            }
        });

        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|task| !task.is_finished());
        in_flight.push(handle);
    }

    /// Send one entry as a single-entry batch
    ///
    /// Failures are written to the console, never returned.
    pub async fn report_log(&self, entry: &Arc<LogEntry>) {
        let report_url = self.config.read().report_url.clone();
        let payload = ReportPayload::new(vec![Arc::clone(entry)], self.device_info());
        if let Err(e) = self.transport.send(&report_url, &payload).await {
            self.console.error_fmt(format_args!("Failed to report log: {}", e));
        }
    }

    /// Send a batch: `entries`, or the whole buffer when `None`
    ///
    /// A full-buffer batch that is delivered is removed from the buffer
    /// (entries recorded while the request was in flight stay). An explicit
    /// batch never touches the buffer.
    pub async fn report_logs(&self, entries: Option<Vec<Arc<LogEntry>>>) -> BatchOutcome {
        let full_buffer = entries.is_none();
        let batch = match entries {
            Some(entries) => entries,
            None => self.buffer.lock().snapshot(),
        };
        if batch.is_empty() {
            return BatchOutcome::Skipped;
        }

        let report_url = self.config.read().report_url.clone();
        let payload = ReportPayload::new(batch, self.device_info());
        match self.transport.send(&report_url, &payload).await {
            Ok(()) => {
                if full_buffer {
                    self.drain(&payload.logs);
                }
                BatchOutcome::Delivered(payload.len())
            }
            Err(e) => {
                self.console.error_fmt(format_args!("Failed to report log batch: {}", e));
                BatchOutcome::Failed
            }
        }
    }

    fn drain(&self, sent: &[Arc<LogEntry>]) {
        let config = self.config();
        let mut buffer = self.buffer.lock();
        buffer.remove_all(sent);
        if config.enable_storage {
            self.persist(&buffer, &config.storage_key);
        }
    }

    /// Number of background auto-reports still running
    pub fn pending_reports(&self) -> usize {
        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|task| !task.is_finished());
        in_flight.len()
    }

    /// Wait for every background auto-report to finish
    ///
    /// Call before shutting down; reports dispatched while waiting are
    /// awaited too.
    pub async fn flush_reports(&self) {
        loop {
            let tasks = std::mem::take(&mut *self.in_flight.lock());
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                if let Err(e) = task.await {
                    self.console.error_fmt(format_args!("Report task ended abnormally: {}", e));
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Retrieval
    // ------------------------------------------------------------------

    /// Filtered view over the buffer as it is now
    pub fn get_logs(&self, filter: LogFilter) -> LogView {
        LogView::new(self.buffer.lock().snapshot(), filter)
    }

    /// Every buffered entry, oldest first
    pub fn logs(&self) -> Vec<Arc<LogEntry>> {
        self.buffer.lock().snapshot()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty the buffer and persist the empty state
    pub fn clear_logs(&self) {
        let config = self.config();
        let mut buffer = self.buffer.lock();
        buffer.clear();
        if config.enable_storage {
            self.persist(&buffer, &config.storage_key);
        }
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_entries(self.buffer.lock().entries())
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Shallow-merge `patch` into the configuration
    pub fn set_config(&self, patch: ConfigPatch) {
        self.config.write().apply(&patch);
    }

    /// Snapshot of the configuration
    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.config.read())
            .field("buffered", &self.len())
            .field("storage", &self.storage.name())
            .field("transport", &self.transport.name())
            .field("platform", &self.platform)
            .finish()
    }
}
