//! Log entry value object

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::level::LogLevel;

/// Structured payload attached to a log entry
pub type LogData = Map<String, Value>;

/// Fallback used when an environment lookup fails
pub const UNKNOWN: &str = "Unknown";

/// Environment context captured when an entry is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryContext {
    pub platform: String,
    pub page: String,
    pub user_agent: String,
}

impl Default for EntryContext {
    fn default() -> Self {
        Self {
            platform: UNKNOWN.to_string(),
            page: UNKNOWN.to_string(),
            user_agent: UNKNOWN.to_string(),
        }
    }
}

/// A single accepted log event
///
/// Entries are built once by the logger and then shared as `Arc<LogEntry>`;
/// nothing mutates them afterwards. The JSON form matches what the ingestion
/// endpoint expects:
///
/// ```json
/// {"level":"ERROR","levelValue":3,"message":"boom","data":{},
///  "timestamp":"2024-05-01T08:00:00Z","platform":"App",
///  "page":"pages/index/index","userAgent":"android Android 13 Pixel 7"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireEntry", into = "WireEntry")]
pub struct LogEntry {
    level: LogLevel,
    message: String,
    data: LogData,
    timestamp: DateTime<Utc>,
    platform: String,
    page: String,
    user_agent: String,
}

impl LogEntry {
    /// Create an entry stamped with the current time and unknown context
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        let context = EntryContext::default();
        Self {
            level,
            message: message.into(),
            data: LogData::new(),
            timestamp: Utc::now(),
            platform: context.platform,
            page: context.page,
            user_agent: context.user_agent,
        }
    }

    /// Attach a structured payload
    pub fn with_data(mut self, data: LogData) -> Self {
        self.data = data;
        self
    }

    /// Override the creation time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach captured environment context
    pub fn with_context(mut self, context: EntryContext) -> Self {
        self.platform = context.platform;
        self.page = context.page;
        self.user_agent = context.user_agent;
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Upper-case level label, e.g. `"WARN"`
    pub fn level_name(&self) -> &'static str {
        self.level.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &LogData {
        &self.data
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEntry {
    level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level_value: Option<u8>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: LogData,
    timestamp: DateTime<Utc>,
    #[serde(default = "unknown")]
    platform: String,
    #[serde(default = "unknown")]
    page: String,
    #[serde(default = "unknown")]
    user_agent: String,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

impl From<WireEntry> for LogEntry {
    fn from(wire: WireEntry) -> Self {
        // The name is authoritative; levelValue is carried for the server's benefit
        Self {
            level: wire.level,
            message: wire.message,
            data: wire.data,
            timestamp: wire.timestamp,
            platform: wire.platform,
            page: wire.page,
            user_agent: wire.user_agent,
        }
    }
}

impl From<LogEntry> for WireEntry {
    fn from(entry: LogEntry) -> Self {
        Self {
            level: entry.level,
            level_value: Some(entry.level.value()),
            message: entry.message,
            data: entry.data,
            timestamp: entry.timestamp,
            platform: entry.platform,
            page: entry.page,
            user_agent: entry.user_agent,
        }
    }
}

/// Build a [`LogData`] map from `key => value` pairs
///
/// Values go through `serde_json::json!`, so anything serializable works.
///
/// ```
/// use gohotel_logger::log_data;
///
/// let data = log_data! { "roomId" => 1204, "floor" => "12F" };
/// assert_eq!(data["roomId"], 1204);
/// ```
#[macro_export]
macro_rules! log_data {
    () => {
        $crate::types::LogData::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut data = $crate::types::LogData::new();
        $(
            data.insert(::std::string::String::from($key), ::serde_json::json!($value));
        )+
        data
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> LogEntry {
        LogEntry::new(LogLevel::Error, "payment failed")
            .with_data(crate::log_data! { "orderId" => "A-1001" })
            .with_timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
            .with_context(EntryContext {
                platform: "App".to_string(),
                page: "pages/order/detail".to_string(),
                user_agent: "android Android 13 Pixel 7".to_string(),
            })
    }

    #[test]
    fn test_new_entry_defaults() {
        let entry = LogEntry::new(LogLevel::Info, "");
        assert_eq!(entry.message(), "");
        assert!(entry.data().is_empty());
        assert_eq!(entry.platform(), UNKNOWN);
        assert_eq!(entry.page(), UNKNOWN);
        assert_eq!(entry.user_agent(), UNKNOWN);
        assert_eq!(entry.level_name(), "INFO");
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["level"], "ERROR");
        assert_eq!(json["levelValue"], 3);
        assert_eq!(json["message"], "payment failed");
        assert_eq!(json["data"]["orderId"], "A-1001");
        assert_eq!(json["timestamp"], "2024-05-01T08:00:00Z");
        assert_eq!(json["platform"], "App");
        assert_eq!(json["page"], "pages/order/detail");
        assert_eq!(json["userAgent"], "android Android 13 Pixel 7");
    }

    #[test]
    fn test_parse_minimal_record() {
        // Older persisted records may lack context fields
        let entry: LogEntry = serde_json::from_str(
            r#"{"level":"WARN","message":"slow","timestamp":"2024-05-01T08:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.level(), LogLevel::Warn);
        assert_eq!(entry.page(), UNKNOWN);
        assert!(entry.data().is_empty());
    }

    #[test]
    fn test_log_data_macro() {
        let empty = crate::log_data!();
        assert!(empty.is_empty());

        let data = crate::log_data! { "url" => "/api/rooms", "status" => 200, "ok" => true };
        assert_eq!(data.len(), 3);
        assert_eq!(data["status"], 200);
        assert_eq!(data["ok"], true);
    }
}
