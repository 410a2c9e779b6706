//! Convenience recorders for common app events

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use super::core::Logger;
use crate::log_data;
use crate::types::{LogData, LogEntry};

fn millis(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

impl Logger {
    /// INFO "API request"
    pub fn log_request(
        &self,
        url: &str,
        method: &str,
        params: Value,
        duration: Duration,
    ) -> Option<Arc<LogEntry>> {
        self.info(
            "API request",
            Some(log_data! {
                "url" => url,
                "method" => method,
                "params" => params,
                "duration" => millis(duration),
            }),
        )
    }

    /// DEBUG "API response succeeded" for 2xx, ERROR "API response failed" otherwise
    ///
    /// Successful responses only record the serialized size of `data`; failed
    /// ones carry the body itself.
    pub fn log_response(
        &self,
        url: &str,
        method: &str,
        status: u16,
        data: &Value,
        duration: Duration,
    ) -> Option<Arc<LogEntry>> {
        if (200..300).contains(&status) {
            let data_size = serde_json::to_string(data).map(|s| s.len()).unwrap_or(0);
            self.debug(
                "API response succeeded",
                Some(log_data! {
                    "url" => url,
                    "method" => method,
                    "statusCode" => status,
                    "duration" => millis(duration),
                    "dataSize" => data_size,
                }),
            )
        } else {
            self.error(
                "API response failed",
                Some(log_data! {
                    "url" => url,
                    "method" => method,
                    "statusCode" => status,
                    "data" => data,
                    "duration" => millis(duration),
                }),
            )
        }
    }

    /// INFO "Page view"; the referrer is whatever page the probe reports now
    pub fn log_page_view(&self, path: &str, query: LogData) -> Option<Arc<LogEntry>> {
        let referrer = self.current_page();
        self.info(
            "Page view",
            Some(log_data! {
                "path" => path,
                "query" => Value::Object(query),
                "referrer" => referrer,
            }),
        )
    }

    /// INFO "User action"; keys in `data` are merged in after `action` and `target`
    pub fn log_user_action(&self, action: &str, target: &str, data: LogData) -> Option<Arc<LogEntry>> {
        let mut merged = log_data! { "action" => action, "target" => target };
        merged.extend(data);
        self.info("User action", Some(merged))
    }

    /// INFO "Performance metric", `unit` defaults to `ms`
    pub fn log_performance(&self, metric: &str, value: f64, unit: Option<&str>) -> Option<Arc<LogEntry>> {
        self.info(
            "Performance metric",
            Some(log_data! {
                "metric" => metric,
                "value" => json!(value),
                "unit" => unit.unwrap_or("ms"),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigPatch;
    use crate::console::NoOpConsole;
    use crate::probe::{Platform, StaticProbe};
    use crate::report::MockTransport;
    use crate::types::LogLevel;

    fn logger() -> Logger {
        Logger::builder()
            .patch(ConfigPatch::new().level(LogLevel::Debug).enable_report(false))
            .probe(Arc::new(StaticProbe::new(Platform::App).with_page("pages/room/list")))
            .transport(Arc::new(MockTransport::new()))
            .console(Arc::new(NoOpConsole))
            .build()
    }

    #[test]
    fn test_log_request() {
        let logger = logger();
        let entry = logger
            .log_request("/api/rooms", "GET", json!({"floor": 12}), Duration::from_millis(35))
            .unwrap();
        assert_eq!(entry.level(), LogLevel::Info);
        assert_eq!(entry.message(), "API request");
        assert_eq!(entry.data()["url"], "/api/rooms");
        assert_eq!(entry.data()["params"]["floor"], 12);
        assert_eq!(entry.data()["duration"], "35ms");
    }

    #[test]
    fn test_log_response_by_status() {
        let logger = logger();
        let body = json!({"ok": true});

        let ok = logger
            .log_response("/api/rooms", "GET", 200, &body, Duration::from_millis(12))
            .unwrap();
        assert_eq!(ok.level(), LogLevel::Debug);
        assert_eq!(ok.data()["statusCode"], 200);
        assert_eq!(ok.data()["dataSize"], r#"{"ok":true}"#.len());
        assert!(ok.data().get("data").is_none());

        let failed = logger
            .log_response("/api/rooms", "POST", 502, &body, Duration::from_millis(900))
            .unwrap();
        assert_eq!(failed.level(), LogLevel::Error);
        assert_eq!(failed.message(), "API response failed");
        assert_eq!(failed.data()["data"]["ok"], true);
        assert_eq!(failed.data()["duration"], "900ms");
    }

    #[test]
    fn test_log_page_view_uses_current_page_as_referrer() {
        let logger = logger();
        let entry = logger
            .log_page_view("pages/room/detail", log_data! { "id" => "1204" })
            .unwrap();
        assert_eq!(entry.data()["path"], "pages/room/detail");
        assert_eq!(entry.data()["query"]["id"], "1204");
        assert_eq!(entry.data()["referrer"], "pages/room/list");
    }

    #[test]
    fn test_log_user_action_flattens_data() {
        let logger = logger();
        let entry = logger
            .log_user_action("tap", "book-button", log_data! { "roomId" => 1204 })
            .unwrap();
        assert_eq!(entry.data()["action"], "tap");
        assert_eq!(entry.data()["target"], "book-button");
        assert_eq!(entry.data()["roomId"], 1204);
    }

    #[test]
    fn test_log_performance_default_unit() {
        let logger = logger();
        let entry = logger.log_performance("first-paint", 412.5, None).unwrap();
        assert_eq!(entry.data()["unit"], "ms");
        assert_eq!(entry.data()["value"], 412.5);

        let entry = logger.log_performance("bundle", 2.4, Some("MB")).unwrap();
        assert_eq!(entry.data()["unit"], "MB");
    }
}
