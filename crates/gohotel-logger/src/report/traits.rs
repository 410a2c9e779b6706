//! Transport trait and payload

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::error::ReportResult;
use crate::types::{DeviceInfo, LogEntry};

/// Body of a report request: `{"logs": [...], "deviceInfo": {...}}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub logs: Vec<Arc<LogEntry>>,
    pub device_info: DeviceInfo,
}

impl ReportPayload {
    pub fn new(logs: Vec<Arc<LogEntry>>, device_info: DeviceInfo) -> Self {
        Self { logs, device_info }
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}

/// Delivers report payloads to the remote ingestion endpoint
///
/// `Ok(())` means the endpoint accepted the batch. Any error is final: the
/// logger never retries.
#[async_trait]
pub trait LogTransport: Send + Sync {
    /// Transport name, for diagnostics
    fn name(&self) -> &str;

    /// POST `payload` to `path`
    async fn send(&self, path: &str, payload: &ReportPayload) -> ReportResult<()>;
}

/// Type alias for an Arc-wrapped transport
pub type SharedTransport = Arc<dyn LogTransport>;
