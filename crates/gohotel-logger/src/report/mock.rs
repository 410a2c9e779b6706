//! Mock transport for testing
//!
//! Records every payload instead of sending it, and can be switched into a
//! failing mode to exercise the logger's error paths without a network.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ReportError, ReportResult};
use super::traits::{LogTransport, ReportPayload};

/// How the mock answers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MockMode {
    /// Accept every payload
    #[default]
    Accept,
    /// Reject with a transport-level error
    Fail(String),
    /// Reject as if the endpoint answered with this HTTP status
    Status(u16),
}

/// A payload the mock received
#[derive(Debug, Clone)]
pub struct SentReport {
    pub path: String,
    pub payload: ReportPayload,
}

/// Mock transport
///
/// Attempts are recorded whether or not they succeed; [`MockTransport::delivered`]
/// only returns the accepted ones.
#[derive(Debug, Default)]
pub struct MockTransport {
    mode: Mutex<MockMode>,
    delay: Option<Duration>,
    attempts: Mutex<Vec<(SentReport, bool)>>,
}

impl MockTransport {
    /// A mock that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that fails every send with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.set_mode(MockMode::Fail(message.into()));
        mock
    }

    /// Wait this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Change how later sends are answered
    pub fn set_mode(&self, mode: MockMode) {
        *self.mode.lock() = mode;
    }

    /// Number of send attempts, successful or not
    pub fn call_count(&self) -> usize {
        self.attempts.lock().len()
    }

    /// Every attempt, oldest first
    pub fn attempts(&self) -> Vec<SentReport> {
        self.attempts.lock().iter().map(|(sent, _)| sent.clone()).collect()
    }

    /// Accepted payloads, oldest first
    pub fn delivered(&self) -> Vec<SentReport> {
        self.attempts
            .lock()
            .iter()
            .filter(|(_, accepted)| *accepted)
            .map(|(sent, _)| sent.clone())
            .collect()
    }

    /// The most recent attempt
    pub fn last(&self) -> Option<SentReport> {
        self.attempts.lock().last().map(|(sent, _)| sent.clone())
    }

    pub fn reset(&self) {
        self.attempts.lock().clear();
    }
}

#[async_trait]
impl LogTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, path: &str, payload: &ReportPayload) -> ReportResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mode = self.mode.lock().clone();
        let result = match mode {
            MockMode::Accept => Ok(()),
            MockMode::Fail(message) => Err(ReportError::Other(message)),
            MockMode::Status(status) => Err(ReportError::status(status, "mock rejection")),
        };

        let sent = SentReport {
            path: path.to_string(),
            payload: payload.clone(),
        };
        self.attempts.lock().push((sent, result.is_ok()));
        result
    }
}
