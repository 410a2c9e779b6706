//! HTTP transport backed by reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

use super::error::{ReportError, ReportResult};
use super::traits::{LogTransport, ReportPayload};

/// Posts payloads as JSON to `<api_base><report_url>`
///
/// # Example
///
/// ```no_run
/// use gohotel_logger::report::HttpTransport;
///
/// let transport = HttpTransport::new("https://api.gohotel.example/api")
///     .with_bearer_token("token-from-login");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_base: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a transport for the API rooted at `api_base`
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    /// Create a transport sharing an existing client
    pub fn with_client(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every report
    pub fn with_bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.with_header(AUTHORIZATION, &value)
    }

    /// Send an extra header with every report
    ///
    /// Values that are not valid header text are ignored.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Abort requests that take longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Resolve a report path against the API base
    ///
    /// Absolute `http(s)://` paths are used as given.
    pub fn resolve(&self, path: &str) -> ReportResult<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }
        if self.api_base.is_empty() {
            return Err(ReportError::InvalidUrl(format!(
                "relative path {} with no API base",
                path
            )));
        }
        Ok(format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

#[async_trait]
impl LogTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, path: &str, payload: &ReportPayload) -> ReportResult<()> {
        let url = self.resolve(path)?;

        let mut request = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(payload);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::status(status.as_u16(), body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let transport = HttpTransport::new("https://api.gohotel.example/api/");
        assert_eq!(
            transport.resolve("/logs/report").unwrap(),
            "https://api.gohotel.example/api/logs/report"
        );
        assert_eq!(
            transport.resolve("logs/report").unwrap(),
            "https://api.gohotel.example/api/logs/report"
        );
    }

    #[test]
    fn test_resolve_absolute_path() {
        let transport = HttpTransport::new("https://api.gohotel.example/api");
        assert_eq!(
            transport.resolve("https://collector.example/ingest").unwrap(),
            "https://collector.example/ingest"
        );
    }

    #[test]
    fn test_resolve_without_base_fails() {
        let transport = HttpTransport::new("");
        assert!(matches!(
            transport.resolve("/logs/report"),
            Err(ReportError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_headers() {
        let transport = HttpTransport::new("http://localhost:8080/api")
            .with_bearer_token("abc")
            .with_header(HeaderName::from_static("x-client"), "uniapp")
            .with_header(HeaderName::from_static("x-bad"), "line\nbreak")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(transport.headers[AUTHORIZATION], "Bearer abc");
        assert_eq!(transport.headers["x-client"], "uniapp");
        assert!(!transport.headers.contains_key("x-bad"));
        assert_eq!(transport.timeout, Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        // Port 9 (discard) on localhost is not expected to speak HTTP
        let transport = HttpTransport::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
        let payload = ReportPayload::new(Vec::new(), Default::default());
        assert!(transport.send("/logs/report", &payload).await.is_err());
    }

    /// Answer one request with `status` and hand back the raw request text
    async fn serve_once(status: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                raw.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= split + 4 + length || n == 0 {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let reply = format!("HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n", status);
            socket.write_all(reply.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });
        (base, handle)
    }

    #[tokio::test]
    async fn test_send_posts_json_payload() {
        use crate::types::{DeviceInfo, LogEntry, LogLevel};
        use std::sync::Arc;

        let (base, server) = serve_once("200 OK").await;
        let transport = HttpTransport::new(base).with_timeout(Duration::from_secs(5));
        let device = DeviceInfo {
            model: Some("Pixel 7".to_string()),
            ..Default::default()
        };
        let payload = ReportPayload::new(vec![Arc::new(LogEntry::new(LogLevel::Error, "boom"))], device);

        transport.send("/logs/report", &payload).await.unwrap();

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /logs/report "));
        assert!(lower.contains("content-type: application/json"));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["logs"][0]["message"], "boom");
        assert_eq!(json["logs"][0]["levelValue"], 3);
        assert_eq!(json["deviceInfo"]["model"], "Pixel 7");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let (base, server) = serve_once("503 Service Unavailable").await;
        let transport = HttpTransport::new(base).with_timeout(Duration::from_secs(5));
        let payload = ReportPayload::new(Vec::new(), Default::default());

        let result = transport.send("/logs/report", &payload).await;
        assert!(matches!(result, Err(ReportError::Status { status: 503, .. })));
        server.await.unwrap();
    }
}
