//! Remote delivery of log batches
//!
//! The logger hands a [`ReportPayload`] to a [`LogTransport`]; what happens on
//! the wire is the transport's business.
//!
//! - `HttpTransport`: JSON POST via reqwest
//! - `MockTransport`: records payloads, for tests

mod error;
mod traits;
mod http;
mod mock;

pub use error::{ReportError, ReportResult};
pub use traits::{LogTransport, ReportPayload, SharedTransport};
pub use http::HttpTransport;
pub use mock::{MockMode, MockTransport, SentReport};
