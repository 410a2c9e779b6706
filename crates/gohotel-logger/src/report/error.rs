//! Report error types

use thiserror::Error;

/// Errors that can occur while delivering logs to the ingestion endpoint
#[derive(Error, Debug)]
pub enum ReportError {
    /// Network/HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status
    #[error("Ingestion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Report URL could not be resolved
    #[error("Invalid report URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Other(String),
}

impl ReportError {
    /// Create a status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
