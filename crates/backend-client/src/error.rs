//! Error types for the backend client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced when a request is built or issued.
///
/// Constructing a client never fails; every variant here is produced at
/// request time (or by explicit validation).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base address joined with the request path is not a valid URL
    #[error("Invalid request URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// Backend answered 2xx but reported `success: false`
    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    /// Configuration did not pass validation
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;
