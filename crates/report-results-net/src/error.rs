//! Error types for the networking module.

use std::path::PathBuf;

/// Network-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// HTTP request failed for a reason other than connect or timeout.
    #[error("HTTP request error: {0}")]
    Request(String),
    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Request timed out.
    #[error("Request timed out")]
    Timeout,
    /// Connection refused or failed (unreachable host, DNS failure).
    #[error("Connection error: {0}")]
    Connection(String),
    /// Invalid header name or value.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
    /// A blocking call was made on a thread that is already driving an async runtime.
    #[error("Blocking call made from within an async runtime; use the async method instead")]
    BlockingInRuntime,
    /// HTTP status other than 200.
    #[error("{}", http_status_message(.status, .message))]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// Optional error message from the response body.
        message: Option<String>,
    },
    /// The server answered but the body is not a JSON document.
    #[error("Malformed response (HTTP {status}): {source}")]
    MalformedResponse {
        /// The HTTP status code.
        status: u16,
        /// The parse failure.
        #[source]
        source: report_results_core::FlattenError,
    },
    /// The server returned one or more GraphQL errors.
    #[error("GraphQL error: {}", .messages.join("; "))]
    GraphQL {
        /// Every `/errors/<N>/message`, in index order.
        messages: Vec<String>,
    },
}

fn http_status_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => format!("HTTP {status}: {msg}"),
        _ => format!("HTTP {status}"),
    }
}

impl NetworkError {
    /// Check if the server could not be reached at all.
    ///
    /// Distinguishes "could not reach the server" from "the server responded
    /// with an error".
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout | Self::Request(_))
    }

    /// The HTTP status code, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } | Self::MalformedResponse { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<std::io::Error> for NetworkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for NetworkError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for NetworkError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

/// A specialized Result type for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Configuration errors, raised before any request is made.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("You must provide environment variable {0}")]
    MissingVariable(&'static str),

    /// The GraphQL query document could not be read.
    #[error("Cannot read the GraphQL query file at '{path}': {source}")]
    QueryFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
