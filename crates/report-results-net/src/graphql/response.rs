//! GraphQL response types.

use std::fmt;
use std::time::Duration;

use report_results_core::{FlatMap, parse_document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NetworkError, Result};

/// A GraphQL error returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    /// The error message.
    pub message: String,

    /// Locations in the document where the error occurred.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<GraphQLLocation>,

    /// Path to the field that caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,

    /// Additional error metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref path) = self.path {
            write!(f, " (at ")?;
            for (i, segment) in path.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                match segment {
                    PathSegment::Field(name) => write!(f, "{}", name)?,
                    PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphQLError {}

/// A location in a GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLLocation {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

/// A segment in an error path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A field name.
    Field(String),
    /// An array index.
    Index(usize),
}

/// The typed GraphQL response envelope: `{ data, errors, extensions }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// The data returned by the operation.
    #[serde(default)]
    pub data: Option<Value>,

    /// Errors that occurred during execution.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,

    /// Additional response metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl ResponseEnvelope {
    /// Check if the envelope contains errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the envelope has data and no errors.
    pub fn is_success(&self) -> bool {
        self.data.is_some() && self.errors.is_empty()
    }

    /// Get the first error, if any.
    pub fn first_error(&self) -> Option<&GraphQLError> {
        self.errors.first()
    }
}

/// The outcome of one GraphQL exchange.
///
/// Holds the HTTP status, the raw body text, the parsed document and its
/// flattened form. A response is returned whenever the body is a JSON
/// document, including for non-200 statuses; use [`http_error`] and
/// [`error_messages`] to inspect the two error levels separately.
///
/// [`http_error`]: GraphQLResponse::http_error
/// [`error_messages`]: GraphQLResponse::error_messages
#[derive(Debug, Clone)]
pub struct GraphQLResponse {
    status: u16,
    body: String,
    document: Value,
    flat: FlatMap,
    elapsed: Duration,
}

impl GraphQLResponse {
    /// Parse and flatten a response body.
    ///
    /// Fails with [`NetworkError::HttpStatus`] if the status is not 200 and the
    /// body is not JSON, or with [`NetworkError::MalformedResponse`] if the
    /// status is 200 and the body is not JSON.
    pub fn from_body(status: u16, body: String, elapsed: Duration) -> Result<Self> {
        let document = match parse_document(&body) {
            Ok(document) => document,
            Err(err) if status != 200 => {
                tracing::debug!(
                    target: report_results_core::logging::targets::GRAPHQL,
                    status,
                    error = %err,
                    "Non-JSON body on HTTP error"
                );
                return Err(NetworkError::HttpStatus {
                    status,
                    message: Some(body),
                });
            }
            Err(err) => {
                return Err(NetworkError::MalformedResponse {
                    status,
                    source: err,
                });
            }
        };
        let flat = FlatMap::from_value(&document);
        Ok(Self {
            status,
            body,
            document,
            flat,
            elapsed,
        })
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the HTTP status is 200.
    pub fn is_http_success(&self) -> bool {
        self.status == 200
    }

    /// The HTTP-level error, if the status is not 200.
    pub fn http_error(&self) -> Option<NetworkError> {
        (!self.is_http_success()).then(|| NetworkError::HttpStatus {
            status: self.status,
            message: self.first_error_message().map(str::to_string),
        })
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The parsed response document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The flattened response document.
    pub fn flat(&self) -> &FlatMap {
        &self.flat
    }

    /// Consume the response, returning the flattened document.
    pub fn into_flat(self) -> FlatMap {
        self.flat
    }

    /// Time from sending the request to having read the whole body.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The first GraphQL error message, stored at `/errors/0/message`.
    pub fn first_error_message(&self) -> Option<&str> {
        self.flat.first_error_message()
    }

    /// Every GraphQL error message, ordered by error index.
    pub fn error_messages(&self) -> Vec<&str> {
        self.flat.error_messages()
    }

    /// Check if the server reported any GraphQL error.
    pub fn has_graphql_errors(&self) -> bool {
        self.flat.has_graphql_errors()
    }

    /// Check if the status is 200 and no GraphQL error was reported.
    pub fn is_success(&self) -> bool {
        self.is_http_success() && !self.has_graphql_errors()
    }

    /// Decode the document as a typed [`ResponseEnvelope`].
    pub fn envelope(&self) -> Result<ResponseEnvelope> {
        Ok(serde_json::from_value(self.document.clone())?)
    }

    /// The raw body re-indented for display.
    pub fn pretty_body(&self) -> String {
        serde_json::to_string_pretty(&self.document).unwrap_or_else(|_| self.body.clone())
    }

    /// Convert errors to a Result.
    ///
    /// Returns `Err` with the HTTP status error if the status is not 200,
    /// otherwise with every GraphQL error message if there are any.
    pub fn into_result(self) -> Result<Self> {
        if let Some(err) = self.http_error() {
            return Err(err);
        }
        if self.has_graphql_errors() {
            let messages = self.error_messages().into_iter().map(String::from).collect();
            return Err(NetworkError::GraphQL { messages });
        }
        Ok(self)
    }
}
