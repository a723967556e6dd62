//! Networking module for report-results.
//!
//! This crate performs one GraphQL exchange and hands back the response in
//! flattened form:
//!
//! - **Request**: `{ "query": ..., "variables": { "ReportNumber": ... } }`, POSTed
//!   with the API key as the raw `Authorization` header
//! - **Response**: the body is read as text, parsed, and flattened into a
//!   [`FlatMap`] of path → value
//! - **Errors**: transport failures, malformed bodies, HTTP status errors and
//!   GraphQL errors are all distinguishable
//!
//! # Report Lookup
//!
//! ```ignore
//! use report_results_net::{ReportClient, ReportConfig};
//!
//! let config = ReportConfig::from_env()?;
//! let query = ReportConfig::load_query("report_results.graphql")?;
//! let client = ReportClient::new(&config, query)?;
//!
//! let response = client.lookup("1206489210").await?;
//!
//! if let Some(err) = response.http_error() {
//!     eprintln!("{err}");
//! }
//! for message in response.error_messages() {
//!     eprintln!("Error processing request: {message}");
//! }
//! for (path, value) in response.flat().iter() {
//!     println!("{path}: {value}");
//! }
//! ```
//!
//! ## Status Policy
//!
//! | status | body     | result                                     |
//! |--------|----------|--------------------------------------------|
//! | 200    | JSON     | `Ok`, inspect GraphQL errors               |
//! | 200    | not JSON | `Err(NetworkError::MalformedResponse)`     |
//! | other  | JSON     | `Ok`, `http_error()` is `Some`             |
//! | other  | not JSON | `Err(NetworkError::HttpStatus)`            |
//!
//! ## Blocking Use
//!
//! `lookup_blocking` and `execute_blocking` drive the same request on a
//! private single-threaded runtime for callers without one. On a thread that
//! already runs a tokio runtime they return `NetworkError::BlockingInRuntime`.

mod config;
mod error;
pub mod graphql;
mod http;
mod report;

pub use config::{API_KEY_VAR, ENDPOINT_VAR, ReportConfig};
pub use error::{ConfigError, NetworkError, Result};
pub use report::ReportClient;

// Re-export commonly used types at the crate root
pub use graphql::{GraphQLClient, GraphQLRequest, GraphQLResponse};
pub use report_results_core::FlatMap;
