//! GraphQL client for report lookups.
//!
//! This module provides:
//! - The request payload, `{ "query": ..., "variables": { ... } }`
//! - A client that POSTs the payload and flattens the response body
//! - Error inspection at both the HTTP level and the GraphQL level
//!
//! # Example
//!
//! ```ignore
//! use report_results_net::graphql::{GraphQLClient, GraphQLRequest};
//!
//! let client = GraphQLClient::builder("https://api.example.com/graphql")
//!     .api_key(key)
//!     .build()?;
//!
//! let request = GraphQLRequest::report(query, "1206489210");
//! let response = client.execute(&request).await?;
//!
//! if let Some(message) = response.first_error_message() {
//!     eprintln!("Error processing request: {message}");
//! }
//! print!("{}", response.flat());
//! ```

mod client;
mod request;
mod response;

pub(crate) use client::block_on;
pub use client::{GraphQLClient, GraphQLClientBuilder};
pub use request::{GraphQLRequest, REPORT_NUMBER_VARIABLE};
pub use response::{GraphQLError, GraphQLLocation, GraphQLResponse, PathSegment, ResponseEnvelope};
