//! HTTP transport for the GraphQL client.
//!
//! A thin layer over `reqwest`. Requests are always POSTs with a text body;
//! responses are read back whole as text.

mod client;
mod request;
mod response;

pub use client::{Authentication, HttpClient};
