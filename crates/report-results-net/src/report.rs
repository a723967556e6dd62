//! Report lookups.
//!
//! [`ReportClient`] ties the pieces together: it holds the query document and
//! a configured [`GraphQLClient`], and turns a report number into a flattened
//! [`GraphQLResponse`].

use report_results_core::logging::targets;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::graphql::{GraphQLClient, GraphQLRequest, GraphQLResponse, block_on};

/// Looks up reports by number against one GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct ReportClient {
    client: GraphQLClient,
    query: String,
}

impl ReportClient {
    /// Create a client for `config`, sending `query` on every lookup.
    pub fn new(config: &ReportConfig, query: impl Into<String>) -> Result<Self> {
        let mut builder = GraphQLClient::builder(&config.endpoint).api_key(&config.api_key);
        if let Some(timeout) = config.timeout {
            builder = builder.request_timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, query))
    }

    /// Create a client around an already configured [`GraphQLClient`].
    pub fn with_client(client: GraphQLClient, query: impl Into<String>) -> Self {
        Self {
            client,
            query: query.into(),
        }
    }

    /// The query document sent on every lookup.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The payload that [`lookup`](Self::lookup) would POST for `report_number`.
    pub fn payload(&self, report_number: &str) -> GraphQLRequest {
        GraphQLRequest::report(self.query.as_str(), report_number)
    }

    /// Look up one report.
    ///
    /// Transport failures and non-JSON bodies are returned as `Err`. HTTP
    /// status and GraphQL errors are reported on the returned response.
    pub async fn lookup(&self, report_number: &str) -> Result<GraphQLResponse> {
        tracing::info!(target: targets::REPORT, report_number, "Looking up report");
        let response = self.client.execute(&self.payload(report_number)).await?;
        tracing::info!(
            target: targets::REPORT,
            report_number,
            status = response.status(),
            entries = response.flat().len(),
            elapsed_ms = response.elapsed().as_millis() as u64,
            "Report lookup finished"
        );
        Ok(response)
    }

    /// Blocking variant of [`lookup`](Self::lookup).
    ///
    /// Fails with [`NetworkError::BlockingInRuntime`](crate::NetworkError::BlockingInRuntime)
    /// when called from inside an async runtime; use [`lookup`](Self::lookup) there.
    pub fn lookup_blocking(&self, report_number: &str) -> Result<GraphQLResponse> {
        block_on(self.lookup(report_number))?
    }
}
