//! GraphQL client implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use report_results_core::logging::targets;

use super::request::GraphQLRequest;
use super::response::GraphQLResponse;
use crate::error::{NetworkError, Result};
use crate::http::{Authentication, HttpClient};

/// Builder for creating a GraphQL client.
pub struct GraphQLClientBuilder {
    http_url: String,
    default_headers: Vec<(String, String)>,
    auth: Option<Authentication>,
    request_timeout: Option<Duration>,
}

impl GraphQLClientBuilder {
    /// Create a new builder with the specified GraphQL endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http_url: url.into(),
            default_headers: Vec::new(),
            auth: None,
            request_timeout: None,
        }
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Send `key` verbatim as the `Authorization` header, without a scheme.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.auth = Some(Authentication::ApiKey(key.into()));
        self
    }

    /// Set bearer token authentication.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(Authentication::Bearer(token.into()));
        self
    }

    /// Set the request timeout for HTTP operations.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the GraphQL client.
    pub fn build(self) -> Result<GraphQLClient> {
        url::Url::parse(&self.http_url)?;

        let mut builder = HttpClient::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let mut default_headers = http::HeaderMap::new();
        for (name, value) in self.default_headers {
            let name = http::HeaderName::try_from(name)?;
            let value = http::HeaderValue::try_from(value)?;
            default_headers.insert(name, value);
        }

        if let Some(auth) = &self.auth {
            // Surface a malformed key now instead of on the first request.
            auth.header_value()?;
        }

        Ok(GraphQLClient {
            inner: Arc::new(GraphQLClientInner {
                http_client,
                http_url: self.http_url,
                default_headers,
                auth: self.auth,
            }),
        })
    }
}

struct GraphQLClientInner {
    http_client: HttpClient,
    http_url: String,
    default_headers: http::HeaderMap,
    auth: Option<Authentication>,
}

/// A GraphQL client that returns flattened responses.
///
/// # Example
///
/// ```ignore
/// use report_results_net::graphql::{GraphQLClient, GraphQLRequest};
///
/// let client = GraphQLClient::builder("https://api.example.com/graphql")
///     .api_key("my-key")
///     .build()?;
///
/// let request = GraphQLRequest::report(query, "1206489210");
/// let response = client.execute(&request).await?;
/// for (path, value) in response.flat().iter() {
///     println!("{path}: {value}");
/// }
/// ```
#[derive(Clone)]
pub struct GraphQLClient {
    inner: Arc<GraphQLClientInner>,
}

impl GraphQLClient {
    /// Create a new builder for configuring a GraphQL client.
    pub fn builder(url: impl Into<String>) -> GraphQLClientBuilder {
        GraphQLClientBuilder::new(url)
    }

    /// Get the HTTP endpoint URL.
    pub fn url(&self) -> &str {
        &self.inner.http_url
    }

    /// Check if requests carry an `Authorization` header.
    pub fn has_auth(&self) -> bool {
        self.inner.auth.is_some()
    }

    /// POST a GraphQL request and flatten the response.
    ///
    /// The whole body is read as text before it is parsed. A non-200 status
    /// with a JSON body still yields `Ok`; see [`GraphQLResponse`] for how the
    /// HTTP-level and GraphQL-level errors are reported.
    pub async fn execute(&self, request: &GraphQLRequest) -> Result<GraphQLResponse> {
        let body = request.to_json()?;

        let mut req = self
            .inner
            .http_client
            .post(&self.inner.http_url)
            .headers(self.inner.default_headers.clone())
            .header(http::header::CONTENT_TYPE, "application/json")
            .header(http::header::ACCEPT, "application/json");

        if let Some(auth) = &self.inner.auth {
            req = req.auth(auth.clone());
        }

        tracing::debug!(
            target: targets::GRAPHQL,
            url = %self.inner.http_url,
            payload_len = body.len(),
            operation = request.operation_name.as_deref(),
            "Posting GraphQL request"
        );

        let started = Instant::now();
        let response = req.text(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let elapsed = started.elapsed();

        tracing::debug!(
            target: targets::GRAPHQL,
            status,
            body_len = text.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Received GraphQL response"
        );

        let response = GraphQLResponse::from_body(status, text, elapsed)?;

        if !response.is_http_success() {
            tracing::warn!(target: targets::GRAPHQL, status, "HTTP error returned by the API");
        }
        if response.has_graphql_errors() {
            tracing::warn!(
                target: targets::GRAPHQL,
                errors = response.error_messages().len(),
                first = response.first_error_message(),
                "GraphQL errors in response"
            );
        }
        tracing::trace!(target: targets::GRAPHQL, entries = response.flat().len(), "Flattened response");

        Ok(response)
    }

    /// Blocking variant of [`execute`](Self::execute).
    ///
    /// Drives the request on a private single-threaded runtime. Called from
    /// inside an async runtime it fails with
    /// [`NetworkError::BlockingInRuntime`](crate::NetworkError::BlockingInRuntime).
    pub fn execute_blocking(&self, request: &GraphQLRequest) -> Result<GraphQLResponse> {
        block_on(self.execute(request))?
    }
}

/// Run a future to completion on a fresh current-thread runtime.
///
/// Refuses to run on a thread that already has a runtime, where tokio would
/// panic.
pub(crate) fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(NetworkError::BlockingInRuntime);
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

impl std::fmt::Debug for GraphQLClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLClient")
            .field("http_url", &self.inner.http_url)
            .field("http_client", &self.inner.http_client)
            .field("auth", &self.inner.auth)
            .finish()
    }
}
