//! HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use super::request::HttpRequestBuilder;
use crate::error::{NetworkError, Result};

/// Configuration for the HTTP client.
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Whole-request timeout, from connect to the last body byte.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            user_agent: format!("report-results/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for an [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Build the HTTP client.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder().user_agent(&self.config.user_agent);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let client = builder
            .build()
            .map_err(|e| NetworkError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(HttpClient {
            inner: Arc::new(HttpClientInner {
                client,
                config: self.config,
            }),
        })
    }
}

struct HttpClientInner {
    client: reqwest::Client,
    config: HttpClientConfig,
}

/// The connection pool GraphQL requests are sent through.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl HttpClient {
    /// Create a builder with the default timeouts.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// Start a POST request to `url`.
    pub fn post(&self, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(self.clone(), url.into())
    }

    pub(crate) fn reqwest_client(&self) -> &reqwest::Client {
        &self.inner.client
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Credentials for the `Authorization` header.
#[derive(Clone)]
pub enum Authentication {
    /// Bearer token authentication (`Authorization: Bearer <token>`).
    Bearer(String),
    /// Raw API key sent as the whole `Authorization` header value.
    ApiKey(String),
}

impl Authentication {
    /// The `Authorization` header value for these credentials.
    ///
    /// The returned value is marked sensitive so it is redacted from `Debug`
    /// output.
    pub fn header_value(&self) -> Result<http::HeaderValue> {
        let raw = match self {
            Self::Bearer(token) => format!("Bearer {token}"),
            Self::ApiKey(key) => key.clone(),
        };
        let mut value = http::HeaderValue::from_str(&raw)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}
