//! Report lookup configuration.
//!
//! Configuration is always passed explicitly into [`ReportClient::new`]; only
//! [`ReportConfig::from_env`] touches process state.
//!
//! [`ReportClient::new`]: crate::ReportClient::new

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the GraphQL endpoint URL.
pub const ENDPOINT_VAR: &str = "REPORT_RESULTS_API_ENDPOINT";
/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "REPORT_RESULTS_API_KEY";

/// Endpoint and credentials for the report results API.
#[derive(Clone)]
pub struct ReportConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// API key, sent verbatim as the `Authorization` header.
    pub api_key: String,
    /// Request timeout. `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
}

impl ReportConfig {
    /// Create a configuration from explicit values.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read the endpoint and key from [`ENDPOINT_VAR`] and [`API_KEY_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the endpoint and key through `lookup`.
    ///
    /// Unset and empty values are both reported as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVariable(name))
        };
        Ok(Self::new(require(ENDPOINT_VAR)?, require(API_KEY_VAR)?))
    }

    /// Load a GraphQL query document from disk.
    pub fn load_query(path: impl AsRef<Path>) -> Result<String, ConfigError> {
        let path = path.as_ref();
        std::fs::read_to_string(path).map_err(|source| ConfigError::QueryFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
