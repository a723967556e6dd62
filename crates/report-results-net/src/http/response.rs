//! HTTP response wrapper.

use crate::error::Result;

/// A response whose body has not been read yet.
///
/// Reading the body consumes the response and releases the connection,
/// whether or not the read succeeds.
pub struct HttpResponse {
    inner: reqwest::Response,
}

impl HttpResponse {
    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        Self { inner: response }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Read the whole body as text.
    pub async fn text(self) -> Result<String> {
        Ok(self.inner.text().await?)
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status())
            .finish()
    }
}
