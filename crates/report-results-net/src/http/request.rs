//! POST request builder.

use report_results_core::logging::targets;

use super::client::{Authentication, HttpClient};
use super::response::HttpResponse;
use crate::error::{NetworkError, Result};

/// A POST request being assembled.
///
/// Header errors are held back and returned from [`send`](Self::send), so the
/// builder chain never has to be interrupted.
pub struct HttpRequestBuilder {
    client: HttpClient,
    url: String,
    headers: http::HeaderMap,
    body: String,
    auth: Option<Authentication>,
    error: Option<NetworkError>,
}

impl HttpRequestBuilder {
    pub(crate) fn new(client: HttpClient, url: String) -> Self {
        Self {
            client,
            url,
            headers: http::HeaderMap::new(),
            body: String::new(),
            auth: None,
            error: None,
        }
    }

    /// Set one header, replacing any earlier value.
    pub fn header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Self {
        match (name.try_into(), value.try_into()) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                self.error.get_or_insert(NetworkError::InvalidHeader(
                    "Invalid header name or value".to_string(),
                ));
            }
        }
        self
    }

    /// Add every header in `headers`.
    pub fn headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Send `auth` as the `Authorization` header.
    pub fn auth(mut self, auth: Authentication) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set the body, sent as-is.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Send the request and wait for the response headers.
    ///
    /// The body is read separately through [`HttpResponse::text`].
    pub async fn send(self) -> Result<HttpResponse> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let url = url::Url::parse(&self.url)?;
        let mut headers = self.headers;
        if let Some(auth) = &self.auth {
            headers.insert(http::header::AUTHORIZATION, auth.header_value()?);
        }

        tracing::debug!(
            target: targets::HTTP,
            url = %url,
            headers = headers.len(),
            body_len = self.body.len(),
            "Sending POST request"
        );

        let response = self
            .client
            .reqwest_client()
            .post(url)
            .headers(headers)
            .body(self.body)
            .send()
            .await?;
        Ok(HttpResponse::from_reqwest(response))
    }
}
