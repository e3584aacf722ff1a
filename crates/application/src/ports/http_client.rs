//! HTTP Client port

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use stitch_domain::{Headers, HttpMethod, StatusCode};
use thiserror::Error;
use tokio::io::AsyncRead;

/// Readable response body.
///
/// Dropping the body closes it and releases the underlying connection.
pub type ResponseBody = Pin<Box<dyn AsyncRead + Send>>;

/// Options for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Raw request body; `None` sends no body.
    pub body: Option<Vec<u8>>,
    /// Extra request headers.
    pub headers: Headers,
}

impl RequestOptions {
    /// Creates options with no body and no headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a request header, replacing previous values.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A response received from the transport.
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: Headers,
    /// Response body, owned by whoever holds the response.
    pub body: ResponseBody,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, headers: Headers, body: ResponseBody) -> Self {
        Self {
            status: status.into(),
            headers,
            body,
        }
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Errors raised when a request could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// A connection to the server could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request was cancelled.
    #[error("request cancelled")]
    Cancelled,

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests against the admin API.
///
/// Implementations resolve `path` against their configured base URL and
/// own connection pooling, TLS and timeouts.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes a request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response was received.
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, HttpClientError>;
}
