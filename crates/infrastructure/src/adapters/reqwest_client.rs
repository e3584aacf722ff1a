//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Response bodies are streamed, so large exports are never buffered whole.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::{Client, Method, Url};
use stitch_application::ports::{
    HttpClient, HttpClientError, HttpResponse, RequestOptions, ResponseBody,
};
use stitch_domain::{Headers, HttpMethod};
use tokio_util::io::StreamReader;
use tracing::trace;

use crate::settings::ClientSettings;

/// HTTP client implementation using reqwest.
///
/// Routes are resolved against the configured base URL. Clones share the
/// same connection pool.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    access_token: Option<String>,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client from settings.
    ///
    /// Configuration:
    /// - Connect and read timeout: `settings.timeout_secs`
    /// - User-Agent: `settings.user_agent`
    /// - TLS verification: enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// created.
    pub fn new(settings: &ClientSettings) -> Result<Self, HttpClientError> {
        let base_url = settings
            .base_url()
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        let timeout = settings.timeout();

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self::with_client(client, base_url, timeout))
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
            access_token: None,
        }
    }

    /// Returns a client that sends `access_token` as a bearer credential.
    #[must_use]
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..self.clone()
        }
    }

    /// Appends `path` (which may carry a query) to the base URL, keeping
    /// any path prefix the base URL has.
    fn resolve(&self, path: &str) -> Result<Url, HttpClientError> {
        let url = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
        Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            return HttpClientError::ConnectionFailed(error.to_string());
        }

        if error.is_builder() {
            if let Some(url) = error.url() {
                return HttpClientError::InvalidUrl(format!("{error}: {url}"));
            }
        }

        HttpClientError::Other(error.to_string())
    }

    fn collect_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        let mut collected = Headers::new();
        for (name, value) in headers {
            collected.append(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        collected
    }
}

impl std::fmt::Debug for ReqwestHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestHttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("authenticated", &self.access_token.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, HttpClientError> {
        let url = self.resolve(path)?;
        let timeout_ms = self.timeout_ms();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(method), url.clone());

        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        for header in &options.headers {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }

        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        trace!(%method, %url, "executing request");
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let headers = Self::collect_headers(response.headers());
        let stream = response.bytes_stream().map_err(io::Error::other);
        let body: ResponseBody = Box::pin(StreamReader::new(stream));

        Ok(HttpResponse::new(status, headers, body))
    }
}
