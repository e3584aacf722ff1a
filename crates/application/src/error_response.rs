//! Normalization of admin API error bodies.
//!
//! The service usually answers failures with `{"error": "..."}`, but
//! proxies and older endpoints may send plain text or HTML. Both end up
//! as an [`ErrorResponse`] whose message is safe to show to a user.

use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

/// An error reported by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error: {message}")]
pub struct ErrorResponse {
    message: String,
}

impl ErrorResponse {
    /// Creates an error response with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Normalizes a buffered error body.
    ///
    /// A JSON object's `error` field becomes the message, with a missing or
    /// `null` field read as empty. Anything else is used verbatim.
    #[must_use]
    pub fn from_bytes(body: &[u8]) -> Self {
        decode_error_field(body)
            .map_or_else(|| Self::new(String::from_utf8_lossy(body)), Self::new)
    }

    /// Reads an error body to the end and normalizes it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error only if the body cannot be read.
    pub async fn from_reader<R>(mut reader: R) -> std::io::Result<Self>
    where
        R: AsyncRead + Unpin,
    {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await?;
        Ok(Self::from_bytes(&buffer))
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Extracts the `error` field of a JSON object body.
///
/// A top-level `null` decodes like an empty object.
fn decode_error_field(body: &[u8]) -> Option<String> {
    let object = match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(object) => object,
        Value::Null => return Some(String::new()),
        _ => return None,
    };
    match object.get("error") {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(message)) => Some(message.clone()),
        Some(_) => None,
    }
}
