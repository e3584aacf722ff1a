//! Application error types

use stitch_domain::{DomainError, StatusCode};
use thiserror::Error;

use crate::error_response::ErrorResponse;
use crate::ports::HttpClientError;

/// Broad classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a response.
    Transport,
    /// The exchange completed but a body could not be produced or understood.
    Protocol,
    /// The service rejected the request.
    Service,
    /// An operation-specific condition.
    Domain,
}

/// Errors returned by [`crate::StitchClient`] operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed; passed through unchanged.
    #[error(transparent)]
    Transport(#[from] HttpClientError),

    /// The request payload could not be serialized.
    #[error("failed to serialize request payload: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The import query string could not be encoded.
    #[error("failed to encode query string: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] std::io::Error),

    /// A success response carried a body of the wrong shape.
    #[error("failed to decode response body: {0}")]
    Protocol(#[source] serde_json::Error),

    /// The service answered with a non-success status.
    #[error(transparent)]
    Service(#[from] ErrorResponse),

    /// Login was rejected.
    #[error("{status}: failed to authenticate: {source}")]
    Authentication {
        /// Status returned by the login route.
        status: StatusCode,
        /// Normalized error body.
        #[source]
        source: ErrorResponse,
    },

    /// The export response carried an unparseable `Content-Disposition`.
    #[error("invalid Content-Disposition header: {0}")]
    ContentDisposition(#[from] DomainError),

    /// The export response named no file.
    #[error("the app export response did not specify a filename")]
    ExportMissingFilename,

    /// No group visible to the user holds an app with this client app id.
    #[error("unable to find app with ID: {0:?}")]
    AppNotFound(String),
}

impl ClientError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Serialization(_) | Self::Query(_) | Self::BodyRead(_) | Self::Protocol(_) => {
                ErrorKind::Protocol
            }
            Self::Service(_) | Self::Authentication { .. } => ErrorKind::Service,
            Self::ContentDisposition(_) | Self::ExportMissingFilename | Self::AppNotFound(_) => {
                ErrorKind::Domain
            }
        }
    }

    /// Returns the normalized service error, if the service rejected the request.
    #[must_use]
    pub const fn service_error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Service(source) | Self::Authentication { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
