//! Domain error types

use thiserror::Error;

/// Errors raised while parsing a `Content-Disposition` header.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A header value carried no disposition or media type.
    #[error("no media type")]
    NoMediaType,

    /// The leading token was followed by something other than `/` or `;`.
    #[error("expected slash after first token")]
    ExpectedSlash,

    /// A subtype token was expected after `/`.
    #[error("expected token after slash")]
    ExpectedToken,

    /// A parameter was malformed.
    #[error("invalid media parameter")]
    InvalidMediaParameter,

    /// The same parameter appeared twice.
    #[error("duplicate parameter name: {0}")]
    DuplicateParameter(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
