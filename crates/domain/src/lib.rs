//! Stitch Domain - Core types
//!
//! This crate defines the domain model for the Stitch admin client.
//! All types here are pure Rust with no I/O dependencies.

pub mod app;
pub mod auth;
pub mod content_disposition;
pub mod error;
mod nullable;
pub mod profile;
pub mod request;
pub mod response;

pub use app::{App, find_app_by_client_app_id};
pub use auth::{
    ApiKeyPayload, ApiKeyProvider, AuthResponse, AuthenticationProvider, UserPasswordPayload,
    UserPasswordProvider,
};
pub use content_disposition::ContentDisposition;
pub use error::{DomainError, DomainResult};
pub use profile::{Role, UserProfile};
pub use request::{Header, Headers, HttpMethod};
pub use response::StatusCode;
