//! Authentication domain types

mod provider;
mod types;

pub use provider::{
    ApiKeyPayload, ApiKeyProvider, AuthenticationProvider, UserPasswordPayload,
    UserPasswordProvider,
};
pub use types::AuthResponse;
