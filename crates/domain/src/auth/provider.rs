//! Authentication provider trait and built-in providers.
//!
//! A provider knows which login route it targets and what credential
//! payload that route expects.

use serde::Serialize;

/// Trait for authentication providers.
pub trait AuthenticationProvider {
    /// Credential payload sent as the login request body.
    type Payload: Serialize;

    /// Builds the credential payload.
    fn payload(&self) -> Self::Payload;

    /// Name of the provider, used in the login route.
    fn provider_type(&self) -> &str;
}

/// Logs in with an Atlas / Cloud programmatic API key.
#[derive(Clone)]
pub struct ApiKeyProvider {
    username: String,
    api_key: String,
}

/// Payload for [`ApiKeyProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyPayload {
    /// Cloud username.
    pub username: String,
    /// Cloud API key.
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

impl ApiKeyProvider {
    /// Provider name used by the admin API.
    pub const PROVIDER_TYPE: &'static str = "mongodb-cloud";

    /// Creates a provider for the given credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }
}

impl AuthenticationProvider for ApiKeyProvider {
    type Payload = ApiKeyPayload;

    fn payload(&self) -> Self::Payload {
        ApiKeyPayload {
            username: self.username.clone(),
            api_key: self.api_key.clone(),
        }
    }

    fn provider_type(&self) -> &str {
        Self::PROVIDER_TYPE
    }
}

impl std::fmt::Debug for ApiKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyProvider")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Logs in with a username and password.
#[derive(Clone)]
pub struct UserPasswordProvider {
    username: String,
    password: String,
}

/// Payload for [`UserPasswordProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPasswordPayload {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl UserPasswordProvider {
    /// Provider name used by the admin API.
    pub const PROVIDER_TYPE: &'static str = "local-userpass";

    /// Creates a provider for the given credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl AuthenticationProvider for UserPasswordProvider {
    type Payload = UserPasswordPayload;

    fn payload(&self) -> Self::Payload {
        UserPasswordPayload {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    fn provider_type(&self) -> &str {
        Self::PROVIDER_TYPE
    }
}

impl std::fmt::Debug for UserPasswordProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPasswordProvider")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_api_key_payload_shape() {
        let provider = ApiKeyProvider::new("alice", "key-123");
        let json = serde_json::to_value(provider.payload()).unwrap();

        assert_eq!(provider.provider_type(), "mongodb-cloud");
        assert_eq!(
            json,
            serde_json::json!({"username": "alice", "apiKey": "key-123"})
        );
    }

    #[test]
    fn test_user_password_payload_shape() {
        let provider = UserPasswordProvider::new("bob", "hunter2");
        let json = serde_json::to_value(provider.payload()).unwrap();

        assert_eq!(provider.provider_type(), "local-userpass");
        assert_eq!(
            json,
            serde_json::json!({"username": "bob", "password": "hunter2"})
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", ApiKeyProvider::new("alice", "key-123"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("key-123"));
    }
}
