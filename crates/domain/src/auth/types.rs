//! Authentication response types

use serde::{Deserialize, Serialize};

/// Session data returned by a successful provider login.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthResponse {
    /// Short-lived token sent as a bearer credential.
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub access_token: String,
    /// Long-lived token used to obtain new access tokens.
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub refresh_token: String,
    /// Id of the authenticated user.
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub user_id: String,
    /// Id of the device the session was opened for.
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub device_id: String,
}

// Tokens stay out of logs and panic messages.
impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("device_id", &self.device_id)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_auth_response() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"access_token": "at", "refresh_token": "rt", "user_id": "u1", "device_id": "d1"}"#,
        )
        .unwrap();

        assert_eq!(response.access_token, "at");
        assert_eq!(response.refresh_token, "rt");
        assert_eq!(response.user_id, "u1");
    }

    #[test]
    fn test_null_tokens_decode_as_empty() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"access_token": "at", "refresh_token": null, "device_id": null}"#)
                .unwrap();

        assert_eq!(response.access_token, "at");
        assert_eq!(response.refresh_token, "");
        assert_eq!(response.device_id, "");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let response = AuthResponse {
            access_token: "secret-access".to_string(),
            refresh_token: "secret-refresh".to_string(),
            ..AuthResponse::default()
        };
        let debug = format!("{response:?}");
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
    }
}
