use serde::{Deserialize, Serialize};
use std::fmt;

/// Login credentials. Only used to build the request body; never persisted.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// Email address (or username, depending on the backend).
    pub email: String,

    /// Plain-text password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account creation request.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    /// The user's username.
    pub username: String,

    /// The user's email address.
    pub email: String,

    /// The user's password.
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public profile of the signed-in user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    /// Username when known, otherwise the email address.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.username.as_deref().or(self.email.as_deref())
    }
}

/// Response of `/api/login` and `/api/signup`.
///
/// Signup may succeed without issuing a token, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: "admin@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{credentials:?}");
        assert!(debug.contains("admin@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_signup_request_serializes_all_fields() {
        let request = SignupRequest {
            username: "writer".to_string(),
            email: "writer@example.com".to_string(),
            password: "secret".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["username"], "writer");
        assert_eq!(value["email"], "writer@example.com");
        assert_eq!(value["password"], "secret");
        assert!(!format!("{request:?}").contains("secret"));
    }

    #[test]
    fn test_auth_response_without_token() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"message":"Account created"}"#).unwrap();
        assert_eq!(response.token, None);
        assert_eq!(response.message.as_deref(), Some("Account created"));
    }

    #[test]
    fn test_auth_response_with_profile() {
        let json = r#"{"token":"abc","user":{"email":"a@b.c","id":9}}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token.as_deref(), Some("abc"));
        let user = response.user.unwrap();
        assert_eq!(user.display_name(), Some("a@b.c"));
    }
}
