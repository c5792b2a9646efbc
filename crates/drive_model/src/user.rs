//! Account models and auth request bodies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Signed-in account.
pub struct User {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Linked Google account id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub is_email_verified: bool,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Payload returned by login, register and email verification.
pub struct AuthResponse {
    /// Signed-in account.
    pub user: User,
    /// Short-lived access token.
    pub access_token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Body of `POST /auth/login`.
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /auth/register`.
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Repeated password.
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Body of the forgot-password and resend-verification endpoints.
pub struct EmailRequest {
    /// Account email.
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /auth/reset-password/{token}`.
pub struct ResetPasswordRequest {
    /// New password.
    pub password: String,
    /// Repeated new password.
    pub confirm_password: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn auth_response_reads_camel_case_tokens() {
        let response: AuthResponse = serde_json::from_value(json!({
            "user": {
                "_id": "u1",
                "name": "Ada",
                "email": "ada@example.com",
                "isEmailVerified": true
            },
            "accessToken": "a",
            "refreshToken": "r"
        }))
        .expect("deserialize");
        assert_eq!(response.user.name, "Ada");
        assert!(response.user.is_email_verified);
        assert_eq!(response.access_token, "a");
    }

    #[test]
    fn register_request_uses_confirm_password_key() {
        let body = RegisterRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "hunter22".into(),
            confirm_password: "hunter22".into(),
        };
        let value = serde_json::to_value(body).expect("serialize");
        assert_eq!(value["confirmPassword"], json!("hunter22"));
    }
}
