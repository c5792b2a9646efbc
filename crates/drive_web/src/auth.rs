//! Backend-backed [`AuthApi`] implementation and the Google sign-in redirect.

use drive_api::{ApiError, AuthApi, DriveFuture, Endpoint};
use drive_model::{
    AuthResponse, EmailRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, User,
};
use serde::Deserialize;

use crate::transport::{send, HttpConfig, RequestBody};

#[derive(Debug, Deserialize)]
struct MeData {
    user: User,
}

#[derive(Debug, Clone)]
/// Account service talking to the OrbitDrive REST API with cookie credentials.
pub struct HttpAuthApi {
    config: HttpConfig,
}

impl HttpAuthApi {
    /// Creates a service for the given backend.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }
}

/// URL of the backend's Google OAuth entry point.
pub fn google_login_url(config: &HttpConfig) -> String {
    config.url(&Endpoint::google_login())
}

/// Navigates the current tab to the Google OAuth entry point.
///
/// # Errors
///
/// Returns an error when the window is unavailable or navigation is rejected.
pub fn start_google_login(config: &HttpConfig) -> Result<(), String> {
    let url = google_login_url(config);

    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        window
            .location()
            .set_href(&url)
            .map_err(|e| format!("navigation to {url} failed: {e:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Err(format!("browser navigation unavailable for {url}"))
    }
}

impl AuthApi for HttpAuthApi {
    fn register<'a>(
        &'a self,
        request: &'a RegisterRequest,
    ) -> DriveFuture<'a, Result<AuthResponse, ApiError>> {
        Box::pin(async move {
            let body = RequestBody::json(request)?;
            send(&self.config, &Endpoint::register(), body)
                .await?
                .data()
        })
    }

    fn login<'a>(
        &'a self,
        request: &'a LoginRequest,
    ) -> DriveFuture<'a, Result<AuthResponse, ApiError>> {
        Box::pin(async move {
            let body = RequestBody::json(request)?;
            send(&self.config, &Endpoint::login(), body).await?.data()
        })
    }

    fn logout<'a>(&'a self) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            send(&self.config, &Endpoint::logout(), RequestBody::Empty)
                .await?
                .ack()
        })
    }

    fn verify_email<'a>(
        &'a self,
        token: &'a str,
    ) -> DriveFuture<'a, Result<AuthResponse, ApiError>> {
        Box::pin(async move {
            send(
                &self.config,
                &Endpoint::verify_email(token),
                RequestBody::Empty,
            )
            .await?
            .data()
        })
    }

    fn resend_verification_email<'a>(
        &'a self,
        request: &'a EmailRequest,
    ) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let body = RequestBody::json(request)?;
            send(&self.config, &Endpoint::resend_verification_email(), body)
                .await?
                .ack()
        })
    }

    fn forgot_password<'a>(
        &'a self,
        request: &'a EmailRequest,
    ) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let body = RequestBody::json(request)?;
            send(&self.config, &Endpoint::forgot_password(), body)
                .await?
                .ack()
        })
    }

    fn reset_password<'a>(
        &'a self,
        token: &'a str,
        request: &'a ResetPasswordRequest,
    ) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let body = RequestBody::json(request)?;
            send(&self.config, &Endpoint::reset_password(token), body)
                .await?
                .ack()
        })
    }

    fn me<'a>(&'a self) -> DriveFuture<'a, Result<User, ApiError>> {
        Box::pin(async move {
            send(&self.config, &Endpoint::me(), RequestBody::Empty)
                .await?
                .data::<MeData>()
                .map(|data| data.user)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_login_url_uses_backend_origin() {
        let config = HttpConfig::with_default_prefix("http://localhost:5000");
        assert_eq!(
            google_login_url(&config),
            "http://localhost:5000/api/v1/auth/google"
        );
    }

    #[test]
    fn me_payload_nests_user() {
        let data: MeData = serde_json::from_str(
            r#"{"user":{"_id":"u1","name":"Ada","email":"ada@example.com","isEmailVerified":true}}"#,
        )
        .expect("decode");
        assert_eq!(data.user.name, "Ada");
    }
}
