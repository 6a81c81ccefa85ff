//! Login, registration and identity endpoints.

use chrono::{Duration, Utc};
use reqwest::Method;

use super::models::{LoginRequest, LoginResponse, Me, RegisterRequest};
use super::{ApiClient, ApiError, ApiResult};
use crate::session::{Role, Session};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_CHARS: usize = 4;

/// Registration form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Checks a registration form locally.
///
/// Runs before any network call: mismatched passwords first, then length.
pub fn validate_registration(registration: &Registration) -> ApiResult<()> {
    if registration.password != registration.confirm_password {
        return Err(ApiError::Validation("Passwords do not match!".to_string()));
    }
    if registration.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ApiError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters long"
        )));
    }
    Ok(())
}

impl ApiClient {
    /// Exchanges credentials for a session.
    ///
    /// Every non-2xx answer is reported as [`ApiError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let response = self
            .public(Method::POST, "/auth/login")
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::info!(status = response.status().as_u16(), "login rejected");
            return Err(ApiError::InvalidCredentials);
        }

        let body: LoginResponse = response.json().await?;
        if body.access_token.is_empty() {
            return Err(ApiError::Decode("login response has no access token".to_string()));
        }

        // A lifetime chrono cannot represent is treated as no expiry
        let expires_at = body
            .expires_in
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

        tracing::info!(role = %body.role, "logged in");
        Ok(Session {
            token: body.access_token,
            role: body.role,
            email: Some(email.to_string()),
            expires_at,
        })
    }

    /// Creates a `USER` account after validating the form locally.
    pub async fn register(&self, registration: &Registration) -> ApiResult<()> {
        validate_registration(registration)?;

        let response = self
            .public(Method::POST, "/auth/register")
            .json(&RegisterRequest {
                name: &registration.name,
                email: &registration.email,
                password: &registration.password,
                role: Role::User,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::info!(status = status.as_u16(), "registration rejected");
            return Err(ApiError::registration(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Returns the identity behind the current token.
    pub async fn whoami(&self) -> ApiResult<Me> {
        let response = self
            .authorized_request(Method::GET, "/auth/me", |b| b)
            .await?;
        Ok(response.json().await?)
    }
}
