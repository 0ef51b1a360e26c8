//! Supabase Auth token validator.
//!
//! Implements the `TokenValidator` port by introspecting the caller's token
//! against the Auth API's user endpoint: present the token, get the user
//! back. No local JWT parsing; the auth backend is the source of truth.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use super::SupabaseConnection;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::TokenValidator;

/// Token validator backed by Supabase Auth.
pub struct SupabaseTokenValidator {
    conn: SupabaseConnection,
}

impl SupabaseTokenValidator {
    /// Create a validator over an existing connection.
    pub fn new(conn: SupabaseConnection) -> Self {
        Self { conn }
    }
}

/// User as returned by the Auth API.
#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[async_trait]
impl TokenValidator for SupabaseTokenValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let url = format!("{}/auth/v1/user", self.conn.base_url);

        let response = self
            .conn
            .http_client
            .get(&url)
            .header("apikey", self.conn.service_role_key.expose_secret())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Auth backend unreachable");
                AuthError::service_unavailable(e.to_string())
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AuthError::InvalidToken);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Auth backend returned error");
            return Err(AuthError::service_unavailable(format!(
                "Auth API returned {}",
                status
            )));
        }

        let user: UserResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse auth backend response");
            AuthError::service_unavailable(format!("Failed to parse auth response: {}", e))
        })?;

        let id = UserId::new(user.id).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, user.email))
    }
}
