//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//!
//! # Architecture
//!
//! The middleware uses the `TokenValidator` port, keeping it provider-agnostic.
//! Whether backed by Supabase Auth or a mock for testing, the middleware
//! doesn't change.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::TokenValidator;

/// Auth middleware state - wraps the token validator.
pub type AuthState = Arc<dyn TokenValidator>;

/// Authentication middleware that validates Bearer tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the `TokenValidator` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On missing token, continues without injecting; `RequireAuth` rejects later
/// 5. On invalid token, returns 401 Unauthorized
///
/// # Token Extraction
///
/// Expects the token in the `Authorization` header with `Bearer` prefix:
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// A header present without the prefix is passed to the validator as-is,
/// so a malformed header answers 401 Invalid Token rather than behaving
/// like an absent one.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract the token from the Authorization header; a value without the
    // Bearer prefix is still a token attempt, not an absent header
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|h| h.strip_prefix("Bearer ").unwrap_or(h));

    match token {
        Some(token) => {
            // Validate the token
            match validator.validate(token).await {
                Ok(user) => {
                    // Inject authenticated user into request extensions
                    request.extensions_mut().insert(user);
                    next.run(request).await
                }
                Err(e) => {
                    // Token validation failed
                    let (status, message) = match &e {
                        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid Token"),
                        AuthError::NotConfigured => (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "Authentication backend not configured",
                        ),
                        AuthError::ServiceUnavailable(msg) => {
                            tracing::error!(error = %msg, "Auth service unavailable");
                            (
                                StatusCode::SERVICE_UNAVAILABLE,
                                "Authentication service unavailable",
                            )
                        }
                    };

                    (
                        status,
                        Json(serde_json::json!({
                            "error": message,
                            "code": "AUTH_ERROR"
                        })),
                    )
                        .into_response()
                }
            }
        }
        None => {
            // No token provided - continue without auth
            // Handlers can use RequireAuth to enforce authentication
            next.run(request).await
        }
    }
}

/// Extractor that requires authentication.
///
/// Use this extractor in handlers that require an authenticated user.
/// If no user is in the request extensions (i.e., auth middleware didn't
/// successfully validate a token), returns 401 Unauthorized.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization Header")
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::foundation::UserId;

    /// Mock validator backed by a fixed token map.
    struct MockTokenValidator {
        tokens: HashMap<String, AuthenticatedUser>,
    }

    impl MockTokenValidator {
        fn new() -> Self {
            Self {
                tokens: HashMap::new(),
            }
        }

        fn with_user(mut self, token: &str, user: AuthenticatedUser) -> Self {
            self.tokens.insert(token.to_string(), user);
            self
        }
    }

    #[async_trait]
    impl TokenValidator for MockTokenValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            Some("test@example.com".to_string()),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // TokenValidator Tests (indirect via MockTokenValidator)
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn validator_returns_user_for_valid_token() {
        let validator: Arc<dyn TokenValidator> =
            Arc::new(MockTokenValidator::new().with_user("valid-token", test_user()));

        let result = validator.validate("valid-token").await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().email.as_deref(), Some("test@example.com"));
    }

    #[tokio::test]
    async fn validator_returns_error_for_invalid_token() {
        let validator: Arc<dyn TokenValidator> = Arc::new(MockTokenValidator::new());

        let result = validator.validate("invalid-token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // RequireAuth Extractor Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        // Create a request with AuthenticatedUser in extensions
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());

        // Split into parts
        let (mut parts, _body) = request.into_parts();

        // Extract using RequireAuth
        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(result.is_ok());
        let RequireAuth(user) = result.unwrap();
        assert_eq!(user.id.as_str(), "user-123");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        // Create a request WITHOUT AuthenticatedUser
        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();

        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // AuthRejection Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn auth_rejection_returns_401() {
        let rejection = AuthRejection::Unauthenticated;
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Token Extraction Helper Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn bearer_token_extraction() {
        // Test the pattern used in auth_middleware
        let header_value = "Bearer my-secret-token";
        let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value);
        assert_eq!(token, "my-secret-token");

        // Without the prefix the raw value is the token attempt
        let header_value = "my-secret-token";
        let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value);
        assert_eq!(token, "my-secret-token");

        // A different scheme goes to the validator whole and gets rejected
        let header_value = "Basic dXNlcjpwYXNz";
        let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value);
        assert_eq!(token, "Basic dXNlcjpwYXNz");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Type Safety Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
    }

    #[test]
    fn require_auth_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RequireAuth>();
    }
}
