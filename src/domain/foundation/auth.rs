//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a validated
//! bearer token. They have no provider dependencies: any identity backend
//! can populate them via the `TokenValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated bearer token.
///
/// This is a domain type with no provider dependencies. The `TokenValidator`
/// adapter populates it after the identity provider accepts the token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the identity provider.
    pub id: UserId,

    /// User's email address, when the provider exposes one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, expired, or has an invalid signature.
    #[error("Invalid Token")]
    InvalidToken,

    /// No identity backend credentials were configured at startup.
    #[error("Authentication backend not configured")]
    NotConfigured,

    /// The identity backend is unreachable or returned an unexpected error.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}
