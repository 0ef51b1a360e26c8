//! Token validation port for bearer token authentication.
//!
//! Defines the contract for turning a raw bearer token into an authenticated
//! user. It is provider-agnostic; the production implementation introspects
//! the token against the auth backend, and tests substitute an in-memory map.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates bearer tokens and extracts user identity.
///
/// HTTP middleware uses this to authenticate requests on protected routes.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for tokens the backend rejects
/// - Return `AuthError::NotConfigured` when no backend is wired up
/// - Return `AuthError::ServiceUnavailable` for transient errors, so a
///   backend outage is distinguishable from a bad credential
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validate an access token and return the authenticated user.
    ///
    /// # Arguments
    ///
    /// * `token` - The raw token, without the `Bearer ` prefix
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
