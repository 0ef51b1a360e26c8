//! Supabase adapter module.
//!
//! One project connection backs three adapters: the subscription store talks
//! to PostgREST, the media storage to the Storage API, and the token
//! validator to the Auth API. All three authenticate with the service role
//! key; the token validator additionally forwards the caller's token.

use std::time::Duration;

use secrecy::SecretString;

mod media_storage;
mod subscription_store;
mod token_validator;

pub use media_storage::SupabaseMediaStorage;
pub use subscription_store::SupabaseSubscriptionStore;
pub use token_validator::SupabaseTokenValidator;

/// Request timeout for Supabase API calls.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Shared connection to a Supabase project.
#[derive(Clone)]
pub struct SupabaseConnection {
    /// Project base URL without a trailing slash.
    base_url: String,

    /// Service role key; grants full API access and never leaves the server.
    service_role_key: SecretString,

    http_client: reqwest::Client,
}

impl SupabaseConnection {
    /// Create a connection to a Supabase project.
    pub fn new(base_url: impl Into<String>, service_role_key: SecretString) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_role_key,
            http_client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_trims_trailing_slash() {
        let conn = SupabaseConnection::new(
            "https://project.supabase.co/",
            SecretString::new("key".to_string()),
        );

        assert_eq!(conn.base_url, "https://project.supabase.co");
    }
}
