//! Object storage configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Object storage configuration (Supabase Storage)
///
/// Optional like the payment integration: without credentials the upload
/// route reports the backend as unconfigured rather than failing startup.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the Supabase project
    pub url: Option<String>,

    /// Service role key used for server-side uploads
    pub service_role_key: Option<SecretString>,

    /// Bucket uploads land in
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

/// Complete storage credentials, present only when both halves are set.
#[derive(Debug, Clone)]
pub struct StorageCredentials {
    pub url: String,
    pub service_role_key: SecretString,
}

impl StorageConfig {
    /// Returns the credentials when fully configured.
    pub fn credentials(&self) -> Option<StorageCredentials> {
        match (&self.url, &self.service_role_key) {
            (Some(url), Some(service_role_key)) => Some(StorageCredentials {
                url: url.trim_end_matches('/').to_string(),
                service_role_key: service_role_key.clone(),
            }),
            _ => None,
        }
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.url, &self.service_role_key) {
            (Some(_), None) => {
                return Err(ValidationError::MissingRequired(
                    "APP__STORAGE__SERVICE_ROLE_KEY",
                ));
            }
            (None, Some(_)) => {
                return Err(ValidationError::MissingRequired("APP__STORAGE__URL"));
            }
            _ => {}
        }

        if let Some(url) = &self.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl("storage.url"));
            }
        }

        if self.bucket.is_empty() {
            return Err(ValidationError::MissingRequired("APP__STORAGE__BUCKET"));
        }

        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: None,
            service_role_key: None,
            bucket: default_bucket(),
        }
    }
}

fn default_bucket() -> String {
    "media".to_string()
}
