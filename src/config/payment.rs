//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::payments::PlanCatalog;

/// Payment configuration (Razorpay)
///
/// All credentials are optional so the server can boot without a payment
/// integration; the payment routes then answer with a configuration error
/// instead of the process refusing to start.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id (public half of the API key pair)
    pub key_id: Option<String>,

    /// Razorpay key secret (private half; also signs payment proofs)
    pub key_secret: Option<SecretString>,

    /// Webhook signing secret from the provider dashboard
    pub webhook_secret: Option<SecretString>,

    /// Base URL of the provider API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Provider price id for the basic plan
    pub price_basic: Option<String>,

    /// Provider price id for the pro plan
    pub price_pro: Option<String>,
}

/// Complete API key pair, present only when both halves are configured.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub key_id: String,
    pub key_secret: SecretString,
}

impl PaymentConfig {
    /// Returns the API key pair when fully configured.
    pub fn credentials(&self) -> Option<ProviderCredentials> {
        match (&self.key_id, &self.key_secret) {
            (Some(key_id), Some(key_secret)) => Some(ProviderCredentials {
                key_id: key_id.clone(),
                key_secret: key_secret.clone(),
            }),
            _ => None,
        }
    }

    /// Builds the plan catalog from the configured price ids.
    pub fn plan_catalog(&self) -> PlanCatalog {
        let entries = [
            ("basic", self.price_basic.as_ref()),
            ("pro", self.price_pro.as_ref()),
        ]
        .into_iter()
        .filter_map(|(plan, price)| price.map(|p| (plan.to_string(), p.clone())));

        PlanCatalog::from_entries(entries)
    }

    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.key_id
            .as_deref()
            .is_some_and(|id| id.starts_with("rzp_test_"))
    }

    /// Validate payment configuration
    ///
    /// A completely absent integration is valid; a half-configured key pair
    /// or a wrong-looking credential is not.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.key_id, &self.key_secret) {
            (Some(_), None) => {
                return Err(ValidationError::MissingRequired("APP__PAYMENT__KEY_SECRET"));
            }
            (None, Some(_)) => {
                return Err(ValidationError::MissingRequired("APP__PAYMENT__KEY_ID"));
            }
            _ => {}
        }

        // Verify key prefixes for safety
        if let Some(key_id) = &self.key_id {
            if !key_id.starts_with("rzp_") {
                return Err(ValidationError::InvalidKeyId);
            }
        }
        if let Some(webhook_secret) = &self.webhook_secret {
            if !webhook_secret.expose_secret().starts_with("whsec_") {
                return Err(ValidationError::InvalidWebhookSecret);
            }
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidUrl("payment.api_base_url"));
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: None,
            key_secret: None,
            webhook_secret: None,
            api_base_url: default_api_base_url(),
            price_basic: None,
            price_pro: None,
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.razorpay.com".to_string()
}
