//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentProvider` trait against the Razorpay REST API.
//! Orders go through the JSON orders endpoint; hosted checkout sessions go
//! through the form-encoded sessions endpoint. All calls authenticate with
//! HTTP basic auth using the API key pair.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::new(key_id, key_secret);
//! let gateway = RazorpayGateway::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{
    CheckoutSession, CreateCheckoutSessionRequest, CreateOrderRequest, PaymentError,
    PaymentProvider, ProviderOrder,
};

/// Request timeout for provider API calls.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Key id (rzp_live_... or rzp_test_...); also sent to the client.
    key_id: String,

    /// Key secret; never leaves the server.
    key_secret: SecretString,

    /// Base URL for the Razorpay API (default: https://api.razorpay.com).
    api_base_url: String,
}

impl RazorpayConfig {
    /// Create a new Razorpay configuration.
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// The public key id, safe to hand to checkout widgets.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

/// Razorpay payment gateway adapter.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    /// Create a new gateway with the given configuration.
    pub fn new(config: RazorpayConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Maps a failed provider response to a payment error by status class.
    fn error_from_response(status: reqwest::StatusCode, body: String) -> PaymentError {
        if status.is_server_error() {
            PaymentError::network(format!("Razorpay API unavailable: {}", body))
        } else {
            PaymentError::rejected(format!("Razorpay API error: {}", body))
        }
    }
}

/// Order as returned by the provider.
#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: u64,
    currency: String,
}

/// Checkout session as returned by the provider.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: String,
}

#[async_trait]
impl PaymentProvider for RazorpayGateway {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProviderOrder, PaymentError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);

        let body = serde_json::json!({
            "amount": request.amount,
            "currency": request.currency,
            "payment_capture": 1,
        });

        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Razorpay create_order failed");
            return Err(Self::error_from_response(status, error_text));
        }

        let order: OrderResponse = response.json().await.map_err(|e| {
            PaymentError::invalid_response(format!("Failed to parse Razorpay response: {}", e))
        })?;

        Ok(ProviderOrder {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutSessionRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let params = vec![
            ("mode", "subscription".to_string()),
            ("line_items[0][price]", request.price_id),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            ("metadata[school_id]", request.school_id.to_string()),
            ("metadata[plan_id]", request.plan_id.to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                error = %error_text,
                "Razorpay create_checkout_session failed"
            );
            return Err(Self::error_from_response(status, error_text));
        }

        let session: SessionResponse = response.json().await.map_err(|e| {
            PaymentError::invalid_response(format!("Failed to parse Razorpay response: {}", e))
        })?;

        Ok(CheckoutSession {
            session_id: session.id,
            url: session.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PaymentErrorCode;

    fn test_config() -> RazorpayConfig {
        RazorpayConfig::new(
            "rzp_test_key",
            SecretString::new("test_secret".to_string()),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_new_sets_default_base_url() {
        let config = test_config();
        assert_eq!(config.api_base_url, "https://api.razorpay.com");
        assert_eq!(config.key_id(), "rzp_test_key");
    }

    #[test]
    fn config_with_base_url() {
        let config = test_config().with_base_url("http://localhost:8080");
        assert_eq!(config.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn config_with_base_url_trims_trailing_slash() {
        let config = test_config().with_base_url("http://localhost:8080/");
        assert_eq!(config.api_base_url, "http://localhost:8080");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Response Parsing Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn order_response_parses_provider_json() {
        let json = r#"{
            "id": "order_LkQ71GD1x0Yw8M",
            "entity": "order",
            "amount": 50000,
            "amount_paid": 0,
            "currency": "INR",
            "status": "created"
        }"#;

        let order: OrderResponse = serde_json::from_str(json).unwrap();

        assert_eq!(order.id, "order_LkQ71GD1x0Yw8M");
        assert_eq!(order.amount, 50000);
        assert_eq!(order.currency, "INR");
    }

    #[test]
    fn session_response_parses_provider_json() {
        let json = r#"{
            "id": "cs_test_abc123",
            "object": "checkout.session",
            "url": "https://checkout.example/pay/cs_test_abc123"
        }"#;

        let session: SessionResponse = serde_json::from_str(json).unwrap();

        assert_eq!(session.id, "cs_test_abc123");
        assert_eq!(session.url, "https://checkout.example/pay/cs_test_abc123");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn server_errors_map_to_retryable_unavailable() {
        let err = RazorpayGateway::error_from_response(
            reqwest::StatusCode::BAD_GATEWAY,
            "upstream down".to_string(),
        );

        assert_eq!(err.code, PaymentErrorCode::ProviderUnavailable);
        assert!(err.retryable);
    }

    #[test]
    fn client_errors_map_to_rejected() {
        let err = RazorpayGateway::error_from_response(
            reqwest::StatusCode::BAD_REQUEST,
            "amount too small".to_string(),
        );

        assert_eq!(err.code, PaymentErrorCode::ProviderRejected);
        assert!(!err.retryable);
    }
}
