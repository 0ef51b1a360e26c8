//! Payment provider port for external payment processing.
//!
//! Defines the contract the payment flows need from a gateway: creating
//! server-side orders for the client-proof flow and hosted checkout sessions
//! for the redirect flow. Signature verification is deliberately NOT part of
//! this port; it lives in the domain so no adapter can weaken it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlanId, SchoolId};

/// Port for payment gateway integrations.
///
/// Implementations talk to the provider's REST API. Neither operation
/// mutates our own state; subscription changes happen only after a verified
/// payment comes back through the verification flows.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an order the client-side checkout widget can charge against.
    ///
    /// The returned order echoes the amount and currency actually registered
    /// with the provider, which is where a mismatch would surface.
    async fn create_order(&self, request: CreateOrderRequest)
        -> Result<ProviderOrder, PaymentError>;

    /// Create a hosted checkout session for a subscription purchase.
    ///
    /// Returns a URL for the customer to complete payment. The school and
    /// plan ride along as session metadata so the completion webhook can
    /// attribute the purchase.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutSessionRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}

/// Request to create a provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in the currency's smallest unit (e.g. paise).
    pub amount: u64,

    /// ISO currency code, e.g. `INR`.
    pub currency: String,
}

/// An order registered with the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderOrder {
    /// Provider's order id; the client hands this to the checkout widget.
    pub order_id: String,

    /// Amount the provider registered, echoed from its response.
    pub amount: u64,

    /// Currency the provider registered.
    pub currency: String,
}

/// Request to create a hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    /// Provider price id resolved from the plan catalog.
    pub price_id: String,

    /// School the purchase is for; stored as session metadata.
    pub school_id: SchoolId,

    /// Plan being purchased; stored as session metadata.
    pub plan_id: PlanId,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
}

/// Hosted checkout session for payment completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session id.
    pub session_id: String,

    /// URL for the customer to complete checkout.
    pub url: String,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    /// Attach the provider's own error code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Gateway credentials are absent; no call was attempted.
    pub fn not_configured() -> Self {
        Self::new(
            PaymentErrorCode::NotConfigured,
            "payment provider credentials not configured",
        )
    }

    /// The provider could not be reached or timed out.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderUnavailable, message)
    }

    /// The provider reached a decision and said no.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderRejected, message)
    }

    /// The provider answered with a body we could not interpret.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Gateway credentials missing from configuration.
    NotConfigured,

    /// Request was invalid before it reached the provider.
    InvalidRequest,

    /// Network connectivity issue or provider outage.
    ProviderUnavailable,

    /// Provider rejected the request.
    ProviderRejected,

    /// Provider response could not be parsed.
    InvalidResponse,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentErrorCode::ProviderUnavailable)
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NotConfigured => "not_configured",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::ProviderUnavailable => "provider_unavailable",
            PaymentErrorCode::ProviderRejected => "provider_rejected",
            PaymentErrorCode::InvalidResponse => "invalid_response",
        };
        write!(f, "{}", s)
    }
}
