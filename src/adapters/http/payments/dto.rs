//! HTTP DTOs (Data Transfer Objects) for payment endpoints.
//!
//! These types define the JSON request/response structure for the payments API.
//! They serve as the boundary between HTTP and the application layer.
//!
//! Request fields all default when absent so that missing-field handling goes
//! through command validation (a 400 with a named field) instead of a bare
//! deserialization rejection.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a payment order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in the currency's smallest unit (paise for INR).
    #[serde(default)]
    pub amount: i64,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: String,
    /// The plan being purchased.
    #[serde(default)]
    pub plan_id: String,
    /// The school the purchase is for.
    #[serde(default)]
    pub school_id: String,
}

/// Request to verify a payment proof returned by the checkout frontend.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
    #[serde(default)]
    pub school_id: String,
    #[serde(default)]
    pub plan_id: String,
}

/// Request to start a hosted checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub school_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a created order.
///
/// `key` is the provider's public key id, which the frontend needs to open
/// the checkout widget. The secret key never appears in any response.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub currency: String,
    pub amount: u64,
    pub key: String,
}

/// Response for a verified payment.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub status: String,
    pub message: String,
}

impl VerifyPaymentResponse {
    /// The canonical success body for an activated subscription.
    pub fn activated() -> Self {
        Self {
            status: "success".to_string(),
            message: "Payment Verified & Subscription Activated".to_string(),
        }
    }
}

/// Response for a created checkout session.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionResponse {
    /// The provider-hosted checkout URL to redirect the user to.
    pub url: String,
}

/// Acknowledgment body returned to the webhook provider.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub status: String,
}

impl WebhookAckResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response DTO
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response for API errors.
///
/// Matches the shape the auth middleware emits so every error body on the
/// API reads the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ════════════════════════════════════════════════════════════════════════════
    // Request DTO Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn create_order_request_deserializes() {
        let json = r#"{
            "amount": 50000,
            "currency": "INR",
            "plan_id": "pro",
            "school_id": "school-1"
        }"#;
        let request: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, 50000);
        assert_eq!(request.currency, "INR");
        assert_eq!(request.plan_id, "pro");
        assert_eq!(request.school_id, "school-1");
    }

    #[test]
    fn create_order_request_defaults_missing_fields() {
        let json = r#"{"amount": 50000}"#;
        let request: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert!(request.currency.is_empty());
        assert!(request.school_id.is_empty());
    }

    #[test]
    fn verify_payment_request_deserializes() {
        let json = r#"{
            "razorpay_order_id": "order_abc",
            "razorpay_payment_id": "pay_xyz",
            "razorpay_signature": "deadbeef",
            "school_id": "school-1",
            "plan_id": "basic"
        }"#;
        let request: VerifyPaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.razorpay_order_id, "order_abc");
        assert_eq!(request.razorpay_payment_id, "pay_xyz");
        assert_eq!(request.razorpay_signature, "deadbeef");
    }

    #[test]
    fn verify_payment_request_defaults_missing_signature() {
        let json = r#"{"razorpay_order_id": "order_abc"}"#;
        let request: VerifyPaymentRequest = serde_json::from_str(json).unwrap();
        assert!(request.razorpay_signature.is_empty());
    }

    #[test]
    fn checkout_session_request_deserializes() {
        let json = r#"{"plan_id": "pro", "school_id": "school-1"}"#;
        let request: CreateCheckoutSessionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.plan_id, "pro");
        assert_eq!(request.school_id, "school-1");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Response DTO Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn create_order_response_serializes_all_fields() {
        let response = CreateOrderResponse {
            order_id: "order_abc".to_string(),
            currency: "INR".to_string(),
            amount: 50000,
            key: "rzp_test_key".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""order_id":"order_abc""#));
        assert!(json.contains(r#""amount":50000"#));
        assert!(json.contains(r#""key":"rzp_test_key""#));
    }

    #[test]
    fn verify_payment_activated_has_canonical_message() {
        let response = VerifyPaymentResponse::activated();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""status":"success""#));
        assert!(json.contains("Payment Verified & Subscription Activated"));
    }

    #[test]
    fn webhook_ack_serializes_success_status() {
        let json = serde_json::to_string(&WebhookAckResponse::success()).unwrap();
        assert_eq!(json, r#"{"status":"success"}"#);
    }

    #[test]
    fn error_response_serializes_error_and_code() {
        let response = ErrorResponse::new("Invalid Payment Signature", "INVALID_SIGNATURE");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"error":"Invalid Payment Signature","code":"INVALID_SIGNATURE"}"#
        );
    }
}
