//! HTTP handlers for payment endpoints.
//!
//! These handlers connect axum routes to application layer command handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::payments::{
    CheckoutSessionError, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
    CreateOrderCommand, CreateOrderError, CreateOrderHandler, HandleWebhookCommand,
    HandleWebhookHandler, VerifyPaymentCommand, VerifyPaymentError, VerifyPaymentHandler,
};
use crate::domain::payments::{PaymentProofVerifier, PlanCatalog, WebhookError, WebhookVerifier};
use crate::ports::{PaymentProvider, SubscriptionStore};

use super::dto::{
    CheckoutSessionResponse, CreateCheckoutSessionRequest, CreateOrderRequest,
    CreateOrderResponse, ErrorResponse, VerifyPaymentRequest, VerifyPaymentResponse,
    WebhookAckResponse,
};

/// Header carrying the webhook signature.
const WEBHOOK_SIGNATURE_HEADER: &str = "X-Webhook-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the payments route group.
///
/// Cloned per request; dependencies are Arc-wrapped ports plus the verifiers,
/// which are `None` when the matching secret is absent from configuration.
#[derive(Clone)]
pub struct PaymentsAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub subscription_store: Arc<dyn SubscriptionStore>,
    pub proof_verifier: Option<PaymentProofVerifier>,
    pub webhook_verifier: Option<WebhookVerifier>,
    pub plans: PlanCatalog,
    pub frontend_url: String,
    /// Public key id echoed to the frontend in order responses. Never the
    /// secret.
    pub public_key_id: Option<String>,
}

impl PaymentsAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.payment_provider.clone())
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(self.proof_verifier.clone(), self.subscription_store.clone())
    }

    pub fn checkout_session_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(
            self.payment_provider.clone(),
            self.plans.clone(),
            self.frontend_url.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandleWebhookHandler {
        HandleWebhookHandler::new(
            self.webhook_verifier.clone(),
            self.subscription_store.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/payments/create-order - Create a provider order
pub async fn create_order(
    State(state): State<PaymentsAppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let handler = state.create_order_handler();
    let cmd = CreateOrderCommand {
        amount: request.amount,
        currency: request.currency,
        plan_id: request.plan_id,
        school_id: request.school_id,
    };

    let result = handler.handle(cmd).await?;

    let response = CreateOrderResponse {
        order_id: result.order.order_id,
        currency: result.order.currency,
        amount: result.order.amount,
        key: state.public_key_id.clone().unwrap_or_default(),
    };

    Ok(Json(response))
}

/// POST /api/v1/payments/verify-payment - Verify a payment proof and activate
pub async fn verify_payment(
    State(state): State<PaymentsAppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let handler = state.verify_payment_handler();
    let cmd = VerifyPaymentCommand {
        razorpay_order_id: request.razorpay_order_id,
        razorpay_payment_id: request.razorpay_payment_id,
        razorpay_signature: request.razorpay_signature,
        school_id: request.school_id,
        plan_id: request.plan_id,
    };

    handler.handle(cmd).await?;

    Ok(Json(VerifyPaymentResponse::activated()))
}

/// POST /api/v1/payments/create-checkout-session - Start a hosted checkout
pub async fn create_checkout_session(
    State(state): State<PaymentsAppState>,
    Json(request): Json<CreateCheckoutSessionRequest>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let handler = state.checkout_session_handler();
    let cmd = CreateCheckoutSessionCommand {
        plan_id: request.plan_id,
        school_id: request.school_id,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(CheckoutSessionResponse {
        url: result.session.url,
    }))
}

/// POST /api/v1/payments/webhook - Handle signed provider webhooks
///
/// Takes the raw body bytes; the signature covers the exact byte sequence
/// received, so nothing may parse or re-serialize the body before the
/// verifier sees it.
pub async fn handle_webhook(
    State(state): State<PaymentsAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let signature_header = headers
        .get(WEBHOOK_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let handler = state.webhook_handler();
    let cmd = HandleWebhookCommand {
        payload: body.to_vec(),
        signature_header,
    };

    handler.handle(cmd).await?;

    Ok(Json(WebhookAckResponse::success()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum PaymentsApiError {
    CreateOrder(CreateOrderError),
    VerifyPayment(VerifyPaymentError),
    CheckoutSession(CheckoutSessionError),
    Webhook(WebhookError),
}

impl From<CreateOrderError> for PaymentsApiError {
    fn from(err: CreateOrderError) -> Self {
        Self::CreateOrder(err)
    }
}

impl From<VerifyPaymentError> for PaymentsApiError {
    fn from(err: VerifyPaymentError) -> Self {
        Self::VerifyPayment(err)
    }
}

impl From<CheckoutSessionError> for PaymentsApiError {
    fn from(err: CheckoutSessionError) -> Self {
        Self::CheckoutSession(err)
    }
}

impl From<WebhookError> for PaymentsApiError {
    fn from(err: WebhookError) -> Self {
        Self::Webhook(err)
    }
}

impl IntoResponse for PaymentsApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            PaymentsApiError::CreateOrder(err) => {
                let (status, code) = match err {
                    CreateOrderError::NotConfigured => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "NOT_CONFIGURED")
                    }
                    CreateOrderError::Validation(_) => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
                    }
                    CreateOrderError::Provider => (StatusCode::BAD_REQUEST, "PROVIDER_ERROR"),
                };
                (status, code, err.to_string())
            }
            PaymentsApiError::VerifyPayment(err) => {
                let (status, code) = match err {
                    VerifyPaymentError::NotConfigured => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "NOT_CONFIGURED")
                    }
                    VerifyPaymentError::Validation(_) => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
                    }
                    VerifyPaymentError::InvalidSignature => {
                        (StatusCode::BAD_REQUEST, "INVALID_SIGNATURE")
                    }
                    VerifyPaymentError::ActivationFailed => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "ACTIVATION_FAILED")
                    }
                };
                (status, code, err.to_string())
            }
            PaymentsApiError::CheckoutSession(err) => {
                let (status, code) = match err {
                    CheckoutSessionError::NotConfigured => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "NOT_CONFIGURED")
                    }
                    CheckoutSessionError::Validation(_) => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
                    }
                    CheckoutSessionError::Provider => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "PROVIDER_ERROR")
                    }
                };
                (status, code, err.to_string())
            }
            PaymentsApiError::Webhook(err) => {
                let status = match err.status_code() {
                    400 => StatusCode::BAD_REQUEST,
                    502 => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let code = match err {
                    WebhookError::NotConfigured => "NOT_CONFIGURED",
                    WebhookError::StoreFailure(_) => "STORE_FAILURE",
                    _ => "WEBHOOK_REJECTED",
                };
                (status, code, err.to_string())
            }
        };

        let body = ErrorResponse::new(message, code);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::unconfigured::{
        UnconfiguredPaymentProvider, UnconfiguredSubscriptionStore,
    };
    use crate::domain::foundation::{SchoolId, ValidationError};
    use crate::domain::payments::{
        compute_proof_signature, SubscriptionRecord, SubscriptionStatus,
    };
    use crate::ports::{
        AppendOutcome, CheckoutSession, CreateCheckoutSessionRequest as PortCheckoutRequest,
        CreateOrderRequest as PortOrderRequest, PaymentError, ProviderOrder, StoreError,
    };
    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::sync::Mutex;

    const KEY_SECRET: &str = "test_key_secret";

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockPaymentProvider;

    #[async_trait]
    impl PaymentProvider for MockPaymentProvider {
        async fn create_order(
            &self,
            request: PortOrderRequest,
        ) -> Result<ProviderOrder, PaymentError> {
            Ok(ProviderOrder {
                order_id: "order_test123".to_string(),
                amount: request.amount,
                currency: request.currency,
            })
        }

        async fn create_checkout_session(
            &self,
            _request: PortCheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            Ok(CheckoutSession {
                session_id: "cs_test123".to_string(),
                url: "https://checkout.example/cs_test123".to_string(),
            })
        }
    }

    struct MockSubscriptionStore {
        calls: Mutex<Vec<String>>,
    }

    impl MockSubscriptionStore {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SubscriptionStore for MockSubscriptionStore {
        async fn set_school_status(
            &self,
            school_id: &SchoolId,
            status: SubscriptionStatus,
        ) -> Result<(), StoreError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("set_status:{}:{}", school_id, status));
            Ok(())
        }

        async fn append_subscription_record(
            &self,
            record: &SubscriptionRecord,
        ) -> Result<AppendOutcome, StoreError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("append:{}", record.idempotency_key()));
            Ok(AppendOutcome::Recorded)
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn test_state_with_store(store: Arc<MockSubscriptionStore>) -> PaymentsAppState {
        PaymentsAppState {
            payment_provider: Arc::new(MockPaymentProvider),
            subscription_store: store,
            proof_verifier: Some(PaymentProofVerifier::new(SecretString::new(
                KEY_SECRET.to_string(),
            ))),
            webhook_verifier: None,
            plans: PlanCatalog::new(),
            frontend_url: "https://app.example.com".to_string(),
            public_key_id: Some("rzp_test_public".to_string()),
        }
    }

    fn test_state() -> PaymentsAppState {
        test_state_with_store(Arc::new(MockSubscriptionStore::new()))
    }

    fn unconfigured_state() -> PaymentsAppState {
        PaymentsAppState {
            payment_provider: Arc::new(UnconfiguredPaymentProvider),
            subscription_store: Arc::new(UnconfiguredSubscriptionStore),
            proof_verifier: None,
            webhook_verifier: None,
            plans: PlanCatalog::new(),
            frontend_url: "http://localhost:3000".to_string(),
            public_key_id: None,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_order_returns_order_with_public_key() {
        let state = test_state();

        let request = CreateOrderRequest {
            amount: 50000,
            currency: "INR".to_string(),
            plan_id: "pro".to_string(),
            school_id: "school-1".to_string(),
        };

        let response = create_order(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_order_rejects_unconfigured_provider_with_500() {
        let state = unconfigured_state();

        let request = CreateOrderRequest {
            amount: 50000,
            currency: "INR".to_string(),
            plan_id: "pro".to_string(),
            school_id: "school-1".to_string(),
        };

        let response = create_order(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn verify_payment_activates_and_returns_success() {
        let store = Arc::new(MockSubscriptionStore::new());
        let state = test_state_with_store(store.clone());

        let request = VerifyPaymentRequest {
            razorpay_order_id: "order_abc".to_string(),
            razorpay_payment_id: "pay_xyz".to_string(),
            razorpay_signature: compute_proof_signature(KEY_SECRET, "order_abc", "pay_xyz"),
            school_id: "school-1".to_string(),
            plan_id: "pro".to_string(),
        };

        let response = verify_payment(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            store.calls(),
            vec![
                "set_status:school-1:active".to_string(),
                "append:pay_xyz".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn verify_payment_rejects_bad_signature_with_400() {
        let store = Arc::new(MockSubscriptionStore::new());
        let state = test_state_with_store(store.clone());

        let request = VerifyPaymentRequest {
            razorpay_order_id: "order_abc".to_string(),
            razorpay_payment_id: "pay_xyz".to_string(),
            razorpay_signature: "00".repeat(32),
            school_id: "school-1".to_string(),
            plan_id: "pro".to_string(),
        };

        let response = verify_payment(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn create_checkout_session_returns_url() {
        let state = test_state();

        let request = CreateCheckoutSessionRequest {
            plan_id: "pro".to_string(),
            school_id: "school-1".to_string(),
        };

        let response = create_checkout_session(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn webhook_without_secret_reports_500() {
        let state = test_state();

        let response = handle_webhook(State(state), HeaderMap::new(), Bytes::from_static(b"{}"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn api_error_maps_order_not_configured_to_500() {
        let err = PaymentsApiError::from(CreateOrderError::NotConfigured);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_maps_order_validation_to_400() {
        let err =
            PaymentsApiError::from(CreateOrderError::Validation(ValidationError::empty_field(
                "school_id",
            )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_order_provider_failure_to_400() {
        let err = PaymentsApiError::from(CreateOrderError::Provider);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_invalid_signature_to_400() {
        let err = PaymentsApiError::from(VerifyPaymentError::InvalidSignature);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_activation_failure_to_500() {
        let err = PaymentsApiError::from(VerifyPaymentError::ActivationFailed);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_maps_checkout_provider_failure_to_500() {
        let err = PaymentsApiError::from(CheckoutSessionError::Provider);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_maps_webhook_signature_failure_to_400() {
        let err = PaymentsApiError::from(WebhookError::InvalidSignature);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_webhook_store_failure_to_502() {
        let err = PaymentsApiError::from(WebhookError::StoreFailure("down".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn api_error_maps_webhook_not_configured_to_500() {
        let err = PaymentsApiError::from(WebhookError::NotConfigured);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
