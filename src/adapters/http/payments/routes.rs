//! Axum router configuration for payment endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    create_checkout_session, create_order, handle_webhook, verify_payment, PaymentsAppState,
};

/// Create the payments API router.
///
/// # Routes
///
/// - `POST /create-order` - Create a provider order for one-time payment
/// - `POST /verify-payment` - Verify a payment proof and activate
/// - `POST /create-checkout-session` - Start a hosted subscription checkout
/// - `POST /webhook` - Handle signed provider webhooks (no user auth;
///   trust comes from the signature over the raw body)
///
/// Mounted at `/api/v1/payments` by the top-level router.
pub fn payments_routes() -> Router<PaymentsAppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route("/create-checkout-session", post(create_checkout_session))
        .route("/webhook", post(handle_webhook))
}
