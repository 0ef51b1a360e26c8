//! HTTP adapter for payment endpoints.
//!
//! Exposes the payment flows via REST API:
//! - `POST /api/v1/payments/create-order` - Create a provider order
//! - `POST /api/v1/payments/verify-payment` - Verify proof, activate subscription
//! - `POST /api/v1/payments/create-checkout-session` - Hosted subscription checkout
//! - `POST /api/v1/payments/webhook` - Signed provider webhooks

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{PaymentsApiError, PaymentsAppState};
pub use routes::payments_routes;
