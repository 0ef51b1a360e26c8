//! Payment handlers.
//!
//! Command handlers for the two activation flows and their supporting
//! operations:
//!
//! - Creating provider orders for the one-time payment flow
//! - Verifying payment proofs and activating subscriptions
//! - Creating hosted checkout sessions for the subscription flow
//! - Processing signed webhook deliveries

mod create_checkout_session;
mod create_order;
mod handle_webhook;
mod verify_payment;

pub use create_checkout_session::{
    CheckoutSessionError, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
    CreateCheckoutSessionResult,
};
pub use create_order::{CreateOrderCommand, CreateOrderError, CreateOrderHandler, CreateOrderResult};
pub use handle_webhook::{HandleWebhookCommand, HandleWebhookHandler, HandleWebhookResult};
pub use verify_payment::{
    VerifyPaymentCommand, VerifyPaymentError, VerifyPaymentHandler, VerifyPaymentResult,
};
