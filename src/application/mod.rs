//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each handler owns one operation: it validates the command, runs the domain
//! checks, and drives the ports in the required order.

pub mod handlers;

pub use handlers::media::{UploadMediaCommand, UploadMediaHandler, UploadMediaResult};
pub use handlers::payments::{
    CheckoutSessionError, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
    CreateCheckoutSessionResult, CreateOrderCommand, CreateOrderError, CreateOrderHandler,
    CreateOrderResult, HandleWebhookCommand, HandleWebhookHandler, HandleWebhookResult,
    VerifyPaymentCommand, VerifyPaymentError, VerifyPaymentHandler, VerifyPaymentResult,
};
