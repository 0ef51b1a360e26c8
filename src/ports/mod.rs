//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Payment Ports
//!
//! - `PaymentProvider` - Gateway operations (orders, checkout sessions)
//! - `SubscriptionStore` - Persistence for school subscription state
//!
//! ## Identity and Media Ports
//!
//! - `TokenValidator` - Bearer token validation
//! - `MediaStorage` - Object storage for user uploads

mod media_storage;
mod payment_provider;
mod subscription_store;
mod token_validator;

pub use media_storage::{MediaStorage, StorageError, StoredMedia};
pub use payment_provider::{
    CheckoutSession, CreateCheckoutSessionRequest, CreateOrderRequest, PaymentError,
    PaymentErrorCode, PaymentProvider, ProviderOrder,
};
pub use subscription_store::{AppendOutcome, StoreError, SubscriptionStore};
pub use token_validator::TokenValidator;
