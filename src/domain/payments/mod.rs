//! Payments domain module.
//!
//! Everything needed to decide whether a payment really happened: signature
//! verification for both trust paths, the subscription records that verified
//! payments produce, and the webhook event model.
//!
//! # Module Structure
//!
//! - `signature` - Client payment proof and its HMAC verifier
//! - `webhook_verifier` - Signed webhook delivery verification
//! - `webhook_event` - Webhook event wire type and dispatch
//! - `webhook_errors` - Webhook failure taxonomy
//! - `subscription` - Subscription status, records, and plan catalog

mod signature;
mod subscription;
mod webhook_errors;
mod webhook_event;
mod webhook_verifier;

pub use signature::{PaymentProof, PaymentProofVerifier, ProofError};
pub use subscription::{PaymentAttribution, PlanCatalog, SubscriptionRecord, SubscriptionStatus};
pub use webhook_errors::WebhookError;
pub use webhook_event::{CheckoutSessionData, EventData, EventKind, WebhookEvent};
pub use webhook_verifier::{SignatureHeader, WebhookVerifier};

#[cfg(test)]
pub use signature::compute_proof_signature;
#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
