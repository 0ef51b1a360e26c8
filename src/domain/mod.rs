//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, auth identity, errors)
//! - `payments` - Payment verification, subscription records, webhook events

pub mod foundation;
pub mod payments;
