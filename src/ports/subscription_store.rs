//! Subscription store port.
//!
//! Contract for the persistence backend that holds school subscription state.
//! Callers only reach this port after a signature has been verified in the
//! same request; the store itself never checks payment authenticity.

use async_trait::async_trait;

use crate::domain::foundation::SchoolId;
use crate::domain::payments::{SubscriptionRecord, SubscriptionStatus};

/// Result of appending a subscription record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The record was written.
    Recorded,

    /// A record with the same idempotency key already exists; nothing was
    /// written. Callers treat this as success for duplicate deliveries.
    AlreadyRecorded,
}

/// Port for subscription state persistence.
///
/// Activation performs two writes: flip the school's status column, then
/// append the record carrying the payment evidence. Implementations must
/// detect duplicate records by idempotency key rather than erroring on them.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Sets the subscription status column for a school.
    async fn set_school_status(
        &self,
        school_id: &SchoolId,
        status: SubscriptionStatus,
    ) -> Result<(), StoreError>;

    /// Appends a subscription record.
    ///
    /// Returns `AlreadyRecorded` when a record with the same idempotency key
    /// exists, so replays and double-submissions converge on one record.
    async fn append_subscription_record(
        &self,
        record: &SubscriptionRecord,
    ) -> Result<AppendOutcome, StoreError>;
}

/// Errors from subscription store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Store credentials are absent; no call was attempted.
    #[error("subscription store not configured")]
    NotConfigured,

    /// The backend could not be reached or answered with a server fault.
    #[error("subscription store unavailable: {0}")]
    Unavailable(String),

    /// The backend understood the request and refused it.
    #[error("subscription store rejected the write: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Whether retrying the same write may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
