//! Null adapters for unconfigured integrations.
//!
//! The server boots even when a backing service has no credentials; these
//! adapters stand in for the real ones and answer every call with the
//! matching not-configured error. Routes stay mounted, so clients get a
//! stable error shape instead of a 404 when an integration is absent.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, SchoolId};
use crate::domain::payments::{SubscriptionRecord, SubscriptionStatus};
use crate::ports::{
    AppendOutcome, CheckoutSession, CreateCheckoutSessionRequest, CreateOrderRequest,
    MediaStorage, PaymentError, PaymentProvider, ProviderOrder, StorageError, StoreError,
    StoredMedia, SubscriptionStore, TokenValidator,
};

/// Payment provider used when no gateway credentials are configured.
pub struct UnconfiguredPaymentProvider;

#[async_trait]
impl PaymentProvider for UnconfiguredPaymentProvider {
    async fn create_order(
        &self,
        _request: CreateOrderRequest,
    ) -> Result<ProviderOrder, PaymentError> {
        Err(PaymentError::not_configured())
    }

    async fn create_checkout_session(
        &self,
        _request: CreateCheckoutSessionRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        Err(PaymentError::not_configured())
    }
}

/// Subscription store used when no storage backend is configured.
pub struct UnconfiguredSubscriptionStore;

#[async_trait]
impl SubscriptionStore for UnconfiguredSubscriptionStore {
    async fn set_school_status(
        &self,
        _school_id: &SchoolId,
        _status: SubscriptionStatus,
    ) -> Result<(), StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn append_subscription_record(
        &self,
        _record: &SubscriptionRecord,
    ) -> Result<AppendOutcome, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

/// Media storage used when no object storage is configured.
pub struct UnconfiguredMediaStorage;

#[async_trait]
impl MediaStorage for UnconfiguredMediaStorage {
    async fn store(
        &self,
        _object_path: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<StoredMedia, StorageError> {
        Err(StorageError::NotConfigured)
    }
}

/// Token validator used when no auth backend is configured.
pub struct UnconfiguredTokenValidator;

#[async_trait]
impl TokenValidator for UnconfiguredTokenValidator {
    async fn validate(&self, _token: &str) -> Result<AuthenticatedUser, AuthError> {
        Err(AuthError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PlanId;
    use crate::ports::PaymentErrorCode;

    #[tokio::test]
    async fn payment_provider_reports_not_configured() {
        let provider = UnconfiguredPaymentProvider;

        let result = provider
            .create_order(CreateOrderRequest {
                amount: 50000,
                currency: "INR".to_string(),
            })
            .await;

        assert_eq!(result.unwrap_err().code, PaymentErrorCode::NotConfigured);
    }

    #[tokio::test]
    async fn subscription_store_reports_not_configured() {
        let store = UnconfiguredSubscriptionStore;
        let school = SchoolId::new("school-1").unwrap();

        let result = store
            .set_school_status(&school, SubscriptionStatus::Active)
            .await;

        assert!(matches!(result, Err(StoreError::NotConfigured)));

        let record =
            SubscriptionRecord::from_checkout(school, PlanId::new("basic").unwrap(), "sub_1", None);
        let result = store.append_subscription_record(&record).await;

        assert!(matches!(result, Err(StoreError::NotConfigured)));
    }

    #[tokio::test]
    async fn media_storage_reports_not_configured() {
        let storage = UnconfiguredMediaStorage;

        let result = storage.store("path", "image/png", vec![1]).await;

        assert!(matches!(result, Err(StorageError::NotConfigured)));
    }

    #[tokio::test]
    async fn token_validator_reports_not_configured() {
        let validator = UnconfiguredTokenValidator;

        let result = validator.validate("any-token").await;

        assert!(matches!(result, Err(AuthError::NotConfigured)));
    }
}
