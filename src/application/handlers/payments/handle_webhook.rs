//! HandleWebhookHandler - command handler for provider-driven activation.

use std::sync::Arc;

use crate::domain::foundation::{PlanId, SchoolId};
use crate::domain::payments::{
    EventKind, SubscriptionRecord, SubscriptionStatus, WebhookError, WebhookEvent, WebhookVerifier,
};
use crate::ports::{AppendOutcome, SubscriptionStore};

/// Command carrying a raw webhook delivery.
///
/// The payload is the exact byte sequence received on the wire; the signature
/// covers those bytes, so the body must not be parsed or re-serialized before
/// verification.
#[derive(Debug, Clone)]
pub struct HandleWebhookCommand {
    pub payload: Vec<u8>,
    pub signature_header: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone)]
pub enum HandleWebhookResult {
    /// A completed checkout activated the school's subscription.
    SubscriptionActivated {
        school_id: SchoolId,
        duplicate: bool,
    },
    /// Event recognized and logged; no state change required.
    Acknowledged,
    /// Event type not handled by this service.
    Ignored,
}

/// Handler for verified webhook deliveries.
///
/// The store is only touched on `checkout.session.completed` and only after
/// the signature over the raw bytes has been verified. Store failures are
/// surfaced as retryable so the provider's redelivery schedule can recover
/// the activation.
pub struct HandleWebhookHandler {
    verifier: Option<WebhookVerifier>,
    store: Arc<dyn SubscriptionStore>,
}

impl HandleWebhookHandler {
    pub fn new(verifier: Option<WebhookVerifier>, store: Arc<dyn SubscriptionStore>) -> Self {
        Self { verifier, store }
    }

    pub async fn handle(
        &self,
        cmd: HandleWebhookCommand,
    ) -> Result<HandleWebhookResult, WebhookError> {
        // 1. Resolve the verifier; without a secret no delivery can be trusted
        let verifier = self.verifier.as_ref().ok_or(WebhookError::NotConfigured)?;

        // 2. Verify the signature over the raw bytes, then parse
        let event = verifier.verify_and_parse(&cmd.payload, &cmd.signature_header)?;

        // 3. Dispatch on event family
        match event.kind() {
            EventKind::CheckoutSessionCompleted => self.activate_from_checkout(&event).await,
            EventKind::InvoicePaymentSucceeded => {
                tracing::info!(event_id = %event.id, "Invoice payment succeeded");
                Ok(HandleWebhookResult::Acknowledged)
            }
            EventKind::Other => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "Ignoring unhandled webhook event type"
                );
                Ok(HandleWebhookResult::Ignored)
            }
        }
    }

    async fn activate_from_checkout(
        &self,
        event: &WebhookEvent,
    ) -> Result<HandleWebhookResult, WebhookError> {
        let session = event.checkout_session()?;

        // checkout_session() guarantees non-empty fields, so these cannot fail;
        // map back to MissingField to keep the error total
        let school_id = SchoolId::new(session.school_id)
            .map_err(|_| WebhookError::MissingField("metadata.school_id"))?;
        let plan_id = PlanId::new(session.plan_id)
            .map_err(|_| WebhookError::MissingField("metadata.plan_id"))?;

        self.store
            .set_school_status(&school_id, SubscriptionStatus::Active)
            .await
            .map_err(|e| {
                tracing::error!(
                    school_id = %school_id,
                    event_id = %event.id,
                    error = %e,
                    "Webhook verified but status update failed"
                );
                WebhookError::StoreFailure(e.to_string())
            })?;

        let record = SubscriptionRecord::from_checkout(
            school_id.clone(),
            plan_id.clone(),
            session.subscription_id,
            session.customer_id,
        );
        let outcome = self
            .store
            .append_subscription_record(&record)
            .await
            .map_err(|e| {
                tracing::error!(
                    school_id = %school_id,
                    event_id = %event.id,
                    error = %e,
                    "Webhook verified but record insert failed"
                );
                WebhookError::StoreFailure(e.to_string())
            })?;

        let duplicate = outcome == AppendOutcome::AlreadyRecorded;
        tracing::info!(
            school_id = %school_id,
            plan_id = %plan_id,
            event_id = %event.id,
            duplicate,
            "Subscription activated via webhook"
        );

        Ok(HandleWebhookResult::SubscriptionActivated {
            school_id,
            duplicate,
        })
    }
}
