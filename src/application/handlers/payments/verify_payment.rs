//! VerifyPaymentHandler - command handler for the client-driven activation flow.

use std::sync::Arc;

use crate::domain::foundation::{PlanId, SchoolId, ValidationError};
use crate::domain::payments::{
    PaymentProof, PaymentProofVerifier, SubscriptionRecord, SubscriptionStatus,
};
use crate::ports::{AppendOutcome, SubscriptionStore};

/// Command carrying the payment proof posted by the checkout frontend.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    /// School to activate. Trust boundary: the proof signature covers only
    /// the order and payment ids, so this field and `plan_id` are accepted
    /// from the caller unauthenticated. A valid proof activates whichever
    /// school the request names.
    pub school_id: String,
    pub plan_id: String,
}

/// Result of a verified and activated payment.
#[derive(Debug, Clone)]
pub struct VerifyPaymentResult {
    pub school_id: SchoolId,
    pub plan_id: PlanId,
    /// True when the subscription record for this payment already existed.
    pub duplicate: bool,
}

/// Errors from the verify-payment flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyPaymentError {
    /// Provider key secret is absent; no proof can be checked.
    #[error("Razorpay credentials not configured")]
    NotConfigured,

    /// The command carried a malformed field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The proof's signature did not match the expected HMAC.
    #[error("Invalid Payment Signature")]
    InvalidSignature,

    /// Split-brain state: the provider confirmed the payment but the local
    /// store could not be updated. Needs manual reconciliation.
    #[error("Payment verified but failed to update subscription.")]
    ActivationFailed,
}

/// Handler for verifying payment proofs and activating subscriptions.
///
/// The store is only touched after the signature check passes. Verification
/// failures are terminal; nothing is retried and nothing is written.
///
/// The signature authenticates the payment, not the target: `school_id` and
/// `plan_id` are caller-supplied and the route carries no user session to
/// check them against. Deriving the school from an authenticated session
/// would close this, at the cost of changing the wire contract.
pub struct VerifyPaymentHandler {
    verifier: Option<PaymentProofVerifier>,
    store: Arc<dyn SubscriptionStore>,
}

impl VerifyPaymentHandler {
    pub fn new(verifier: Option<PaymentProofVerifier>, store: Arc<dyn SubscriptionStore>) -> Self {
        Self { verifier, store }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, VerifyPaymentError> {
        // 1. Validate the command
        let school_id = SchoolId::new(cmd.school_id)?;
        let plan_id = PlanId::new(cmd.plan_id)?;
        let proof = PaymentProof::new(
            cmd.razorpay_order_id,
            cmd.razorpay_payment_id,
            cmd.razorpay_signature,
        )?;

        // 2. Resolve the verifier; absent credentials mean no proof can ever pass
        let verifier = self
            .verifier
            .as_ref()
            .ok_or(VerifyPaymentError::NotConfigured)?;

        // 3. Check the signature before any store access
        if let Err(e) = verifier.verify(&proof) {
            tracing::warn!(
                school_id = %school_id,
                order_id = %proof.order_id(),
                reason = %e,
                "Rejected payment proof"
            );
            return Err(VerifyPaymentError::InvalidSignature);
        }

        // 4. Activate: status first, then the evidence record
        self.store
            .set_school_status(&school_id, SubscriptionStatus::Active)
            .await
            .map_err(|e| {
                tracing::error!(
                    school_id = %school_id,
                    payment_id = %proof.payment_id(),
                    error = %e,
                    "Payment verified but status update failed"
                );
                VerifyPaymentError::ActivationFailed
            })?;

        let record = SubscriptionRecord::from_order(school_id.clone(), plan_id.clone(), &proof);
        let outcome = self
            .store
            .append_subscription_record(&record)
            .await
            .map_err(|e| {
                tracing::error!(
                    school_id = %school_id,
                    payment_id = %proof.payment_id(),
                    error = %e,
                    "Payment verified but record insert failed"
                );
                VerifyPaymentError::ActivationFailed
            })?;

        let duplicate = outcome == AppendOutcome::AlreadyRecorded;
        tracing::info!(
            school_id = %school_id,
            plan_id = %plan_id,
            payment_id = %proof.payment_id(),
            duplicate,
            "Subscription activated via payment verification"
        );

        Ok(VerifyPaymentResult {
            school_id,
            plan_id,
            duplicate,
        })
    }
}
