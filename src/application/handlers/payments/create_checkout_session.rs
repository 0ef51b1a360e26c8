//! CreateCheckoutSessionHandler - command handler for hosted subscription checkout.

use std::sync::Arc;

use crate::domain::foundation::{PlanId, SchoolId, ValidationError};
use crate::domain::payments::PlanCatalog;
use crate::ports::{
    CheckoutSession, CreateCheckoutSessionRequest, PaymentError, PaymentErrorCode, PaymentProvider,
};

/// Command to start a hosted checkout session for a subscription plan.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    pub plan_id: String,
    pub school_id: String,
}

/// Result carrying the provider-hosted checkout URL.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionResult {
    pub session: CheckoutSession,
}

/// Errors from the create-checkout-session flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutSessionError {
    /// Provider credentials are absent from configuration.
    #[error("Razorpay credentials not configured")]
    NotConfigured,

    /// The command carried a malformed field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider refused or could not create the session.
    #[error("Could not create checkout session")]
    Provider,
}

/// Handler for creating hosted checkout sessions.
///
/// The school and plan ids ride along as session metadata so the webhook flow
/// can attribute the completed checkout without any local session state.
pub struct CreateCheckoutSessionHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    plans: PlanCatalog,
    frontend_url: String,
}

impl CreateCheckoutSessionHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        plans: PlanCatalog,
        frontend_url: String,
    ) -> Self {
        Self {
            payment_provider,
            plans,
            frontend_url,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CreateCheckoutSessionResult, CheckoutSessionError> {
        // 1. Validate the command
        let school_id = SchoolId::new(cmd.school_id)?;
        let plan_id = PlanId::new(cmd.plan_id)?;

        // 2. Resolve the plan to the provider's price id
        let price_id = self.plans.price_for(&plan_id);

        // 3. Build redirect URLs; the session id placeholder is substituted
        //    by the provider, not by us
        let success_url = format!(
            "{}/dashboard/billing?success=true&session_id={{CHECKOUT_SESSION_ID}}",
            self.frontend_url
        );
        let cancel_url = format!("{}/dashboard/billing?canceled=true", self.frontend_url);

        // 4. Create the session with the provider
        let session = self
            .payment_provider
            .create_checkout_session(CreateCheckoutSessionRequest {
                price_id,
                school_id: school_id.clone(),
                plan_id: plan_id.clone(),
                success_url,
                cancel_url,
            })
            .await
            .map_err(map_provider_error)?;

        tracing::info!(
            school_id = %school_id,
            plan_id = %plan_id,
            session_id = %session.session_id,
            "Created checkout session"
        );

        Ok(CreateCheckoutSessionResult { session })
    }
}

fn map_provider_error(err: PaymentError) -> CheckoutSessionError {
    match err.code {
        PaymentErrorCode::NotConfigured => CheckoutSessionError::NotConfigured,
        _ => CheckoutSessionError::Provider,
    }
}
