//! CreateOrderHandler - command handler for creating a provider payment order.

use std::sync::Arc;

use crate::domain::foundation::{PlanId, SchoolId, ValidationError};
use crate::ports::{
    CreateOrderRequest, PaymentError, PaymentErrorCode, PaymentProvider, ProviderOrder,
};

/// Command to create a payment order for a school's plan purchase.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Amount in the currency's smallest unit (paise for INR).
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    pub plan_id: String,
    pub school_id: String,
}

/// Result of successful order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order: ProviderOrder,
}

/// Errors from the create-order flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateOrderError {
    /// Provider credentials are absent from configuration.
    #[error("Razorpay credentials not configured")]
    NotConfigured,

    /// The command carried a malformed field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider refused or could not complete the order.
    #[error("Could not create order")]
    Provider,
}

/// Handler for creating payment orders.
///
/// An order is a provider-side intent to pay; no money moves and no local
/// state changes here. Activation happens only after verify-payment succeeds
/// with a valid signature for the returned order id.
pub struct CreateOrderHandler {
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreateOrderHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self { payment_provider }
    }

    pub async fn handle(
        &self,
        cmd: CreateOrderCommand,
    ) -> Result<CreateOrderResult, CreateOrderError> {
        // 1. Validate the command
        let school_id = SchoolId::new(cmd.school_id)?;
        let plan_id = PlanId::new(cmd.plan_id)?;

        if cmd.amount <= 0 {
            return Err(ValidationError::not_positive("amount", cmd.amount).into());
        }
        if cmd.currency.trim().is_empty() {
            return Err(ValidationError::empty_field("currency").into());
        }

        // 2. Create the order with the provider
        let order = self
            .payment_provider
            .create_order(CreateOrderRequest {
                amount: cmd.amount as u64,
                currency: cmd.currency,
            })
            .await
            .map_err(map_provider_error)?;

        tracing::info!(
            school_id = %school_id,
            plan_id = %plan_id,
            order_id = %order.order_id,
            amount = order.amount,
            "Created payment order"
        );

        Ok(CreateOrderResult { order })
    }
}

fn map_provider_error(err: PaymentError) -> CreateOrderError {
    match err.code {
        PaymentErrorCode::NotConfigured => CreateOrderError::NotConfigured,
        _ => CreateOrderError::Provider,
    }
}
