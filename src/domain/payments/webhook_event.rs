//! Webhook event wire type.
//!
//! Events arrive as JSON with a `type` discriminator and an opaque
//! `data.object` payload whose shape depends on the event family. Only the
//! checkout-completed family is given a typed view; everything else is
//! dispatched on the type string alone.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::webhook_errors::WebhookError;

/// A provider webhook event, parsed after signature verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Provider-assigned event id.
    pub id: String,

    /// Event type string, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the provider created the event.
    pub created: i64,

    /// Event payload envelope.
    pub data: EventData,

    /// Whether the event originated from a live-mode integration.
    #[serde(default)]
    pub livemode: bool,

    /// Provider API version that produced the event.
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Envelope around the event's primary object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    /// The object the event describes; shape varies by event type.
    pub object: Value,
}

/// Event families the webhook flow dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A hosted checkout finished; subscription must be activated.
    CheckoutSessionCompleted,
    /// A recurring invoice was paid; renewal bookkeeping placeholder.
    InvoicePaymentSucceeded,
    /// Any other event type; acknowledged without side effects.
    Other,
}

impl EventKind {
    /// Classifies an event type string.
    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            "checkout.session.completed" => EventKind::CheckoutSessionCompleted,
            "invoice.payment_succeeded" => EventKind::InvoicePaymentSucceeded,
            _ => EventKind::Other,
        }
    }
}

/// Typed view of a `checkout.session.completed` object.
///
/// The checkout session carries the school and plan in metadata written when
/// the session was created, plus the provider's subscription handle used as
/// the idempotency key for the resulting record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionData {
    pub school_id: String,
    pub plan_id: String,
    pub subscription_id: String,
    pub customer_id: Option<String>,
}

impl WebhookEvent {
    /// Returns the event family for dispatch.
    pub fn kind(&self) -> EventKind {
        EventKind::from_type(&self.event_type)
    }

    /// Whether this event came from a live-mode integration.
    pub fn is_live(&self) -> bool {
        self.livemode
    }

    /// Extracts the checkout session fields the activation flow requires.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MissingField` when `metadata.school_id`,
    /// `metadata.plan_id`, or `subscription` is absent or empty.
    pub fn checkout_session(&self) -> Result<CheckoutSessionData, WebhookError> {
        let object = &self.data.object;

        let school_id = non_empty_str(object, &["metadata", "school_id"])
            .ok_or(WebhookError::MissingField("metadata.school_id"))?;
        let plan_id = non_empty_str(object, &["metadata", "plan_id"])
            .ok_or(WebhookError::MissingField("metadata.plan_id"))?;
        let subscription_id = non_empty_str(object, &["subscription"])
            .ok_or(WebhookError::MissingField("subscription"))?;
        let customer_id = non_empty_str(object, &["customer"]);

        Ok(CheckoutSessionData {
            school_id: school_id.to_string(),
            plan_id: plan_id.to_string(),
            subscription_id: subscription_id.to_string(),
            customer_id: customer_id.map(str::to_string),
        })
    }
}

/// Walks a JSON path and returns the string at its end if non-empty.
fn non_empty_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().filter(|s| !s.is_empty())
}
