//! Error taxonomy for webhook processing.
//!
//! Every variant maps to an HTTP status the provider understands: 4xx errors
//! are terminal (the provider should not redeliver), while retryable store
//! failures map to 502 so the provider's retry schedule redelivers the event.

use thiserror::Error;

/// Errors that can occur while verifying and processing a webhook event.
#[derive(Debug, Clone, Error)]
pub enum WebhookError {
    /// The signature header was present but did not follow the
    /// `t=<timestamp>,v1=<hex>` format.
    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    /// The event timestamp is further in the future than the allowed
    /// clock skew.
    #[error("Event timestamp is in the future")]
    InvalidTimestamp,

    /// The event is older than the replay-protection window.
    #[error("Event timestamp outside the allowed age window")]
    TimestampOutOfRange,

    /// The computed HMAC did not match any signature in the header.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The payload was not valid JSON for the expected event shape.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A recognized event arrived without a field the flow requires.
    #[error("Event payload missing required field '{0}'")]
    MissingField(&'static str),

    /// No webhook secret was configured at startup.
    #[error("Webhook secret not configured")]
    NotConfigured,

    /// The subscription store failed after the signature was verified.
    /// Surfaced as retryable so the provider redelivers the event.
    #[error("Subscription store update failed: {0}")]
    StoreFailure(String),
}

impl WebhookError {
    /// HTTP status code this error maps to at the webhook endpoint.
    pub fn status_code(&self) -> u16 {
        match self {
            WebhookError::MalformedHeader(_)
            | WebhookError::InvalidTimestamp
            | WebhookError::TimestampOutOfRange
            | WebhookError::InvalidSignature
            | WebhookError::InvalidPayload(_)
            | WebhookError::MissingField(_) => 400,
            WebhookError::NotConfigured => 500,
            WebhookError::StoreFailure(_) => 502,
        }
    }

    /// Whether the provider should redeliver the event.
    ///
    /// Only store failures after a verified event are retryable; signature
    /// and payload failures are terminal no matter how often they are
    /// redelivered.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::StoreFailure(_))
    }
}
