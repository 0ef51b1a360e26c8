//! Webhook signature verification.
//!
//! Verifies provider webhook deliveries with HMAC-SHA256 over the exact raw
//! request body, plus a timestamp window to reject replayed deliveries. The
//! MAC is computed over the received bytes as-is; any re-serialization of the
//! payload invalidates the signature.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};

use super::signature::constant_time_compare;
use super::webhook_errors::WebhookError;
use super::webhook_event::WebhookEvent;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the `X-Webhook-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// v1 signature (HMAC-SHA256), hex-decoded.
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses an `X-Webhook-Signature` header string.
    ///
    /// Format: `t=<timestamp>,v1=<hex signature>`. Unknown keys are ignored
    /// so the sender can add schemes without breaking older receivers.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedHeader` if the header cannot be
    /// split into key-value pairs, the timestamp is not an integer, the
    /// signature is not valid hex, or either required key is absent.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                WebhookError::MalformedHeader("invalid header format".to_string())
            })?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::MalformedHeader("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    v1_signature = Some(hex::decode(value).map_err(|_| {
                        WebhookError::MalformedHeader("invalid v1 signature hex".to_string())
                    })?);
                }
                _ => {
                    // Unknown keys are ignored for forward compatibility
                }
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| WebhookError::MalformedHeader("missing timestamp".to_string()))?;
        let v1_signature = v1_signature
            .ok_or_else(|| WebhookError::MalformedHeader("missing v1 signature".to_string()))?;

        Ok(SignatureHeader {
            timestamp,
            v1_signature,
        })
    }
}

/// Verifier for provider webhook deliveries.
#[derive(Clone)]
pub struct WebhookVerifier {
    /// Webhook signing secret from the provider dashboard.
    secret: SecretString,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verifies the webhook signature and parses the event.
    ///
    /// # Verification Steps
    ///
    /// 1. Parse the signature header
    /// 2. Validate timestamp is within acceptable range
    /// 3. Compute the expected HMAC-SHA256 over `{timestamp}.{payload}`
    /// 4. Compare signatures in constant time
    /// 5. Parse the JSON payload into a WebhookEvent
    ///
    /// # Errors
    ///
    /// - `MalformedHeader` - Header could not be parsed
    /// - `TimestampOutOfRange` - Event is older than 5 minutes
    /// - `InvalidTimestamp` - Event timestamp is too far in the future
    /// - `InvalidSignature` - Signature comparison failed
    /// - `InvalidPayload` - Body is not a valid event JSON document
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<WebhookEvent, WebhookError> {
        // 1. Parse signature header
        let header = SignatureHeader::parse(signature_header)?;

        // 2. Validate timestamp
        self.validate_timestamp(header.timestamp)?;

        // 3. Compute expected signature
        let expected_signature = self.compute_signature(header.timestamp, payload);

        // 4. Compare signatures (constant-time)
        if !constant_time_compare(&expected_signature, &header.v1_signature) {
            return Err(WebhookError::InvalidSignature);
        }

        // 5. Parse event
        let event: WebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;

        Ok(event)
    }

    /// Validates that the timestamp is within acceptable bounds.
    fn validate_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        // Reject events that are too old
        if age > MAX_EVENT_AGE_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }

        // Reject events from the future (with clock skew tolerance)
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::InvalidTimestamp);
        }

        Ok(())
    }

    /// Computes HMAC-SHA256 over `{timestamp}.` followed by the raw payload.
    ///
    /// The payload bytes are fed to the MAC directly, never passed through a
    /// string conversion, so verification stays byte-exact for any body.
    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut mac = Hmac::<sha2::Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(format!("{timestamp}.").as_bytes());
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Computes a hex HMAC-SHA256 for use in test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, timestamp: i64, payload: &str) -> String {
    let mut mac = Hmac::<sha2::Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key");
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
