//! Client payment proof verification.
//!
//! After a checkout completes in the browser, the client posts back the
//! provider's order id, payment id, and an HMAC-SHA256 signature computed by
//! the provider over `{order_id}|{payment_id}` with the API key secret. The
//! verifier recomputes that MAC server-side; only a matching proof may
//! activate a subscription.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::foundation::ValidationError;

/// Client-supplied evidence that a provider payment completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentProof {
    order_id: String,
    payment_id: String,
    signature: String,
}

impl PaymentProof {
    /// Creates a payment proof, rejecting empty components.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` when any component is empty.
    pub fn new(
        order_id: impl Into<String>,
        payment_id: impl Into<String>,
        signature: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let order_id = order_id.into();
        let payment_id = payment_id.into();
        let signature = signature.into();

        if order_id.trim().is_empty() {
            return Err(ValidationError::empty_field("razorpay_order_id"));
        }
        if payment_id.trim().is_empty() {
            return Err(ValidationError::empty_field("razorpay_payment_id"));
        }
        if signature.trim().is_empty() {
            return Err(ValidationError::empty_field("razorpay_signature"));
        }

        Ok(Self {
            order_id,
            payment_id,
            signature,
        })
    }

    /// Provider order id the proof refers to.
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Provider payment id the proof refers to.
    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    /// Hex-encoded HMAC the client relayed from the provider.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Why a payment proof was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProofError {
    /// The signature is well-formed hex but does not match the recomputed MAC.
    #[error("payment signature mismatch")]
    SignatureMismatch,

    /// The signature is not valid hex and cannot match any MAC.
    #[error("payment signature is not valid hex")]
    MalformedSignature,
}

/// Verifier for client payment proofs.
#[derive(Clone)]
pub struct PaymentProofVerifier {
    /// Provider API key secret; the same key the provider signs with.
    key_secret: SecretString,
}

impl PaymentProofVerifier {
    /// Creates a new verifier with the provider key secret.
    pub fn new(key_secret: SecretString) -> Self {
        Self { key_secret }
    }

    /// Verifies a payment proof against the recomputed MAC.
    ///
    /// # Errors
    ///
    /// - `MalformedSignature` - the supplied signature is not hex
    /// - `SignatureMismatch` - the MAC over `{order_id}|{payment_id}` differs
    pub fn verify(&self, proof: &PaymentProof) -> Result<(), ProofError> {
        let supplied = hex::decode(proof.signature()).map_err(|_| ProofError::MalformedSignature)?;

        let expected = self.compute_signature(proof.order_id(), proof.payment_id());

        if !constant_time_compare(&expected, &supplied) {
            return Err(ProofError::SignatureMismatch);
        }

        Ok(())
    }

    /// Computes HMAC-SHA256 over `{order_id}|{payment_id}`.
    fn compute_signature(&self, order_id: &str, payment_id: &str) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.key_secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Performs constant-time comparison of two byte slices.
///
/// The length check short-circuits, which is fine: signature lengths are
/// public, only their contents are secret.
pub(crate) fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes the hex proof signature a provider would produce, for fixtures.
#[cfg(test)]
pub fn compute_proof_signature(key_secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key_secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
