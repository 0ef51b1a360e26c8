//! Subscription state and the records that justify it.
//!
//! A school's subscription flips to active only on the strength of a verified
//! payment. Each activation also appends a `SubscriptionRecord` carrying the
//! provider evidence, so every active school can be traced back to the exact
//! payment or checkout that paid for it.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::signature::PaymentProof;
use crate::domain::foundation::{PlanId, SchoolId};

/// Subscription standing of a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    #[default]
    Inactive,
}

impl SubscriptionStatus {
    /// Returns true if the school currently has an active subscription.
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    /// Lowercase column value used by stores and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider evidence attached to a subscription record.
///
/// Records created from the two activation paths carry different provider
/// handles; the attribution keeps them distinguishable after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentAttribution {
    /// Activated from a client payment proof for a one-off order.
    Order {
        order_id: String,
        payment_id: String,
        signature: String,
    },
    /// Activated from a `checkout.session.completed` webhook.
    Checkout {
        subscription_id: String,
        customer_id: Option<String>,
    },
}

/// One verified activation of a school's subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub school_id: SchoolId,
    pub plan_id: PlanId,
    pub status: SubscriptionStatus,
    pub attribution: PaymentAttribution,
}

impl SubscriptionRecord {
    /// Builds the record for an order-flow activation.
    ///
    /// Only called after the proof has been verified.
    pub fn from_order(school_id: SchoolId, plan_id: PlanId, proof: &PaymentProof) -> Self {
        Self {
            school_id,
            plan_id,
            status: SubscriptionStatus::Active,
            attribution: PaymentAttribution::Order {
                order_id: proof.order_id().to_string(),
                payment_id: proof.payment_id().to_string(),
                signature: proof.signature().to_string(),
            },
        }
    }

    /// Builds the record for a webhook checkout activation.
    pub fn from_checkout(
        school_id: SchoolId,
        plan_id: PlanId,
        subscription_id: impl Into<String>,
        customer_id: Option<String>,
    ) -> Self {
        Self {
            school_id,
            plan_id,
            status: SubscriptionStatus::Active,
            attribution: PaymentAttribution::Checkout {
                subscription_id: subscription_id.into(),
                customer_id,
            },
        }
    }

    /// The provider handle that makes duplicate deliveries detectable.
    ///
    /// Two records with the same key describe the same underlying payment and
    /// only one of them may land in the store.
    pub fn idempotency_key(&self) -> &str {
        match &self.attribution {
            PaymentAttribution::Order { payment_id, .. } => payment_id,
            PaymentAttribution::Checkout {
                subscription_id, ..
            } => subscription_id,
        }
    }
}

/// Mapping from plan ids to the provider's price ids.
///
/// Plans without an explicit mapping pass through unchanged, which lets
/// deployments that name their plans after provider price ids skip the
/// mapping entirely.
#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    prices: HashMap<String, String>,
}

impl PlanCatalog {
    /// Creates an empty catalog; every plan id passes through as a price id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from `(plan id, price id)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            prices: entries.into_iter().collect(),
        }
    }

    /// Resolves a plan to the provider price id used at checkout.
    pub fn price_for(&self, plan_id: &PlanId) -> String {
        self.prices
            .get(plan_id.as_str())
            .cloned()
            .unwrap_or_else(|| plan_id.as_str().to_string())
    }
}
