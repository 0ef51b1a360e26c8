//! PostgREST-backed subscription store.
//!
//! Persists subscription state in two tables: `schools` holds the current
//! status column, `subscriptions` accumulates one row per verified payment.
//! Duplicate records are detected by the unique constraint on the provider
//! payment handle; the resulting 409 maps to `AppendOutcome::AlreadyRecorded`.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;

use super::SupabaseConnection;
use crate::domain::foundation::SchoolId;
use crate::domain::payments::{PaymentAttribution, SubscriptionRecord, SubscriptionStatus};
use crate::ports::{AppendOutcome, StoreError, SubscriptionStore};

/// Subscription store backed by Supabase PostgREST.
pub struct SupabaseSubscriptionStore {
    conn: SupabaseConnection,
}

impl SupabaseSubscriptionStore {
    /// Create a store over an existing connection.
    pub fn new(conn: SupabaseConnection) -> Self {
        Self { conn }
    }

    /// Builds a PostgREST request with the standard auth headers.
    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let key = self.conn.service_role_key.expose_secret();
        self.conn
            .http_client
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=minimal")
    }
}

/// Row shape for the `subscriptions` table.
///
/// Provider columns are optional because the two activation paths fill
/// different ones; absent columns are omitted rather than sent as null.
#[derive(Debug, Serialize)]
struct SubscriptionRow<'a> {
    school_id: &'a str,
    plan_id: &'a str,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    razorpay_order_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    razorpay_payment_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    razorpay_signature: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_subscription_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_customer_id: Option<&'a str>,
}

impl<'a> SubscriptionRow<'a> {
    fn from_record(record: &'a SubscriptionRecord) -> Self {
        let mut row = Self {
            school_id: record.school_id.as_str(),
            plan_id: record.plan_id.as_str(),
            status: record.status.as_str(),
            razorpay_order_id: None,
            razorpay_payment_id: None,
            razorpay_signature: None,
            provider_subscription_id: None,
            provider_customer_id: None,
        };

        match &record.attribution {
            PaymentAttribution::Order {
                order_id,
                payment_id,
                signature,
            } => {
                row.razorpay_order_id = Some(order_id);
                row.razorpay_payment_id = Some(payment_id);
                row.razorpay_signature = Some(signature);
            }
            PaymentAttribution::Checkout {
                subscription_id,
                customer_id,
            } => {
                row.provider_subscription_id = Some(subscription_id);
                row.provider_customer_id = customer_id.as_deref();
            }
        }

        row
    }
}

/// Maps an append response status to an outcome.
fn append_outcome_from_status(
    status: reqwest::StatusCode,
    body: impl FnOnce() -> String,
) -> Result<AppendOutcome, StoreError> {
    if status.is_success() {
        return Ok(AppendOutcome::Recorded);
    }
    if status == reqwest::StatusCode::CONFLICT {
        return Ok(AppendOutcome::AlreadyRecorded);
    }
    if status.is_server_error() {
        return Err(StoreError::Unavailable(format!(
            "PostgREST returned {}: {}",
            status,
            body()
        )));
    }
    Err(StoreError::Rejected(format!(
        "PostgREST returned {}: {}",
        status,
        body()
    )))
}

#[async_trait]
impl SubscriptionStore for SupabaseSubscriptionStore {
    async fn set_school_status(
        &self,
        school_id: &SchoolId,
        status: SubscriptionStatus,
    ) -> Result<(), StoreError> {
        let url = format!(
            "{}/rest/v1/schools?id=eq.{}",
            self.conn.base_url,
            school_id.as_str()
        );

        let body = serde_json::json!({ "subscription_status": status.as_str() });

        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status_code = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                school_id = %school_id,
                status = %status_code,
                error = %error_text,
                "Failed to update school subscription status"
            );
            if status_code.is_server_error() {
                return Err(StoreError::Unavailable(format!(
                    "PostgREST returned {}: {}",
                    status_code, error_text
                )));
            }
            return Err(StoreError::Rejected(format!(
                "PostgREST returned {}: {}",
                status_code, error_text
            )));
        }

        Ok(())
    }

    async fn append_subscription_record(
        &self,
        record: &SubscriptionRecord,
    ) -> Result<AppendOutcome, StoreError> {
        let url = format!("{}/rest/v1/subscriptions", self.conn.base_url);
        let row = SubscriptionRow::from_record(record);

        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&row)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status_code = response.status();
        if !status_code.is_success() && status_code != reqwest::StatusCode::CONFLICT {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                school_id = %record.school_id,
                idempotency_key = record.idempotency_key(),
                status = %status_code,
                error = %error_text,
                "Failed to append subscription record"
            );
            return append_outcome_from_status(status_code, move || error_text);
        }

        append_outcome_from_status(status_code, String::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PlanId;
    use crate::domain::payments::PaymentProof;

    fn order_record() -> SubscriptionRecord {
        let proof = PaymentProof::new("order_1", "pay_1", "cafe01").unwrap();
        SubscriptionRecord::from_order(
            SchoolId::new("school-1").unwrap(),
            PlanId::new("basic").unwrap(),
            &proof,
        )
    }

    fn checkout_record() -> SubscriptionRecord {
        SubscriptionRecord::from_checkout(
            SchoolId::new("school-1").unwrap(),
            PlanId::new("pro").unwrap(),
            "sub_1",
            None,
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Row Serialization Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn order_row_serializes_razorpay_columns() {
        let record = order_record();
        let row = SubscriptionRow::from_record(&record);

        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["school_id"], "school-1");
        assert_eq!(json["plan_id"], "basic");
        assert_eq!(json["status"], "active");
        assert_eq!(json["razorpay_order_id"], "order_1");
        assert_eq!(json["razorpay_payment_id"], "pay_1");
        assert_eq!(json["razorpay_signature"], "cafe01");
        assert!(json.get("provider_subscription_id").is_none());
        assert!(json.get("provider_customer_id").is_none());
    }

    #[test]
    fn checkout_row_serializes_provider_columns() {
        let record = checkout_record();
        let row = SubscriptionRow::from_record(&record);

        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["provider_subscription_id"], "sub_1");
        assert!(json.get("provider_customer_id").is_none());
        assert!(json.get("razorpay_order_id").is_none());
        assert!(json.get("razorpay_payment_id").is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Status Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn created_maps_to_recorded() {
        let outcome =
            append_outcome_from_status(reqwest::StatusCode::CREATED, String::new).unwrap();
        assert_eq!(outcome, AppendOutcome::Recorded);
    }

    #[test]
    fn conflict_maps_to_already_recorded() {
        let outcome =
            append_outcome_from_status(reqwest::StatusCode::CONFLICT, String::new).unwrap();
        assert_eq!(outcome, AppendOutcome::AlreadyRecorded);
    }

    #[test]
    fn server_error_maps_to_retryable_unavailable() {
        let err = append_outcome_from_status(reqwest::StatusCode::SERVICE_UNAVAILABLE, || {
            "down".to_string()
        })
        .unwrap_err();

        assert!(err.is_retryable());
    }

    #[test]
    fn client_error_maps_to_rejected() {
        let err = append_outcome_from_status(reqwest::StatusCode::BAD_REQUEST, || {
            "bad column".to_string()
        })
        .unwrap_err();

        assert!(matches!(err, StoreError::Rejected(_)));
        assert!(!err.is_retryable());
    }
}
