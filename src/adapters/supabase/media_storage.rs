//! Supabase Storage media adapter.
//!
//! Uploads objects through the Storage API with the service role key and
//! returns the bucket's public URL for the object. Uploads use `x-upsert` so
//! re-sending the same path overwrites instead of erroring.

use async_trait::async_trait;
use secrecy::ExposeSecret;

use super::SupabaseConnection;
use crate::ports::{MediaStorage, StorageError, StoredMedia};

/// Media storage backed by Supabase Storage.
pub struct SupabaseMediaStorage {
    conn: SupabaseConnection,
    bucket: String,
}

impl SupabaseMediaStorage {
    /// Create a storage adapter over an existing connection.
    pub fn new(conn: SupabaseConnection, bucket: impl Into<String>) -> Self {
        Self {
            conn,
            bucket: bucket.into(),
        }
    }

    /// Public URL the bucket serves an object path from.
    fn public_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.conn.base_url, self.bucket, object_path
        )
    }
}

#[async_trait]
impl MediaStorage for SupabaseMediaStorage {
    async fn store(
        &self,
        object_path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredMedia, StorageError> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.conn.base_url, self.bucket, object_path
        );

        let key = self.conn.service_role_key.expose_secret();
        let response = self
            .conn
            .http_client
            .post(&url)
            .header("apikey", key)
            .bearer_auth(key)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                object_path = %object_path,
                status = %status,
                error = %error_text,
                "Supabase storage upload failed"
            );
            return Err(StorageError::UploadFailed(format!(
                "Storage API returned {}: {}",
                status, error_text
            )));
        }

        Ok(StoredMedia {
            public_url: self.public_url(object_path),
        })
    }
}
