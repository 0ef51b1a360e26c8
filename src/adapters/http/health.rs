//! Service status endpoint.

use axum::response::IntoResponse;
use axum::Json;

/// GET /api/v1 - Service liveness message
///
/// Unauthenticated; used by deploy checks and as a smoke test that routing
/// and JSON serialization work end to end.
pub async fn service_status() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "School App Backend is running"
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;

    #[tokio::test]
    async fn service_status_returns_200() {
        let response = service_status().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn service_status_body_names_the_service() {
        let response = service_status().await.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "School App Backend is running");
    }
}
