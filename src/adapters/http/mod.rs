//! HTTP adapters - REST API implementations.
//!
//! Each route group has its own HTTP adapter module; this module assembles
//! them into the full `/api/v1` router.

pub mod health;
pub mod media;
pub mod middleware;
pub mod payments;

// Re-export key types for convenience
pub use media::{media_routes, MediaAppState};
pub use payments::{payments_routes, PaymentsAppState};

use axum::routing::get;
use axum::Router;

use self::health::service_status;
use self::middleware::{auth_middleware, AuthState};

/// Assemble the full API router.
///
/// Route map:
/// - `GET  /api/v1` - service status
/// - `POST /api/v1/upload` - authenticated upload
/// - `POST /api/v1/payments/create-order`
/// - `POST /api/v1/payments/verify-payment`
/// - `POST /api/v1/payments/create-checkout-session`
/// - `POST /api/v1/payments/webhook`
///
/// The auth middleware wraps only the media routes. Payment routes trust
/// request signatures instead of user tokens, and the status route is
/// public.
pub fn api_router(
    payments_state: PaymentsAppState,
    media_state: MediaAppState,
    validator: AuthState,
) -> Router {
    let payments = payments_routes().with_state(payments_state);
    let media = media_routes()
        .layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ))
        .with_state(media_state);

    let v1 = Router::new()
        .route("/", get(service_status))
        .nest("/payments", payments)
        .merge(media);

    Router::new().nest("/api/v1", v1)
}
