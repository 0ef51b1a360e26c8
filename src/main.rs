//! School backend server binary.
//!
//! Loads configuration from the environment, wires the configured adapters
//! into the application handlers and serves the `/api/v1` REST API. Missing
//! integration credentials never stop startup: the affected routes answer
//! with a configuration error instead.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use school_backend::adapters::http::{api_router, MediaAppState, PaymentsAppState};
use school_backend::adapters::supabase::{
    SupabaseMediaStorage, SupabaseSubscriptionStore, SupabaseTokenValidator,
};
use school_backend::adapters::unconfigured::{
    UnconfiguredMediaStorage, UnconfiguredPaymentProvider, UnconfiguredSubscriptionStore,
    UnconfiguredTokenValidator,
};
use school_backend::adapters::{RazorpayGateway, SupabaseConnection};
use school_backend::adapters::razorpay::RazorpayConfig;
use school_backend::config::AppConfig;
use school_backend::domain::payments::{PaymentProofVerifier, WebhookVerifier};
use school_backend::ports::{MediaStorage, PaymentProvider, SubscriptionStore, TokenValidator};

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");

    init_tracing(&config);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    }

    let (payment_provider, public_key_id) = build_payment_provider(&config);
    let (subscription_store, media_storage, token_validator) = build_supabase_adapters(&config);

    let proof_verifier = config
        .payment
        .key_secret
        .clone()
        .map(PaymentProofVerifier::new);
    let webhook_verifier = config
        .payment
        .webhook_secret
        .clone()
        .map(WebhookVerifier::new);

    let payments_state = PaymentsAppState {
        payment_provider,
        subscription_store,
        proof_verifier,
        webhook_verifier,
        plans: config.payment.plan_catalog(),
        frontend_url: config.server.frontend_url.trim_end_matches('/').to_string(),
        public_key_id,
    };
    let media_state = MediaAppState {
        storage: media_storage,
    };

    let app = build_app(payments_state, media_state, token_validator, &config);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "School backend listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter; production gets JSON output
/// for log aggregation, everything else the human-readable format.
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Build the payment provider from configuration.
///
/// Returns the provider and the public key id handed to checkout widgets.
/// The key secret stays inside the gateway and the proof verifier.
fn build_payment_provider(config: &AppConfig) -> (Arc<dyn PaymentProvider>, Option<String>) {
    match config.payment.credentials() {
        Some(creds) => {
            let gateway_config = RazorpayConfig::new(creds.key_id.clone(), creds.key_secret)
                .with_base_url(config.payment.api_base_url.clone());
            tracing::info!(
                test_mode = config.payment.is_test_mode(),
                "Payment provider configured"
            );
            (
                Arc::new(RazorpayGateway::new(gateway_config)),
                Some(creds.key_id),
            )
        }
        None => {
            tracing::warn!(
                "Payment credentials not set; payment routes will report the integration as unconfigured"
            );
            (Arc::new(UnconfiguredPaymentProvider), None)
        }
    }
}

/// Build the Supabase-backed adapters from configuration.
///
/// One connection is shared across the subscription store, media storage
/// and token validator. Without credentials all three fall back to their
/// unconfigured stand-ins.
fn build_supabase_adapters(
    config: &AppConfig,
) -> (
    Arc<dyn SubscriptionStore>,
    Arc<dyn MediaStorage>,
    Arc<dyn TokenValidator>,
) {
    match config.storage.credentials() {
        Some(creds) => {
            let conn = SupabaseConnection::new(creds.url, creds.service_role_key);
            tracing::info!(bucket = %config.storage.bucket, "Supabase integration configured");
            (
                Arc::new(SupabaseSubscriptionStore::new(conn.clone())),
                Arc::new(SupabaseMediaStorage::new(
                    conn.clone(),
                    config.storage.bucket.clone(),
                )),
                Arc::new(SupabaseTokenValidator::new(conn)),
            )
        }
        None => {
            tracing::warn!(
                "Supabase credentials not set; upload and subscription routes will report the integration as unconfigured"
            );
            (
                Arc::new(UnconfiguredSubscriptionStore),
                Arc::new(UnconfiguredMediaStorage),
                Arc::new(UnconfiguredTokenValidator),
            )
        }
    }
}

/// Assemble the router with the middleware stack.
///
/// Outermost to innermost: request id generation and propagation, tracing,
/// CORS, request timeout, then the API routes.
fn build_app(
    payments_state: PaymentsAppState,
    media_state: MediaAppState,
    token_validator: Arc<dyn TokenValidator>,
    config: &AppConfig,
) -> Router {
    api_router(payments_state, media_state, token_validator)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// CORS layer allowing the frontend origins from configuration.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server");
}
