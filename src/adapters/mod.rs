//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API surface (axum routers, handlers, middleware)
//! - `razorpay` - Payment provider gateway
//! - `supabase` - Subscription store, media storage, and token validation
//! - `unconfigured` - Fallback implementations for absent credentials

pub mod http;
pub mod razorpay;
pub mod supabase;
pub mod unconfigured;

pub use razorpay::RazorpayGateway;
pub use supabase::SupabaseConnection;
