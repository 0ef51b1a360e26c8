//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, authentication types, and error types that form
//! the vocabulary of the school backend domain.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::ValidationError;
pub use ids::{PlanId, SchoolId, UserId};
