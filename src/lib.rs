//! School App Backend
//!
//! A small backend gateway for the school platform. It accepts media uploads
//! (after validating the caller's bearer token with the identity provider)
//! and orchestrates the payment provider's order/checkout flow, verifying
//! payment authenticity before recording subscription state.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
