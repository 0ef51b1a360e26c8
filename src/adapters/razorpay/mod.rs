//! Razorpay adapter module.

mod gateway;

pub use gateway::{RazorpayConfig, RazorpayGateway};
