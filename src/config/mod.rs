//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `APP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use school_backend::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod error;
mod payment;
mod server;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use payment::{PaymentConfig, ProviderCredentials};
pub use server::{Environment, ServerConfig};
pub use storage::{StorageConfig, StorageCredentials};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the school backend.
/// Load using [`AppConfig::load()`] which reads from environment variables.
///
/// Every section has workable defaults; a server started with no environment
/// at all binds to `0.0.0.0:8080` with every integration unconfigured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, frontend URL)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Razorpay credentials, plan prices)
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Object storage configuration (Supabase)
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `APP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `APP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `APP__PAYMENT__KEY_ID=rzp_test_x` -> `payment.key_id = rzp_test_x`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - URL formats
    /// - Port and timeout ranges
    /// - Credential prefixes and pair completeness
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
