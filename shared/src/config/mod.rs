//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - JWT signing, verification code and password hashing settings
//! - `database` - Database connection and pool configuration
//! - `email` - Outgoing mail delivery settings
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server bind settings
//!
//! Every value is read once at startup and treated as read-only afterwards.

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod error;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, PasswordConfig, VerificationConfig};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LoggingConfig};
pub use error::ConfigError;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration; `None` selects the in-memory stores
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: None,
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// A `.env` file in the working directory is honoured when present.
    /// Unparseable or out-of-range values are errors rather than silently
    /// replaced by defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env()?,
            email: EmailConfig::from_env()?,
            logging: LoggingConfig::for_environment(environment),
        })
    }

    /// Development fallbacks that must not reach production
    pub fn development_fallbacks(&self) -> Vec<&'static str> {
        let mut fallbacks = Vec::new();
        if self.auth.jwt.is_using_default_secret() {
            fallbacks.push("JWT_SECRET is not set");
        }
        if self.email.provider == EmailProvider::Mock {
            fallbacks.push("EMAIL_PROVIDER is mock, verification emails are only logged");
        }
        fallbacks
    }

    /// Fails in production when any development fallback is active
    pub fn ensure_production_ready(&self) -> Result<(), ConfigError> {
        if !self.environment.is_production() {
            return Ok(());
        }
        match self.development_fallbacks().as_slice() {
            [] => Ok(()),
            fallbacks => Err(ConfigError::NotProductionReady(fallbacks.join("; "))),
        }
    }
}
