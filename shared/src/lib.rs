//! Shared utilities and common types for the ProductReview identity server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded once at startup
//! - The error response body returned by the HTTP boundary
//! - Email address validation and masking

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, EmailConfig, EmailProvider, Environment, JwtConfig,
    LoggingConfig, PasswordConfig, ServerConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::email;
