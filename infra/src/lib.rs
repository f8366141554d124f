//! # Infrastructure Layer
//!
//! Concrete implementations of the store and delivery contracts defined in
//! `pr_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Memory**: process-local stores used in development and tests
//! - **Database**: MySQL implementations using SQLx
//! - **Email**: SMTP delivery through lettre, plus a logging mock
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use pr_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email delivery module - SMTP and mock mailers
pub mod email;

/// In-memory stores
pub mod memory;

/// Configuration module for infrastructure services
pub mod config {
    //! Re-exports of the shared configuration consumed by this crate

    pub use pr_shared::config::{DatabaseConfig, EmailConfig, EmailProvider};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email transport error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
