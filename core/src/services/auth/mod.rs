//! Authentication service module
//!
//! This module composes the identity flow exposed over HTTP:
//! - Verification code requests for new emails
//! - Registration after code verification
//! - Login with email and password
//! - Access token refresh

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
