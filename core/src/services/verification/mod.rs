//! Verification service module for email-based registration
//!
//! This module provides the verification code workflow:
//! - Code generation, persistence and email delivery
//! - One active code per email at a time
//! - Code checking against the latest code issued for an email

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::EmailServiceTrait;
pub use types::SendCodeResult;
