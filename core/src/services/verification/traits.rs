//! Trait for outgoing email integration

use async_trait::async_trait;

/// Trait for email delivery of verification codes
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code to `to`
    ///
    /// Returns `true` when the message was handed to the mail transport.
    async fn send_email(&self, to: &str, subject: &str, code: u32) -> bool;
}
