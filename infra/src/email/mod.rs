//! Email delivery implementations
//!
//! Both mailers implement `EmailServiceTrait` from `pr_core`. The SMTP mailer
//! is used when `EMAIL_PROVIDER=smtp`; the mock logs messages and keeps the
//! last code per recipient for development and tests.

pub mod mock;
pub mod smtp;

pub use mock::MockEmailService;
pub use smtp::SmtpEmailService;

use async_trait::async_trait;

use pr_core::services::verification::EmailServiceTrait;
use pr_shared::config::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

/// The mailer selected by `EMAIL_PROVIDER`
#[derive(Clone)]
pub enum EmailSender {
    Smtp(SmtpEmailService),
    Mock(MockEmailService),
}

impl EmailSender {
    /// Build the configured mailer
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        match config.provider {
            EmailProvider::Smtp => Ok(EmailSender::Smtp(SmtpEmailService::new(config)?)),
            EmailProvider::Mock => {
                tracing::warn!("Using mock email service; verification codes are only logged");
                Ok(EmailSender::Mock(MockEmailService::new()))
            }
        }
    }
}

#[async_trait]
impl EmailServiceTrait for EmailSender {
    async fn send_email(&self, to: &str, subject: &str, code: u32) -> bool {
        match self {
            EmailSender::Smtp(sender) => sender.send_email(to, subject, code).await,
            EmailSender::Mock(sender) => sender.send_email(to, subject, code).await,
        }
    }
}

/// Plain-text body carrying a verification code
pub fn render_code_body(code: u32) -> String {
    format!("Your verification code is {code}\n\nThe code expires shortly. If you did not request it, ignore this email.\n")
}
