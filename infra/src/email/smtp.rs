//! SMTP email delivery using lettre
//!
//! The lettre transport is blocking, so every send runs on tokio's blocking
//! pool. The transport is built once and cloned into each send.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;

use pr_core::services::verification::EmailServiceTrait;
use pr_shared::config::EmailConfig;
use pr_shared::utils::email::mask_email;

use super::render_code_body;
use crate::InfrastructureError;

/// Email service sending through an SMTP relay with STARTTLS
#[derive(Clone)]
pub struct SmtpEmailService {
    mailer: SmtpTransport,
    from_email: String,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    ///
    /// # Arguments
    /// * `config` - Email configuration with host, port and sender credentials
    ///
    /// # Returns
    /// * `Ok(SmtpEmailService)` - Transport configured; no connection is opened yet
    /// * `Err(InfrastructureError::Config)` - Missing credentials or bad TLS parameters
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        if !config.has_credentials() {
            return Err(InfrastructureError::Config(
                "SMTP delivery requires EMAIL_FROM and EMAIL_PASSWORD".to_string(),
            ));
        }

        let tls = TlsParameters::builder(config.smtp_host.clone())
            .build()
            .map_err(|e| InfrastructureError::Config(format!("Invalid TLS parameters: {}", e)))?;

        let mailer = SmtpTransport::relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
            .credentials(Credentials::new(
                config.from_email.clone(),
                config.from_password.clone(),
            ))
            .port(config.smtp_port)
            .tls(Tls::Required(tls))
            .timeout(Some(Duration::from_secs(config.timeout_seconds)))
            .build();

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP email service configured"
        );

        Ok(Self {
            mailer,
            from_email: config.from_email.clone(),
        })
    }

    fn build_message(&self, to: &str, subject: &str, code: u32) -> Result<Message, InfrastructureError> {
        let from: Mailbox = self
            .from_email
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid sender address: {}", e)))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(render_code_body(code))
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
    }

    async fn deliver(&self, to: &str, subject: &str, code: u32) -> Result<(), InfrastructureError> {
        let message = self.build_message(to, subject, code)?;
        let mailer = self.mailer.clone();

        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|e| InfrastructureError::General(format!("Email task failed: {}", e)))?
            .map_err(|e| InfrastructureError::Email(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl EmailServiceTrait for SmtpEmailService {
    async fn send_email(&self, to: &str, subject: &str, code: u32) -> bool {
        match self.deliver(to, subject, code).await {
            Ok(()) => {
                tracing::info!(
                    target: "email_service",
                    provider = "smtp",
                    to = %mask_email(to),
                    event = "email_sent",
                    "Verification email sent"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    target: "email_service",
                    provider = "smtp",
                    to = %mask_email(to),
                    error = %e,
                    event = "email_send_failed",
                    "Failed to send verification email"
                );
                false
            }
        }
    }
}
