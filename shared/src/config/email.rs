//! Outgoing email configuration

use serde::{Deserialize, Serialize};

use super::error::{env_parse, parse_value, ConfigError};

/// Which delivery backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Real delivery over SMTP with STARTTLS/TLS
    Smtp,
    /// Log-only delivery for development and tests
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP delivery settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery backend
    pub provider: EmailProvider,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP port (587 for STARTTLS)
    pub smtp_port: u16,

    /// Sender address, also used as the SMTP username
    pub from_email: String,

    /// SMTP password or app-specific password
    #[serde(default, skip_serializing)]
    pub from_password: String,

    /// Send timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            from_email: String::from("no-reply@localhost"),
            from_password: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    ///
    /// An unset `EMAIL_PROVIDER` selects the mock mailer; a set but
    /// unrecognised one is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            provider: parse_provider(std::env::var("EMAIL_PROVIDER").ok())?,
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: env_parse("SMTP_PORT", defaults.smtp_port)?,
            from_email: std::env::var("EMAIL_FROM").unwrap_or(defaults.from_email),
            from_password: std::env::var("EMAIL_PASSWORD").unwrap_or_default(),
            timeout_seconds: defaults.timeout_seconds,
        })
    }

    /// Whether SMTP credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.from_email.trim().is_empty() && !self.from_password.trim().is_empty()
    }
}

fn parse_provider(raw: Option<String>) -> Result<EmailProvider, ConfigError> {
    parse_value("EMAIL_PROVIDER", raw, EmailProvider::Mock)
}

fn default_timeout() -> u64 {
    10
}
