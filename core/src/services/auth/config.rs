//! Configuration for the authentication service

use pr_shared::config::{AuthConfig, PasswordConfig};

use crate::services::token::TokenServiceConfig;
use crate::services::verification::VerificationServiceConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Verification code settings
    pub verification: VerificationServiceConfig,
    /// Signing and lifetime settings for tokens
    pub token: TokenServiceConfig,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            verification: VerificationServiceConfig::default(),
            token: TokenServiceConfig::default(),
            bcrypt_cost: PasswordConfig::default().bcrypt_cost,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            verification: VerificationServiceConfig::from(&config.verification),
            token: TokenServiceConfig::from(&config.jwt),
            bcrypt_cost: config.password.bcrypt_cost,
        }
    }
}
