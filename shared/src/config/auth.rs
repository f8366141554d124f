//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use super::error::{env_parse_range, ConfigError};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Accepted access token lifetimes in seconds: one minute to one day
pub const ACCESS_EXPIRY_RANGE: (i64, i64) = (60, 86_400);

/// Accepted refresh token lifetimes in seconds: one minute to one year
pub const REFRESH_EXPIRY_RANGE: (i64, i64) = (60, 31_536_000);

/// Accepted verification code lifetimes in minutes: up to one day
pub const CODE_TTL_RANGE: (i64, i64) = (1, 1_440);

/// bcrypt work factors the `bcrypt` crate accepts
pub const BCRYPT_COST_RANGE: (i64, i64) = (4, 31);

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric key used to sign access tokens (HS256)
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 3600,      // 1 hour
            refresh_token_expiry: 2592000,  // 30 days
            issuer: String::from("product-review"),
            audience: String::from("product-review-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_expiry: env_parse_range(
                "JWT_ACCESS_TOKEN_EXPIRY",
                defaults.access_token_expiry,
                ACCESS_EXPIRY_RANGE.0,
                ACCESS_EXPIRY_RANGE.1,
            )?,
            refresh_token_expiry: env_parse_range(
                "JWT_REFRESH_TOKEN_EXPIRY",
                defaults.refresh_token_expiry,
                REFRESH_EXPIRY_RANGE.0,
                REFRESH_EXPIRY_RANGE.1,
            )?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
        })
    }
}

/// Email verification code settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a verification code stays valid
    pub code_ttl_minutes: i64,

    /// Subject line of the verification email
    #[serde(default = "default_email_subject")]
    pub email_subject: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: 10,
            email_subject: default_email_subject(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            code_ttl_minutes: env_parse_range(
                "VERIFICATION_CODE_TTL_MINUTES",
                defaults.code_ttl_minutes,
                CODE_TTL_RANGE.0,
                CODE_TTL_RANGE.1,
            )?,
            email_subject: std::env::var("VERIFICATION_EMAIL_SUBJECT").unwrap_or(defaults.email_subject),
        })
    }
}

/// Password hashing settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        // bcrypt::DEFAULT_COST
        Self { bcrypt_cost: 12 }
    }
}

impl PasswordConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let cost = env_parse_range(
            "BCRYPT_COST",
            i64::from(Self::default().bcrypt_cost),
            BCRYPT_COST_RANGE.0,
            BCRYPT_COST_RANGE.1,
        )?;
        // bounded to 4..=31 above
        Ok(Self {
            bcrypt_cost: cost as u32,
        })
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            verification: VerificationConfig::from_env()?,
            password: PasswordConfig::from_env()?,
        })
    }
}

fn default_email_subject() -> String {
    String::from("Code Verification")
}
