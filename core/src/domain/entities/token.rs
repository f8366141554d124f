//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, User};

/// Number of random bytes in a refresh token string
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the user at issuance
    pub email: String,

    /// Role of the user at issuance
    pub role: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user` - The persisted user the token is issued to
    /// * `issuer` - Configured issuer
    /// * `audience` - Configured audience
    /// * `expiry_seconds` - Lifetime of the token
    ///
    /// # Returns
    ///
    /// A new `Claims` instance valid from now
    pub fn new_access_token(user: &User, issuer: &str, audience: &str, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<i64, std::num::ParseIntError> {
        self.sub.parse()
    }

    /// Gets the role from the claims
    pub fn role(&self) -> Result<Role, String> {
        self.role.parse()
    }
}

/// Refresh token record kept by the store
///
/// Only the SHA-256 digest of the token string is persisted; the string
/// itself exists solely in the response handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Store-assigned identifier; `0` until persisted
    pub id: i64,

    /// User ID this token belongs to
    pub user_id: i64,

    /// Hex-encoded SHA-256 digest of the token string
    pub token_hash: String,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new refresh token record
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the token
    /// * `token_hash` - Digest of the token string
    /// * `expiry_seconds` - Lifetime of the token
    pub fn new(user_id: i64, token_hash: String, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            token_hash,
            expires_at: now + Duration::seconds(expiry_seconds),
            created_at: now,
        }
    }

    /// Checks if the refresh token has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the token belongs to the given user
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Token pair returned to the client after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

/// Fresh access token produced by a refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// JWT access token
    pub token: String,

    /// Expiry time in seconds
    pub expires_in: i64,
}
