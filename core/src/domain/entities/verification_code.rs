//! Verification code entity for email-based registration.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// A six-digit code emailed to a prospective user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Store-assigned identifier; the highest id per email is the latest code
    pub id: i64,

    /// Email address this code was sent to
    pub email: String,

    /// The six-digit code
    pub code: u32,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new verification code with a cryptographically secure random code
    ///
    /// # Arguments
    ///
    /// * `email` - The address the code will be sent to
    /// * `ttl_minutes` - Number of minutes until the code expires
    ///
    /// # Returns
    ///
    /// A new, not yet persisted `VerificationCode`
    pub fn new(email: String, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email,
            code: Self::generate_code(),
            expires_at: now + Duration::minutes(ttl_minutes),
            created_at: now,
        }
    }

    /// Draws a code uniformly from `100000..=999999` using the OS CSPRNG
    pub fn generate_code() -> u32 {
        OsRng.gen_range(CODE_MIN..=CODE_MAX)
    }

    /// Checks if the code has expired at the given instant
    ///
    /// The boundary instant counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the code still blocks a new request at the given instant
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
