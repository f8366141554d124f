//! Verification code repository trait.

use async_trait::async_trait;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Repository trait for VerificationCode persistence
///
/// Codes are append-only. Ids must be strictly increasing so that the
/// latest code for an email is the one with the highest id.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Find the most recently created code for an email
    ///
    /// # Returns
    /// * `Ok(Some(VerificationCode))` - The code with the highest id
    /// * `Ok(None)` - No code was ever issued for this email
    /// * `Err(DomainError)` - The store could not be reached
    async fn find_latest_by_email(&self, email: &str)
        -> Result<Option<VerificationCode>, DomainError>;

    /// Persist a new code and assign its id
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;
}
