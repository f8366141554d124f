//! Main verification service implementation

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use pr_shared::utils::email::mask_email;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{UserRepository, VerificationCodeRepository};

use super::config::VerificationServiceConfig;
use super::traits::EmailServiceTrait;
use super::types::SendCodeResult;

/// Verification service issuing and checking emailed registration codes
pub struct VerificationService<U, V, E>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    E: EmailServiceTrait,
{
    /// Used to refuse codes for emails that are already registered
    user_repository: Arc<U>,
    /// Append-only code store
    code_repository: Arc<V>,
    /// Email delivery
    email_service: Arc<E>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<U, V, E> VerificationService<U, V, E>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    E: EmailServiceTrait,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - User store
    /// * `code_repository` - Verification code store
    /// * `email_service` - Email delivery implementation
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        code_repository: Arc<V>,
        email_service: Arc<E>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            code_repository,
            email_service,
            config,
        }
    }

    /// Issue a verification code to an email address
    ///
    /// This method:
    /// 1. Refuses emails that are already registered
    /// 2. Refuses while the latest code for the email is still active
    /// 3. Generates a new code and stores it with its expiry
    /// 4. Sends the code by email
    ///
    /// A delivery failure leaves the stored code in place, so the caller must
    /// wait for it to expire before asking again.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The code was stored and handed to the mailer
    /// * `Err(DomainError)` - `AlreadyRegistered`, `CodeAlreadyActive`,
    ///   `DeliveryFailed` or a store failure
    pub async fn request_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        let masked = mask_email(email);

        if self.user_repository.exists_by_email(email).await? {
            tracing::warn!(
                email = %masked,
                event = "code_request_registered",
                "Verification code requested for a registered email"
            );
            return Err(AuthError::AlreadyRegistered.into());
        }

        if let Some(latest) = self.code_repository.find_latest_by_email(email).await? {
            if latest.is_active_at(Utc::now()) {
                tracing::warn!(
                    email = %masked,
                    expires_at = %latest.expires_at,
                    event = "code_already_active",
                    "Verification code already sent for email"
                );
                return Err(AuthError::CodeAlreadyActive.into());
            }
        }

        let code = VerificationCode::new(email.to_string(), self.config.code_expiration_minutes);
        let stored = self.code_repository.create(code).await?;

        tracing::info!(
            email = %masked,
            code_id = stored.id,
            event = "code_generated",
            "Generated new verification code"
        );

        let delivered = self
            .email_service
            .send_email(email, &self.config.email_subject, stored.code)
            .await;

        if !delivered {
            tracing::error!(
                email = %masked,
                code_id = stored.id,
                event = "code_delivery_failed",
                "Failed to send verification email"
            );
            return Err(AuthError::DeliveryFailed.into());
        }

        Ok(SendCodeResult {
            email: stored.email,
            expires_at: stored.expires_at,
        })
    }

    /// Check a submitted code against the latest code issued for an email
    ///
    /// Checks run in a fixed order: already registered, no code, mismatch,
    /// expired. A matching code is not consumed and no user is created.
    pub async fn verify_code(&self, email: &str, code: u32) -> DomainResult<()> {
        let masked = mask_email(email);

        if self.user_repository.exists_by_email(email).await? {
            tracing::warn!(
                email = %masked,
                event = "code_verify_registered",
                "Verification attempted for a registered email"
            );
            return Err(AuthError::AlreadyRegistered.into());
        }

        let stored = match self.code_repository.find_latest_by_email(email).await? {
            Some(stored) => stored,
            None => {
                tracing::warn!(
                    email = %masked,
                    event = "code_not_found",
                    "Verification code does not exist for email"
                );
                return Err(AuthError::NoCodeFound.into());
            }
        };

        if !codes_match(stored.code, code) {
            tracing::warn!(email = %masked, event = "code_mismatch", "Verification code mismatch");
            return Err(AuthError::CodeMismatch.into());
        }

        if stored.is_expired_at(Utc::now()) {
            tracing::warn!(email = %masked, event = "code_expired", "Verification code expired");
            return Err(AuthError::CodeExpired.into());
        }

        tracing::info!(email = %masked, event = "code_verified", "Verification code accepted");
        Ok(())
    }
}

fn codes_match(stored: u32, submitted: u32) -> bool {
    constant_time_eq(&stored.to_be_bytes(), &submitted.to_be_bytes())
}
