//! Registration service implementation

use std::sync::Arc;

use pr_shared::utils::email::mask_email;

use crate::domain::entities::user::{CandidateUser, Role, User};
use crate::errors::DomainResult;
use crate::repositories::{UserRepository, VerificationCodeRepository};
use crate::services::credentials::PasswordHasher;
use crate::services::verification::{EmailServiceTrait, VerificationService};

/// Creates users whose email has been proven with a verification code
pub struct RegistrationService<U, V, E>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    E: EmailServiceTrait,
{
    user_repository: Arc<U>,
    verification_service: Arc<VerificationService<U, V, E>>,
    hasher: Arc<PasswordHasher>,
}

impl<U, V, E> RegistrationService<U, V, E>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    E: EmailServiceTrait,
{
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<U, V, E>>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            hasher,
        }
    }

    /// Register a candidate user after checking its verification code
    ///
    /// The stored role is always [`Role::User`] whatever the candidate asked
    /// for. A duplicate email caught by the store at insert time surfaces as
    /// `AlreadyRegistered`. On any failure no user is stored.
    ///
    /// # Arguments
    ///
    /// * `candidate` - Email, plaintext password and the ignored role request
    /// * `code` - The code the candidate received by email
    pub async fn register(&self, candidate: &CandidateUser, code: u32) -> DomainResult<User> {
        self.verification_service
            .verify_code(&candidate.email, code)
            .await?;

        if let Some(requested) = candidate.requested_role.as_deref() {
            if !requested.eq_ignore_ascii_case(Role::User.as_str()) {
                tracing::warn!(
                    email = %mask_email(&candidate.email),
                    requested_role = requested,
                    event = "role_request_ignored",
                    "Registration requested a privileged role"
                );
            }
        }

        let password_hash = self.hasher.hash(&candidate.password).await?;
        let user = User::new(candidate.email.clone(), password_hash, Role::User);
        let created = self.user_repository.create(user).await?;

        tracing::info!(
            user_id = created.id,
            email = %mask_email(&created.email),
            event = "user_registered",
            "Registered new user"
        );

        Ok(created)
    }
}
