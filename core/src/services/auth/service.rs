//! Main authentication service implementation

use std::sync::Arc;

use pr_shared::utils::email::{is_valid_email, mask_email};

use crate::domain::entities::token::{AccessToken, Claims, TokenPair};
use crate::domain::entities::user::{CandidateUser, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
use crate::services::credentials::{Authenticator, PasswordHasher};
use crate::services::registration::RegistrationService;
use crate::services::token::TokenService;
use crate::services::verification::{EmailServiceTrait, SendCodeResult, VerificationService};

use super::config::AuthServiceConfig;

/// Authentication service composing the complete identity flow
pub struct AuthService<U, V, R, E>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    R: RefreshTokenRepository,
    E: EmailServiceTrait,
{
    /// Verification code issuing and checking
    verification_service: Arc<VerificationService<U, V, E>>,
    /// User creation after verification
    registration_service: Arc<RegistrationService<U, V, E>>,
    /// Credential checking
    authenticator: Arc<Authenticator<U>>,
    /// Token issuing and refresh
    token_service: Arc<TokenService<R, U>>,
}

impl<U, V, R, E> AuthService<U, V, R, E>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    R: RefreshTokenRepository,
    E: EmailServiceTrait,
{
    /// Create a new authentication service from already built components
    pub fn new(
        verification_service: Arc<VerificationService<U, V, E>>,
        registration_service: Arc<RegistrationService<U, V, E>>,
        authenticator: Arc<Authenticator<U>>,
        token_service: Arc<TokenService<R, U>>,
    ) -> Self {
        Self {
            verification_service,
            registration_service,
            authenticator,
            token_service,
        }
    }

    /// Build every component from stores, a mailer and configuration
    ///
    /// # Arguments
    ///
    /// * `user_repository` - User store shared by all components
    /// * `code_repository` - Verification code store
    /// * `refresh_repository` - Refresh token store
    /// * `email_service` - Email delivery implementation
    /// * `config` - Service configuration
    pub fn build(
        user_repository: Arc<U>,
        code_repository: Arc<V>,
        refresh_repository: Arc<R>,
        email_service: Arc<E>,
        config: AuthServiceConfig,
    ) -> Self {
        let hasher = Arc::new(PasswordHasher::new(config.bcrypt_cost));
        let verification_service = Arc::new(VerificationService::new(
            user_repository.clone(),
            code_repository,
            email_service,
            config.verification,
        ));
        let registration_service = Arc::new(RegistrationService::new(
            user_repository.clone(),
            verification_service.clone(),
            hasher.clone(),
        ));
        let authenticator = Arc::new(Authenticator::new(user_repository.clone(), hasher));
        let token_service = Arc::new(TokenService::new(
            refresh_repository,
            user_repository,
            config.token,
        ));

        Self::new(
            verification_service,
            registration_service,
            authenticator,
            token_service,
        )
    }

    /// Send a verification code to an email address
    ///
    /// Malformed addresses are rejected before any store is touched.
    pub async fn request_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        if !is_valid_email(email) {
            tracing::warn!(event = "code_request_invalid_email", "Code requested for malformed email");
            return Err(AuthError::InvalidFormat.into());
        }

        self.verification_service.request_code(email).await
    }

    /// Verify a code and register the candidate user
    ///
    /// # Arguments
    ///
    /// * `candidate` - The user to create
    /// * `verification_email` - Email the code was requested for
    /// * `code` - The submitted code
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Validation)` - The two emails differ
    /// * `Err(DomainError)` - Any verification or registration failure
    pub async fn verify_and_register(
        &self,
        candidate: &CandidateUser,
        verification_email: &str,
        code: u32,
    ) -> DomainResult<User> {
        if candidate.email != verification_email {
            tracing::warn!(
                user_email = %mask_email(&candidate.email),
                verification_email = %mask_email(verification_email),
                event = "registration_email_mismatch",
                "Registration and verification emails do not match"
            );
            return Err(DomainError::validation("Invalid request data"));
        }

        self.registration_service.register(candidate, code).await
    }

    /// Authenticate credentials and issue a token pair
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, TokenPair)> {
        if password.trim().is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = self.authenticator.authenticate(email, password).await?;
        let tokens = self.token_service.issue_tokens(&user).await?;

        Ok((user, tokens))
    }

    /// Issue a new access token from a refresh token
    pub async fn refresh(&self, user_id: i64, refresh_token: &str) -> DomainResult<AccessToken> {
        if user_id <= 0 {
            return Err(DomainError::validation("User id must be positive"));
        }
        if refresh_token.trim().is_empty() {
            return Err(DomainError::validation("Refresh token is required"));
        }

        self.token_service
            .refresh_access_token(user_id, refresh_token)
            .await
    }

    /// Verify an access token issued by this service
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        self.token_service.verify_access_token(token)
    }

    /// Whether a refresh token exists and has not expired
    pub async fn is_refresh_token_valid(&self, refresh_token: &str) -> DomainResult<bool> {
        self.token_service.is_refresh_token_valid(refresh_token).await
    }
}
