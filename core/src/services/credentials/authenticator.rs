//! Email and password authentication

use std::sync::Arc;

use pr_shared::utils::email::{is_valid_email, mask_email};

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserRepository;

use super::password::PasswordHasher;

/// Resolves a user from submitted credentials
pub struct Authenticator<U: UserRepository> {
    user_repository: Arc<U>,
    hasher: Arc<PasswordHasher>,
}

impl<U: UserRepository> Authenticator<U> {
    pub fn new(user_repository: Arc<U>, hasher: Arc<PasswordHasher>) -> Self {
        Self {
            user_repository,
            hasher,
        }
    }

    /// Authenticate an email and password pair
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user whose hash matches the password
    /// * `Err(AuthError::InvalidFormat)` - The email is not `local@domain.tld`
    /// * `Err(AuthError::NotFound)` - No user has this email
    /// * `Err(AuthError::InvalidCredentials)` - The password does not match
    ///
    /// `NotFound` and `InvalidCredentials` must reach callers as the same
    /// response; the distinction is kept only for logs and tests.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        if !is_valid_email(email) {
            return Err(AuthError::InvalidFormat.into());
        }

        let masked = mask_email(email);

        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                self.hasher.verify_dummy(password).await?;
                tracing::warn!(email = %masked, event = "login_unknown_email", "Login attempt for unknown email");
                return Err(AuthError::NotFound.into());
            }
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::warn!(
                email = %masked,
                user_id = user.id,
                event = "login_bad_password",
                "Login attempt with wrong password"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(user_id = user.id, event = "login_authenticated", "User authenticated");
        Ok(user)
    }
}
