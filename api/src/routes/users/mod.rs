//! User registration, login and token refresh endpoints
//!
//! - `POST /api/users/register` sends a verification code
//! - `POST /api/users/emailVerification` checks the code and creates the user
//! - `POST /api/users/login` exchanges credentials for a token pair
//! - `POST /api/users/refresh-token` exchanges a refresh token for an access token

pub mod email_verification;
pub mod login;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use pr_core::repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
use pr_core::services::auth::AuthService;
use pr_core::services::verification::EmailServiceTrait;

pub use email_verification::email_verification;
pub use login::login;
pub use refresh::refresh_token;
pub use register::register;

/// Application state that holds shared services
pub struct AppState<U, V, R, E>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    R: RefreshTokenRepository,
    E: EmailServiceTrait,
{
    pub auth_service: Arc<AuthService<U, V, R, E>>,
}

impl<U, V, R, E> AppState<U, V, R, E>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    R: RefreshTokenRepository,
    E: EmailServiceTrait,
{
    pub fn new(auth_service: Arc<AuthService<U, V, R, E>>) -> Self {
        Self { auth_service }
    }
}
