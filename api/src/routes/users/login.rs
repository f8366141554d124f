use actix_web::{web, HttpResponse};

use pr_core::repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
use pr_core::services::verification::EmailServiceTrait;

use crate::dto::{LoginRequest, LoginResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/users/login
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "accessToken": "eyJ...", "refreshToken": "q5v...=", "expiresIn": 3600 }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: one body for unknown email and wrong password
pub async fn login<U, V, R, E>(
    state: web::Data<AppState<U, V, R, E>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    R: RefreshTokenRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let (_, tokens) = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.access_expires_in,
    }))
}
