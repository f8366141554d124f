use actix_web::{web, HttpResponse};

use pr_core::repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
use pr_core::services::verification::EmailServiceTrait;

use crate::dto::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/users/refresh-token
///
/// Issues a new access token. The refresh token itself is returned to the
/// caller unchanged and stays valid until it expires.
///
/// # Request Body
///
/// ```json
/// { "userId": 1, "refreshToken": "q5v...=" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "accessToken": "eyJ...", "expiresIn": 3600 }
/// ```
///
/// ## Errors
/// - 400 Bad Request: non-positive user id or empty token
/// - 401 Unauthorized: unknown, expired or foreign refresh token
pub async fn refresh_token<U, V, R, E>(
    state: web::Data<AppState<U, V, R, E>>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    R: RefreshTokenRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let access = state
        .auth_service
        .refresh(request.user_id, &request.refresh_token)
        .await?;

    Ok(HttpResponse::Ok().json(RefreshTokenResponse {
        access_token: access.token,
        expires_in: access.expires_in,
    }))
}
