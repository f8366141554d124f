use actix_web::{web, HttpResponse};

use pr_core::repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
use pr_core::services::verification::EmailServiceTrait;

use crate::dto::{CodeRequest, MessageResponse};
use crate::handlers::{validate_request, ApiError};

use super::AppState;

/// Handler for POST /api/users/register
///
/// Sends a verification code to an email address that is not yet registered.
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Verification code sent." }
/// ```
///
/// ## Errors
/// - 400 Bad Request: malformed email, already registered, or a code is still active
/// - 500 Internal Server Error: the email could not be delivered or the store is down
pub async fn register<U, V, R, E>(
    state: web::Data<AppState<U, V, R, E>>,
    request: web::Json<CodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    R: RefreshTokenRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    validate_request(&request.0)?;

    state.auth_service.request_code(&request.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Verification code sent.".to_string(),
    }))
}
