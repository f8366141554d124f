use actix_web::{web, HttpResponse};

use pr_core::domain::entities::user::CandidateUser;
use pr_core::repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
use pr_core::services::verification::EmailServiceTrait;

use crate::dto::{EmailResponse, UserEmailVerificationRequest};
use crate::handlers::{validate_request, ApiError};

use super::AppState;

/// Handler for POST /api/users/emailVerification
///
/// Checks the emailed code and, when it matches and is still valid, creates
/// the user. Any `role` in the body is ignored.
///
/// # Request Body
///
/// ```json
/// {
///     "user": { "email": "alice@example.com", "password": "secret" },
///     "emailVerification": { "email": "alice@example.com", "code": 123456 }
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "email": "alice@example.com" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: emails differ, already registered, code mismatch or expired
/// - 404 Not Found: no code was ever sent to this email
pub async fn email_verification<U, V, R, E>(
    state: web::Data<AppState<U, V, R, E>>,
    request: web::Json<UserEmailVerificationRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    R: RefreshTokenRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    validate_request(&request.0)?;
    let UserEmailVerificationRequest {
        user,
        email_verification,
    } = request.into_inner();

    let mut candidate = CandidateUser::new(user.email, user.password);
    if let Some(role) = user.role {
        candidate = candidate.with_requested_role(role);
    }

    let created = state
        .auth_service
        .verify_and_register(&candidate, &email_verification.email, email_verification.code)
        .await?;

    Ok(HttpResponse::Ok().json(EmailResponse {
        email: created.email,
    }))
}
