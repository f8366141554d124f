//! Bearer token authentication for protected endpoints.
//!
//! `AuthContext` is an extractor: a handler that takes one only runs when the
//! request carries `Authorization: Bearer <access token>` and the token passes
//! verification. Role checks happen in the handler via `require_role`.

use actix_web::{
    dev::Payload, http::header::AUTHORIZATION, http::StatusCode, web, FromRequest, HttpRequest,
};
use std::future::{ready, Ready};
use std::sync::Arc;

use pr_core::domain::entities::token::Claims;
use pr_core::domain::entities::user::Role;
use pr_core::errors::{DomainError, DomainResult, TokenError};
use pr_core::repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
use pr_core::services::auth::AuthService;
use pr_core::services::verification::EmailServiceTrait;
use pr_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::ApiError;

/// Object-safe view of the access token check, registered as app data
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> DomainResult<Claims>;
}

impl<U, V, R, E> AccessTokenVerifier for AuthService<U, V, R, E>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    R: RefreshTokenRepository,
    E: EmailServiceTrait,
{
    fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        AuthService::verify_access_token(self, token)
    }
}

/// Authenticated caller, built from verified access token claims
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    /// JWT ID for tracking
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> DomainResult<Self> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;
        let role = claims
            .role()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;

        Ok(Self {
            user_id,
            email: claims.email,
            role,
            jti: claims.jti,
        })
    }

    /// Rejects the request with 403 unless the caller holds `role`
    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.role == role {
            return Ok(());
        }

        tracing::warn!(
            user_id = self.user_id,
            role = %self.role,
            required = %role,
            event = "access_denied",
            "Caller lacks the required role"
        );
        Err(ApiError::new(
            StatusCode::FORBIDDEN,
            ErrorResponse::new(error_codes::FORBIDDEN, "Insufficient permissions"),
        ))
    }
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(req).ok_or_else(|| {
        ApiError::new(
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::UNAUTHORIZED, "Authentication required"),
        )
    })?;

    let verifier = req
        .app_data::<web::Data<Arc<dyn AccessTokenVerifier>>>()
        .ok_or_else(|| ApiError::from(DomainError::internal("Token verifier is not registered")))?;

    let claims = verifier.verify_access_token(&token)?;
    Ok(AuthContext::from_claims(claims)?)
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;

    fn claims(sub: &str, role: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "a@b.com".to_string(),
            role: role.to_string(),
            iss: "iss".to_string(),
            aud: "aud".to_string(),
            iat: 0,
            nbf: 0,
            exp: 0,
            jti: "jti".to_string(),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = actix_test::TestRequest::default().to_http_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_context_from_claims() {
        let context = AuthContext::from_claims(claims("7", "Admin")).unwrap();
        assert_eq!(context.user_id, 7);
        assert_eq!(context.role, Role::Admin);

        assert!(AuthContext::from_claims(claims("seven", "Admin")).is_err());
        assert!(AuthContext::from_claims(claims("7", "Root")).is_err());
    }

    #[test]
    fn test_require_role() {
        let user = AuthContext::from_claims(claims("7", "User")).unwrap();

        assert!(user.require_role(Role::User).is_ok());
        let err = user.require_role(Role::Admin).unwrap_err();
        assert_eq!(actix_web::ResponseError::status_code(&err), StatusCode::FORBIDDEN);
        assert_eq!(err.body().error, error_codes::FORBIDDEN);
    }
}
