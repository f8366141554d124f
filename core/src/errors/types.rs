//! Domain-specific error types for registration, login and token operations
//!
//! Error messages are deliberately generic where the difference between two
//! failures would reveal whether an account or token exists. The conversion
//! into [`ErrorResponse`] collapses those kinds into one response.

use pr_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

use super::DomainError;

/// Registration, verification and credential errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already registered")]
    AlreadyRegistered,

    #[error("A verification code is still active for this email")]
    CodeAlreadyActive,

    #[error("Failed to deliver verification email")]
    DeliveryFailed,

    #[error("No verification code found for this email")]
    NoCodeFound,

    #[error("Verification code does not match")]
    CodeMismatch,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Invalid email format")]
    InvalidFormat,

    #[error("User not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Access and refresh token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Refresh token not found")]
    TokenNotFound,

    #[error("Refresh token expired")]
    TokenExpired,

    #[error("Refresh token does not belong to this user")]
    OwnerMismatch,

    #[error("Token owner no longer exists")]
    UserNotFound,

    #[error("Invalid access token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Convert AuthError to ErrorResponse
impl From<&AuthError> for ErrorResponse {
    fn from(err: &AuthError) -> Self {
        let error_code = match err {
            AuthError::AlreadyRegistered => error_codes::ALREADY_REGISTERED,
            AuthError::CodeAlreadyActive => error_codes::CODE_ALREADY_ACTIVE,
            AuthError::DeliveryFailed => error_codes::DELIVERY_FAILED,
            AuthError::NoCodeFound => error_codes::NO_CODE_FOUND,
            AuthError::CodeMismatch => error_codes::CODE_MISMATCH,
            AuthError::CodeExpired => error_codes::CODE_EXPIRED,
            AuthError::InvalidFormat => error_codes::INVALID_EMAIL,
            AuthError::NotFound | AuthError::InvalidCredentials => {
                return ErrorResponse::new(
                    error_codes::INVALID_CREDENTIALS,
                    INVALID_CREDENTIALS_MESSAGE,
                );
            }
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        match err {
            TokenError::TokenGenerationFailed => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, err.to_string())
            }
            // every refresh and access failure looks the same to the caller
            _ => ErrorResponse::new(error_codes::INVALID_TOKEN, INVALID_TOKEN_MESSAGE),
        }
    }
}

/// Convert DomainError to ErrorResponse
impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Auth(e) => e.into(),
            DomainError::Token(e) => e.into(),
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            // store and internal details stay in the logs
            DomainError::StoreUnavailable { .. } => ErrorResponse::new(
                error_codes::STORE_UNAVAILABLE,
                "Service temporarily unavailable",
            ),
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
            }
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        (&err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_and_bad_password_look_identical() {
        let not_found: ErrorResponse = (&DomainError::Auth(AuthError::NotFound)).into();
        let bad_password: ErrorResponse =
            (&DomainError::Auth(AuthError::InvalidCredentials)).into();

        assert_eq!(not_found.error, bad_password.error);
        assert_eq!(not_found.message, bad_password.message);
        assert_eq!(not_found.error, "INVALID_CREDENTIALS");
    }

    #[test]
    fn test_refresh_failures_look_identical() {
        let kinds = [
            TokenError::TokenNotFound,
            TokenError::TokenExpired,
            TokenError::OwnerMismatch,
            TokenError::UserNotFound,
            TokenError::InvalidToken,
        ];

        let responses: Vec<ErrorResponse> = kinds.iter().map(ErrorResponse::from).collect();
        for response in &responses {
            assert_eq!(response.error, "INVALID_TOKEN");
            assert_eq!(response.message, responses[0].message);
        }
    }

    #[test]
    fn test_verification_errors_keep_their_codes() {
        let response: ErrorResponse = (&AuthError::CodeAlreadyActive).into();
        assert_eq!(response.error, "CODE_ALREADY_ACTIVE");

        let response: ErrorResponse = (&AuthError::CodeExpired).into();
        assert_eq!(response.error, "CODE_EXPIRED");
        assert_eq!(response.message, "Verification code expired");
    }

    #[test]
    fn test_store_details_are_hidden() {
        let err = DomainError::store("connection refused on 10.0.0.3:3306");
        let response: ErrorResponse = err.into();
        assert_eq!(response.error, "STORE_UNAVAILABLE");
        assert!(!response.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_domain_error_from_conversions() {
        let err: DomainError = AuthError::CodeMismatch.into();
        assert!(matches!(err, DomainError::Auth(AuthError::CodeMismatch)));

        let err: DomainError = TokenError::OwnerMismatch.into();
        assert_eq!(err.to_string(), "Refresh token does not belong to this user");
    }
}
