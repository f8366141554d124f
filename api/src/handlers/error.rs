//! Mapping from domain errors to HTTP responses
//!
//! The body comes from the `ErrorResponse` conversion in `pr_core`, which
//! already collapses the kinds a caller must not be able to tell apart. This
//! module only picks the status code.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use validator::Validate;

use pr_core::errors::{AuthError, DomainError, TokenError};
use pr_shared::errors::{error_codes, ErrorResponse};

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::AlreadyRegistered
            | AuthError::CodeAlreadyActive
            | AuthError::CodeMismatch
            | AuthError::CodeExpired
            | AuthError::InvalidFormat => StatusCode::BAD_REQUEST,
            AuthError::NoCodeFound => StatusCode::NOT_FOUND,
            AuthError::NotFound | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::DeliveryFailed => StatusCode::INTERNAL_SERVER_ERROR,
        },
        DomainError::Token(TokenError::TokenGenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::StoreUnavailable { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    /// Malformed or undecodable request body
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::BAD_REQUEST, message),
        )
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let status = status_for(&error);
        if status.is_server_error() {
            tracing::error!(error = %error, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
        }
        Self::new(status, ErrorResponse::from(&error))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

/// Run the derive-based checks on a request body
pub fn validate_request<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|errors| {
        let fields: Vec<String> = errors
            .errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        tracing::debug!(?fields, "Request body failed validation");

        ApiError::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
                .add_detail("fields", fields),
        )
    })
}

/// Turns JSON extractor failures into the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    ApiError::bad_request("Invalid request data").into()
}
