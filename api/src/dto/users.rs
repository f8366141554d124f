use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/users/register`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CodeRequest {
    /// Address the verification code is sent to
    #[validate(length(min = 1, max = 255))]
    pub email: String,
}

/// The account to create once the code checks out
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserRequest {
    #[validate(length(min = 1, max = 255))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    /// Accepted for compatibility; registration always creates a `User`
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailVerificationRequest {
    #[validate(length(min = 1, max = 255))]
    pub email: String,

    /// The six-digit code from the email
    pub code: u32,
}

/// Body of `POST /api/users/emailVerification`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserEmailVerificationRequest {
    #[validate]
    pub user: UserRequest,

    #[validate]
    pub email_verification: EmailVerificationRequest,
}

/// Body of `POST /api/users/login`
///
/// Not run through the validator: an empty password must fail the same way
/// a wrong one does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/users/refresh-token`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub user_id: i64,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailResponse {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}
