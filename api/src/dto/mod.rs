//! Request and response bodies for the HTTP boundary

pub mod users;

pub use users::{
    CodeRequest, EmailResponse, EmailVerificationRequest, LoginRequest, LoginResponse,
    MessageResponse, RefreshTokenRequest, RefreshTokenResponse, UserEmailVerificationRequest,
    UserRequest,
};
