//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use token::{AccessToken, Claims, RefreshToken, TokenPair, REFRESH_TOKEN_BYTES};
pub use user::{CandidateUser, Role, User};
pub use verification_code::{
    VerificationCode, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES,
};
