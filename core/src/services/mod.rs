//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credentials;
pub mod registration;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use credentials::{Authenticator, PasswordHasher};
pub use registration::RegistrationService;
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{
    EmailServiceTrait, SendCodeResult, VerificationService, VerificationServiceConfig,
};
