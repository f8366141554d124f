//! # ProductReview Core
//!
//! Core business logic and domain layer for the ProductReview identity server.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AccessToken, CandidateUser, Claims, RefreshToken, Role, TokenPair, User, VerificationCode,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
pub use services::{
    AuthService, AuthServiceConfig, EmailServiceTrait, SendCodeResult, TokenService,
    TokenServiceConfig,
};
