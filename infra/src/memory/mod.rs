//! In-memory store implementations
//!
//! Each store keeps its rows behind a `tokio::sync::RwLock` and assigns ids
//! from a counter held under the same lock, so ids are strictly increasing
//! and a uniqueness check and the insert that follows it are atomic.
//!
//! Nothing here survives a restart. These stores back the development
//! server when no `DATABASE_URL` is configured and the HTTP tests.

pub mod refresh_token_repository;
pub mod user_repository;
pub mod verification_code_repository;

pub use refresh_token_repository::InMemoryRefreshTokenRepository;
pub use user_repository::InMemoryUserRepository;
pub use verification_code_repository::InMemoryVerificationCodeRepository;
