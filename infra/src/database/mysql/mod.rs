//! MySQL implementations of the store traits
//!
//! Every SQLx failure is reported as `DomainError::StoreUnavailable` and
//! never retried here. The one exception is a unique-key violation on
//! `users.email`, which the user repository reports as `AlreadyRegistered`.

mod refresh_token_repository;
mod user_repository;
mod verification_code_repository;

pub use refresh_token_repository::MySqlRefreshTokenRepository;
pub use user_repository::MySqlUserRepository;
pub use verification_code_repository::MySqlVerificationCodeRepository;

use pr_core::errors::DomainError;

/// Log a database failure and convert it into a store error
pub(crate) fn store_error(operation: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(operation, error = %e, event = "store_query_failed", "Database operation failed");
    DomainError::store(format!("{}: {}", operation, e))
}

/// Whether the error is a duplicate-key rejection
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

/// Column decoding failures mean the schema and the code disagree
pub(crate) fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}
