//! Refresh token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// # Security Considerations
/// - Only the SHA-256 digest of a token string is ever stored or queried
/// - Digests are unique; a store may reject a duplicate
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Save a new refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token carrying its new id
    /// * `Err(DomainError)` - Save failed
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by the digest of its string
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found, expired or not
    /// * `Ok(None)` - No token with this digest
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_token_hash(&self, token_hash: &str)
        -> Result<Option<RefreshToken>, DomainError>;
}
