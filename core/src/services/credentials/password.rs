//! bcrypt password hashing

use tokio::sync::OnceCell;

use pr_shared::config::PasswordConfig;

use crate::errors::{DomainError, DomainResult};

/// Hashes and verifies passwords with bcrypt
///
/// All bcrypt calls run on the blocking thread pool.
pub struct PasswordHasher {
    cost: u32,
    /// Hash checked against when no user matches, so both failure paths cost
    /// one bcrypt verification
    dummy_hash: OnceCell<String>,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt work factor
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh salt
    pub async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A malformed stored hash counts as a mismatch.
    pub async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();

        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(error = %e, event = "password_hash_invalid", "Stored password hash is malformed");
                Ok(false)
            }
        }
    }

    /// Spend one verification against a throwaway hash
    pub async fn verify_dummy(&self, password: &str) -> DomainResult<()> {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hash("not-a-real-password"))
            .await?;
        self.verify(password, dummy).await?;
        Ok(())
    }
}

impl From<&PasswordConfig> for PasswordHasher {
    fn from(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }
}
