//! In-memory implementation of the RefreshTokenRepository trait.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use pr_core::domain::entities::token::RefreshToken;
use pr_core::errors::DomainError;
use pr_core::repositories::RefreshTokenRepository;

#[derive(Default)]
struct TokenTable {
    /// Keyed by token digest
    rows: HashMap<String, RefreshToken>,
    last_id: i64,
}

/// Process-local refresh token store
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    table: RwLock<TokenTable>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens, expired ones included
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn save(&self, mut token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut table = self.table.write().await;

        if table.rows.contains_key(&token.token_hash) {
            tracing::error!(
                user_id = token.user_id,
                event = "refresh_token_duplicate",
                "Refresh token digest already stored"
            );
            return Err(DomainError::store("duplicate refresh token digest"));
        }

        table.last_id += 1;
        token.id = table.last_id;
        table.rows.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self.table.read().await.rows.get(token_hash).cloned())
    }
}
