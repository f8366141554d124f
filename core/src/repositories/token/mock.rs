//! Mock implementation of RefreshTokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::trait_::RefreshTokenRepository;

/// Mock refresh token repository keyed by digest
pub struct MockRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    next_id: AtomicI64,
    fail: AtomicBool,
}

impl MockRefreshTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail.store(unavailable, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn all(&self) -> Vec<RefreshToken> {
        self.tokens.read().await.values().cloned().collect()
    }

    /// Move the expiry of every stored token, simulating elapsed time
    pub async fn expire_all(&self, expires_at: DateTime<Utc>) {
        let mut tokens = self.tokens.write().await;
        for token in tokens.values_mut() {
            token.expires_at = expires_at;
        }
    }
}

impl Default for MockRefreshTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn save(&self, mut token: RefreshToken) -> Result<RefreshToken, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::store("mock token store is down"));
        }
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::store("duplicate refresh token"));
        }
        token.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::store("mock token store is down"));
        }
        Ok(self.tokens.read().await.get(token_hash).cloned())
    }
}
