//! Mock implementation of VerificationCodeRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::trait_::VerificationCodeRepository;

/// Mock verification code repository for testing
pub struct MockVerificationCodeRepository {
    codes: Arc<RwLock<Vec<VerificationCode>>>,
    fail: AtomicBool,
}

impl MockVerificationCodeRepository {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(Vec::new())),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail.store(unavailable, Ordering::SeqCst);
    }

    /// Every stored code, oldest first
    pub async fn all(&self) -> Vec<VerificationCode> {
        self.codes.read().await.clone()
    }

    /// Move the expiry of every code for `email`, simulating elapsed time
    pub async fn set_expiry(&self, email: &str, expires_at: DateTime<Utc>) {
        let mut codes = self.codes.write().await;
        for code in codes.iter_mut().filter(|c| c.email == email) {
            code.expires_at = expires_at;
        }
    }
}

impl Default for MockVerificationCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::store("mock code store is down"));
        }
        let codes = self.codes.read().await;
        Ok(codes
            .iter()
            .filter(|c| c.email == email)
            .max_by_key(|c| c.id)
            .cloned())
    }

    async fn create(&self, mut code: VerificationCode) -> Result<VerificationCode, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::store("mock code store is down"));
        }
        let mut codes = self.codes.write().await;
        code.id = codes.len() as i64 + 1;
        codes.push(code.clone());
        Ok(code)
    }
}
