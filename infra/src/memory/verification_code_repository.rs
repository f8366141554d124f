//! In-memory implementation of the VerificationCodeRepository trait.

use async_trait::async_trait;
use tokio::sync::RwLock;

use pr_core::domain::entities::verification_code::VerificationCode;
use pr_core::errors::DomainError;
use pr_core::repositories::VerificationCodeRepository;

#[derive(Default)]
struct CodeTable {
    /// Append-only, ordered by id
    rows: Vec<VerificationCode>,
    last_id: i64,
}

/// Process-local verification code store
#[derive(Default)]
pub struct InMemoryVerificationCodeRepository {
    table: RwLock<CodeTable>,
}

impl InMemoryVerificationCodeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every code ever issued for an email, oldest first
    pub async fn history(&self, email: &str) -> Vec<VerificationCode> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .filter(|c| c.email == email)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl VerificationCodeRepository for InMemoryVerificationCodeRepository {
    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().rev().find(|c| c.email == email).cloned())
    }

    async fn create(&self, mut code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        code.id = table.last_id;
        table.rows.push(code.clone());
        Ok(code)
    }
}
