//! MySQL implementation of the VerificationCodeRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use pr_core::domain::entities::verification_code::VerificationCode;
use pr_core::errors::DomainError;
use pr_core::repositories::VerificationCodeRepository;

use super::{column_error, store_error};

/// MySQL implementation of VerificationCodeRepository
///
/// Rows are only ever inserted; `AUTO_INCREMENT` ids give the ordering.
pub struct MySqlVerificationCodeRepository {
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        Ok(VerificationCode {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            code: row.try_get("code").map_err(|e| column_error("code", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = r#"
            SELECT id, email, code, expires_at, created_at
            FROM verification_codes
            WHERE email = ?
            ORDER BY id DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("find latest verification code", e))?;

        result.as_ref().map(Self::row_to_code).transpose()
    }

    async fn create(&self, mut code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let query = r#"
            INSERT INTO verification_codes (email, code, expires_at, created_at)
            VALUES (?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&code.email)
            .bind(code.code)
            .bind(code.expires_at)
            .bind(code.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("create verification code", e))?;

        code.id = result.last_insert_id() as i64;
        Ok(code)
    }
}
