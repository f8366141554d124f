//! In-memory implementation of the UserRepository trait.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use pr_core::domain::entities::user::User;
use pr_core::errors::{AuthError, DomainError};
use pr_core::repositories::UserRepository;
use pr_shared::utils::email::mask_email;

#[derive(Default)]
struct UserTable {
    rows: HashMap<i64, User>,
    /// Email to id, the uniqueness index
    by_email: HashMap<String, i64>,
    last_id: i64,
}

/// Process-local user store
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.by_email.contains_key(&user.email) {
            tracing::debug!(
                email = %mask_email(&user.email),
                event = "user_insert_duplicate",
                "Email already present in user store"
            );
            return Err(AuthError::AlreadyRegistered.into());
        }

        table.last_id += 1;
        user.id = table.last_id;
        table.by_email.insert(user.email.clone(), user.id);
        table.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.table.read().await.by_email.contains_key(email))
    }
}
