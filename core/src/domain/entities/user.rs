//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorization role carried by a user and its access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    /// Regular account; the only role self-registration can produce
    #[default]
    User,
    /// Administrative account, provisioned out of band
    Admin,
}

impl Role {
    /// Returns the role name as written into token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier; `0` until persisted
    pub id: i64,

    /// Login email, unique across users
    pub email: String,

    /// bcrypt hash of the password, never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Authorization role
    pub role: Role,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, not yet persisted user
    ///
    /// # Arguments
    ///
    /// * `email` - The login email
    /// * `password_hash` - An already computed password hash
    /// * `role` - The role to store
    pub fn new(email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: 0,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }

    /// Whether the store has assigned an id yet
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

/// Registration input as submitted by the client
///
/// The requested role is accepted for wire compatibility but is never
/// honoured; registration always stores [`Role::User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateUser {
    /// Email to register
    pub email: String,

    /// Plaintext password, hashed before anything is stored
    pub password: String,

    /// Role requested by the client, ignored
    #[serde(default)]
    pub requested_role: Option<String>,
}

impl CandidateUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            requested_role: None,
        }
    }

    pub fn with_requested_role(mut self, role: impl Into<String>) -> Self {
        self.requested_role = Some(role.into());
        self
    }
}
