//! Credential checking for email and password login
//!
//! - `PasswordHasher` wraps bcrypt and keeps its CPU-bound work off the
//!   async executor
//! - `Authenticator` resolves a user from an email and password pair

mod authenticator;
mod password;


pub use authenticator::Authenticator;
pub use password::PasswordHasher;
