//! Request guards shared by the protected routes

pub mod auth;

pub use auth::{AccessTokenVerifier, AuthContext};
