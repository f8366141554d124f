//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 access token generation and verification
//! - Opaque refresh token issuance and storage by digest
//! - Access token renewal from a refresh token

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
