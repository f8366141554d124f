//! Main token service implementation

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::entities::token::{
    AccessToken, Claims, RefreshToken, TokenPair, REFRESH_TOKEN_BYTES,
};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{RefreshTokenRepository, UserRepository};

use super::config::TokenServiceConfig;

/// Service for managing JWT access tokens and refresh tokens
pub struct TokenService<R, U>
where
    R: RefreshTokenRepository,
    U: UserRepository,
{
    refresh_repository: Arc<R>,
    user_repository: Arc<U>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R, U> TokenService<R, U>
where
    R: RefreshTokenRepository,
    U: UserRepository,
{
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `refresh_repository` - Refresh token store
    /// * `user_repository` - User store, consulted when refreshing
    /// * `config` - Token service configuration
    pub fn new(
        refresh_repository: Arc<R>,
        user_repository: Arc<U>,
        config: TokenServiceConfig,
    ) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            refresh_repository,
            user_repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue an access token and a stored refresh token for a user
    ///
    /// # Arguments
    ///
    /// * `user` - A persisted user
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The signed access token and the refresh token string
    /// * `Err(DomainError)` - Signing failed or the refresh token could not be stored
    pub async fn issue_tokens(&self, user: &User) -> DomainResult<TokenPair> {
        let access_token = self.generate_access_token(user)?;
        let refresh_token = self.generate_refresh_token(user.id).await?;

        tracing::info!(user_id = user.id, event = "tokens_issued", "Issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_token_expiry_seconds,
            refresh_expires_in: self.config.refresh_token_expiry_seconds,
        })
    }

    /// Issue a new access token from a refresh token
    ///
    /// Checks run in a fixed order: unknown token, expired token, owner
    /// mismatch, owner no longer stored. The refresh token itself is neither
    /// rotated nor extended.
    pub async fn refresh_access_token(
        &self,
        user_id: i64,
        refresh_token: &str,
    ) -> DomainResult<AccessToken> {
        let token_hash = hash_token(refresh_token);

        let stored = match self.refresh_repository.find_by_token_hash(&token_hash).await? {
            Some(stored) => stored,
            None => {
                tracing::warn!(user_id, event = "refresh_token_not_found", "Unknown refresh token");
                return Err(TokenError::TokenNotFound.into());
            }
        };

        if stored.is_expired_at(Utc::now()) {
            tracing::warn!(
                user_id,
                token_id = stored.id,
                event = "refresh_token_expired",
                "Refresh token expired"
            );
            return Err(TokenError::TokenExpired.into());
        }

        if !stored.is_owned_by(user_id) {
            tracing::warn!(
                user_id,
                owner_id = stored.user_id,
                token_id = stored.id,
                event = "refresh_token_owner_mismatch",
                "Refresh token presented for another user"
            );
            return Err(TokenError::OwnerMismatch.into());
        }

        let user = match self.user_repository.find_by_id(stored.user_id).await? {
            Some(user) => user,
            None => {
                tracing::warn!(user_id, event = "refresh_user_missing", "Refresh token owner no longer exists");
                return Err(TokenError::UserNotFound.into());
            }
        };

        let token = self.generate_access_token(&user)?;
        tracing::info!(user_id, event = "access_token_refreshed", "Issued refreshed access token");

        Ok(AccessToken {
            token,
            expires_in: self.config.access_token_expiry_seconds,
        })
    }

    /// Verifies an access token and returns the claims
    ///
    /// Signature, issuer, audience, expiry and not-before are all checked.
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                _ => DomainError::Token(TokenError::InvalidToken),
            })
    }

    /// Whether a refresh token exists and has not expired
    pub async fn is_refresh_token_valid(&self, refresh_token: &str) -> DomainResult<bool> {
        let token_hash = hash_token(refresh_token);
        Ok(self
            .refresh_repository
            .find_by_token_hash(&token_hash)
            .await?
            .map(|stored| !stored.is_expired_at(Utc::now()))
            .unwrap_or(false))
    }

    fn generate_access_token(&self, user: &User) -> DomainResult<String> {
        let claims = Claims::new_access_token(
            user,
            &self.config.issuer,
            &self.config.audience,
            self.config.access_token_expiry_seconds,
        );
        self.encode_jwt(&claims)
    }

    /// Generates a refresh token string and stores its digest
    async fn generate_refresh_token(&self, user_id: i64) -> DomainResult<String> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token_string = STANDARD.encode(bytes);

        let record = RefreshToken::new(
            user_id,
            hash_token(&token_string),
            self.config.refresh_token_expiry_seconds,
        );
        self.refresh_repository.save(record).await?;

        Ok(token_string)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "jwt_encode_failed", "Failed to sign access token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }
}

/// Hashes a refresh token string for storage and lookup
pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
