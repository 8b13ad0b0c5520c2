//! Refresh Use Case
//!
//! Single-use rotation: the presented refresh token is revoked and a new
//! access/refresh pair is issued in the same store operation.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::constant_time_eq;

use crate::application::token::{IssuedToken, TokenService};
use crate::domain::entity::refresh_token::RefreshTokenRecord;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Rotated credentials
#[derive(Debug)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Refresh use case
pub struct RefreshUseCase<U, T>
where
    U: UserRepository,
    T: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    tokens: Arc<TokenService>,
}

impl<U, T> RefreshUseCase<U, T>
where
    U: UserRepository,
    T: RefreshTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            token_repo,
            tokens,
        }
    }

    pub async fn execute(&self, presented: &str) -> AuthResult<TokenPair> {
        let claims = self.tokens.verify_refresh_token(presented)?;

        let record = self
            .token_repo
            .find_refresh_token(&claims.token_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let presented_hash = TokenService::hash_token(presented);
        if record.user_id != claims.user_id
            || !constant_time_eq(presented_hash.as_bytes(), record.token_hash.as_bytes())
        {
            return Err(AuthError::InvalidToken);
        }

        if !record.is_active(Utc::now()) {
            tracing::warn!(
                user_id = %record.user_id,
                jti = %record.token_id,
                revoked = record.revoked,
                "Refresh token replayed or expired"
            );
            return Err(AuthError::TokenRevokedOrExpired);
        }

        // Role comes from the store, not the old token
        let user = self
            .user_repo
            .find_user(&claims.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let access = self.tokens.issue_access_token(user.user_id, user.role_id)?;
        let refresh = self.tokens.issue_refresh_token(user.user_id)?;
        let new_record = RefreshTokenRecord::new(
            refresh.jti.into(),
            user.user_id,
            TokenService::hash_token(&refresh.token),
            refresh.issued_at,
            refresh.expires_at,
        );

        if !self
            .token_repo
            .rotate_refresh_token(&record.token_id, &new_record)
            .await?
        {
            tracing::warn!(
                user_id = %user.user_id,
                jti = %record.token_id,
                "Refresh token lost a concurrent rotation"
            );
            return Err(AuthError::TokenRevokedOrExpired);
        }

        tracing::info!(
            user_id = %user.user_id,
            old_jti = %record.token_id,
            jti = %new_record.token_id,
            "Refresh token rotated"
        );

        Ok(TokenPair { access, refresh })
    }
}
