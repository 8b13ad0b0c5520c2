//! Logout Use Case
//!
//! Best effort: a valid access token revokes every refresh record of its
//! user. Nothing here fails the caller.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::repository::RefreshTokenRepository;

pub struct LogoutUseCase<T>
where
    T: RefreshTokenRepository,
{
    token_repo: Arc<T>,
    tokens: Arc<TokenService>,
}

impl<T> LogoutUseCase<T>
where
    T: RefreshTokenRepository,
{
    pub fn new(token_repo: Arc<T>, tokens: Arc<TokenService>) -> Self {
        Self { token_repo, tokens }
    }

    /// Returns the number of revoked refresh records
    pub async fn execute(&self, access_token: Option<&str>) -> u64 {
        let Some(token) = access_token else {
            return 0;
        };
        let Ok(claims) = self.tokens.verify_access_token(token) else {
            tracing::debug!("Logout with unusable access token");
            return 0;
        };

        match self
            .token_repo
            .revoke_all_refresh_tokens(&claims.user_id)
            .await
        {
            Ok(revoked) => {
                tracing::info!(user_id = %claims.user_id, revoked, "User logged out");
                revoked
            }
            Err(e) => {
                tracing::warn!(user_id = %claims.user_id, error = %e, "Failed to revoke refresh tokens on logout");
                0
            }
        }
    }
}
