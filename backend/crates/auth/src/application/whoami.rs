//! WhoAmI Use Case

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::application::view::UserView;
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

pub struct WhoAmIUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<U, R> WhoAmIUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    pub fn new(user_repo: Arc<U>, role_repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            role_repo,
            tokens,
        }
    }

    /// Missing, invalid or expired token, or a vanished user: all `Unauthorized`
    pub async fn execute(&self, access_token: Option<&str>) -> AuthResult<UserView> {
        let token = access_token.ok_or(AuthError::Unauthorized)?;
        let claims = self
            .tokens
            .verify_access_token(token)
            .map_err(|_| AuthError::Unauthorized)?;

        let user = self
            .user_repo
            .find_user(&claims.user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        let role = self
            .role_repo
            .find_role(&user.role_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        Ok(UserView::new(&user, &role))
    }
}
