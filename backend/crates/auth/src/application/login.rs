//! Login Use Case
//!
//! Verifies credentials, issues an access/refresh pair and persists the
//! refresh record in the active state.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, CredentialHasher};

use crate::application::token::{IssuedToken, TokenService};
use crate::application::view::UserView;
use crate::domain::entity::refresh_token::RefreshTokenRecord;
use crate::domain::repository::{RefreshTokenRepository, RoleRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: UserView,
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Login use case
pub struct LoginUseCase<U, R, T>
where
    U: UserRepository,
    R: RoleRepository,
    T: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    token_repo: Arc<T>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<TokenService>,
}

impl<U, R, T> LoginUseCase<U, R, T>
where
    U: UserRepository,
    R: RoleRepository,
    T: RefreshTokenRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        role_repo: Arc<R>,
        token_repo: Arc<T>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            token_repo,
            hasher,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Unknown email and wrong password are the same error
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .user_repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        if !self.hasher.verify(&password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        if self.hasher.needs_rehash(&user.password_hash) {
            self.upgrade_hash(&user.user_id, &password).await;
        }

        let role = self
            .role_repo
            .find_role(&user.role_id)
            .await?
            .ok_or_else(|| AuthError::Internal(format!("Role {} is missing", user.role_id)))?;

        let access = self.tokens.issue_access_token(user.user_id, user.role_id)?;
        let refresh = self.tokens.issue_refresh_token(user.user_id)?;

        let record = RefreshTokenRecord::new(
            refresh.jti.into(),
            user.user_id,
            TokenService::hash_token(&refresh.token),
            refresh.issued_at,
            refresh.expires_at,
        );
        self.token_repo.save_refresh_token(&record).await?;

        tracing::info!(user_id = %user.user_id, jti = %record.token_id, "User logged in");

        Ok(LoginOutput {
            user: UserView::new(&user, &role),
            access,
            refresh,
        })
    }

    /// Store a hash made with the current parameters; failures only log
    async fn upgrade_hash(&self, user_id: &UserId, password: &ClearTextPassword) {
        let upgraded = match self.hasher.hash(password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Password rehash failed");
                return;
            }
        };
        match self.user_repo.update_password_hash(user_id, &upgraded).await {
            Ok(()) => tracing::info!(user_id = %user_id, "Password hash upgraded"),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Storing upgraded password hash failed")
            }
        }
    }
}
