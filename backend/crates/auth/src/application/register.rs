//! Register Use Case
//!
//! Creates a user with the default role.

use std::sync::Arc;

use kernel::FieldErrors;
use platform::password::{ClearTextPassword, CredentialHasher};

use crate::application::config::AuthConfig;
use crate::application::view::UserView;
use crate::domain::entity::user::User;
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    hasher: Arc<dyn CredentialHasher>,
    config: Arc<AuthConfig>,
}

impl<U, R> RegisterUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        role_repo: Arc<R>,
        hasher: Arc<dyn CredentialHasher>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            hasher,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<UserView> {
        let mut errors = FieldErrors::new();
        let name = UserName::new(&input.name)
            .map_err(|e| errors.add("name", e.to_string()))
            .ok();
        let email = Email::new(&input.email)
            .map_err(|e| errors.add("email", e.message().to_string()))
            .ok();
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| errors.add("password", e.to_string()))
            .ok();
        let (Some(name), Some(email), Some(password)) = (name, email, password) else {
            return Err(AuthError::Validation(errors));
        };

        if self.user_repo.email_exists(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let role = self
            .role_repo
            .find_role_by_name(&self.config.default_role)
            .await?
            .ok_or_else(|| {
                AuthError::Internal(format!("Default role '{}' is missing", self.config.default_role))
            })?;

        let password_hash = self.hasher.hash(&password)?;
        let user = User::new(name, email, password_hash, role.role_id);
        self.user_repo.create_user(&user).await?;

        tracing::info!(user_id = %user.user_id, role = %role.name, "User registered");

        Ok(UserView::new(&user, &role))
    }
}
