//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Method names are distinct across traits so one store type can implement
//! all of them without ambiguous calls.

use kernel::id::{RefreshTokenId, RoleId, UserId};
use platform::password::HashedPassword;

use crate::domain::entity::{refresh_token::RefreshTokenRecord, role::Role, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; a duplicate email is `EmailTaken`
    async fn create_user(&self, user: &User) -> AuthResult<()>;

    async fn find_user(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn email_exists(&self, email: &Email) -> AuthResult<bool>;

    /// Replace the stored hash, e.g. after a cost upgrade on login
    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &HashedPassword,
    ) -> AuthResult<()>;
}

/// Role reference data
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    async fn find_role(&self, role_id: &RoleId) -> AuthResult<Option<Role>>;

    async fn find_role_by_name(&self, name: &str) -> AuthResult<Option<Role>>;
}

/// Refresh token records
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    async fn save_refresh_token(&self, record: &RefreshTokenRecord) -> AuthResult<()>;

    async fn find_refresh_token(
        &self,
        token_id: &RefreshTokenId,
    ) -> AuthResult<Option<RefreshTokenRecord>>;

    /// Revoke `old` and insert `new` as one atomic unit
    ///
    /// The revoke only applies to a record that is still active. Returns
    /// `false` (and inserts nothing) when `old` was already revoked or
    /// expired, so at most one of two concurrent rotations wins.
    async fn rotate_refresh_token(
        &self,
        old: &RefreshTokenId,
        new: &RefreshTokenRecord,
    ) -> AuthResult<bool>;

    /// Revoke every active record of the user; returns how many were revoked
    async fn revoke_all_refresh_tokens(&self, user_id: &UserId) -> AuthResult<u64>;
}

/// Everything the auth HTTP layer needs from one store
pub trait AuthStore:
    UserRepository + RoleRepository + RefreshTokenRepository + Send + Sync + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository + RoleRepository + RefreshTokenRepository + Send + Sync + 'static
{
}
