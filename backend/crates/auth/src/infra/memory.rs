//! In-memory store for tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::id::{RefreshTokenId, RoleId, UserId};
use platform::password::HashedPassword;

use crate::domain::entity::{refresh_token::RefreshTokenRecord, role::Role, user::User};
use crate::domain::repository::{RefreshTokenRepository, RoleRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    roles: Vec<Role>,
    tokens: HashMap<RefreshTokenId, RefreshTokenRecord>,
}

#[derive(Clone, Default)]
pub(crate) struct MemoryAuthStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryAuthStore {
    /// Seeded with `buyer`, `seller` and `admin`
    pub fn with_default_roles() -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().unwrap();
            for name in ["buyer", "seller", "admin"] {
                inner.roles.push(Role {
                    role_id: RoleId::new(),
                    name: name.to_string(),
                    description: None,
                });
            }
        }
        store
    }

    pub fn role_id(&self, name: &str) -> RoleId {
        let inner = self.inner.lock().unwrap();
        inner
            .roles
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.role_id)
            .unwrap()
    }

    pub fn set_role(&self, user_id: UserId, role: &str) {
        let role_id = self.role_id(role);
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.get_mut(&user_id) {
            user.role_id = role_id;
        }
    }

    pub fn refresh_token(&self, id: &RefreshTokenId) -> Option<RefreshTokenRecord> {
        self.inner.lock().unwrap().tokens.get(id).cloned()
    }

    pub fn refresh_tokens_of(&self, user_id: UserId) -> Vec<RefreshTokenRecord> {
        let inner = self.inner.lock().unwrap();
        inner
            .tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }
}

impl UserRepository for MemoryAuthStore {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        inner.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_user(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.inner.lock().unwrap().users.get(user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.values().find(|u| &u.email == email).cloned())
    }

    async fn email_exists(&self, email: &Email) -> AuthResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.values().any(|u| &u.email == email))
    }

    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &HashedPassword,
    ) -> AuthResult<()> {
        if let Some(user) = self.inner.lock().unwrap().users.get_mut(user_id) {
            user.password_hash = password_hash.clone();
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

impl RoleRepository for MemoryAuthStore {
    async fn find_role(&self, role_id: &RoleId) -> AuthResult<Option<Role>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.roles.iter().find(|r| &r.role_id == role_id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> AuthResult<Option<Role>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.roles.iter().find(|r| r.name == name).cloned())
    }
}

impl RefreshTokenRepository for MemoryAuthStore {
    async fn save_refresh_token(&self, record: &RefreshTokenRecord) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.tokens.insert(record.token_id, record.clone());
        Ok(())
    }

    async fn find_refresh_token(
        &self,
        token_id: &RefreshTokenId,
    ) -> AuthResult<Option<RefreshTokenRecord>> {
        Ok(self.inner.lock().unwrap().tokens.get(token_id).cloned())
    }

    async fn rotate_refresh_token(
        &self,
        old: &RefreshTokenId,
        new: &RefreshTokenRecord,
    ) -> AuthResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();
        match inner.tokens.get_mut(old) {
            Some(record) if record.is_active(now) => record.revoke(),
            _ => return Ok(false),
        }
        inner.tokens.insert(new.token_id, new.clone());
        Ok(true)
    }

    async fn revoke_all_refresh_tokens(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let mut revoked = 0;
        for record in inner.tokens.values_mut() {
            if &record.user_id == user_id && !record.revoked {
                record.revoke();
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}
