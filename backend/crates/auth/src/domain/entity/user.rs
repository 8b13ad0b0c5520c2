//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::{RoleId, UserId};
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_name::UserName};

/// Registered account
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: UserName,
    /// Unique, lowercased
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role_id: RoleId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: UserName, email: Email, password_hash: HashedPassword, role_id: RoleId) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            role_id,
            created_at: now,
            updated_at: now,
        }
    }
}
