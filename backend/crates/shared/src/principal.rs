//! Authenticated caller identity
//!
//! Resolved once by the access middleware and handed explicitly to every
//! handler that needs it.

use serde::Serialize;

use crate::id::{RoleId, UserId};

/// Well-known role names
pub mod roles {
    pub const BUYER: &str = "buyer";
    pub const SELLER: &str = "seller";
    pub const ADMIN: &str = "admin";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role_id: RoleId,
    /// Role name as stored, e.g. `"buyer"`
    pub role: String,
}

impl Principal {
    pub fn new(user_id: UserId, role_id: RoleId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role_id,
            role: role.into(),
        }
    }

    #[inline]
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.has_role(roles::ADMIN)
    }

    #[inline]
    pub fn is_buyer(&self) -> bool {
        self.has_role(roles::BUYER)
    }
}
