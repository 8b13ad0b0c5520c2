//! Read projections returned by use cases

use kernel::id::UserId;

use crate::domain::entity::{role::Role, user::User};

/// User projection: identity, name, email and role name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserView {
    pub fn new(user: &User, role: &Role) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: role.name.clone(),
        }
    }
}
