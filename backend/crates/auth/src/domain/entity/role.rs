//! Role Entity
//!
//! Static reference data seeded by migrations (`buyer`, `seller`, `admin`).

use kernel::id::RoleId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub role_id: RoleId,
    pub name: String,
    pub description: Option<String>,
}
