//! User identity as issued by the backend.

use crate::ids::{TenantId, UserId};
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// An authenticated user.
///
/// Immutable once issued by the backend; replaced wholesale on login and
/// refresh, never mutated field-by-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    /// School the user belongs to. Absent for platform-level users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
}

impl User {
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        User {
            id,
            display_name: display_name.into(),
            email: email.into(),
            role,
            tenant_id: None,
        }
    }

    pub fn with_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }
}
