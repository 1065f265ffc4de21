//! The fixed role enumeration issued by the backend.

use crate::portal::PortalType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enum representing a user's role on the platform.
///
/// Roles are issued by the backend and never invented client-side. The
/// permission set of a session is fully determined by its role; there are
/// no per-user overrides in this subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform-wide administrator (saas portal, wildcard permissions)
    SuperAdmin,
    /// Per-school administrator
    SchoolAdmin,
    /// Teacher with access to academic functions
    Teacher,
    /// Student with view access to their own data
    Student,
    /// Parent with view access to their children's data
    Parent,
    /// General staff member with basic access
    Staff,
}

impl Role {
    /// All roles, in no particular order.
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::SchoolAdmin,
        Role::Teacher,
        Role::Student,
        Role::Parent,
        Role::Staff,
    ];

    /// Returns the role as a string (snake_case, matching the wire form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::SchoolAdmin => "school_admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Staff => "staff",
        }
    }

    /// Parse a role from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "super_admin" => Some(Role::SuperAdmin),
            "school_admin" => Some(Role::SchoolAdmin),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            "parent" => Some(Role::Parent),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    /// The portal this role belongs to: super admins use the platform-wide
    /// saas portal, every other role the per-school tenant portal.
    pub fn portal_type(&self) -> PortalType {
        match self {
            Role::SuperAdmin => PortalType::Saas,
            _ => PortalType::Tenant,
        }
    }

    /// Whether this role short-circuits permission checks to "allowed".
    #[inline]
    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
