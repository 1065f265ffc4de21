//! Portal classification for navigation and authorization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse partition of the application: platform-wide administration
/// ("saas") versus per-school administration ("tenant").
///
/// Used by the route guard to keep each audience inside its own portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalType {
    /// Platform-wide administration portal
    Saas,
    /// Per-school administration portal
    Tenant,
}

impl PortalType {
    /// Returns the portal type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PortalType::Saas => "saas",
            PortalType::Tenant => "tenant",
        }
    }

    /// Root path of the portal, used as the redirect target when a session
    /// lands in the wrong portal.
    pub fn root_path(&self) -> &'static str {
        match self {
            PortalType::Saas => "/saas",
            PortalType::Tenant => "/tenant",
        }
    }
}

impl fmt::Display for PortalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(PortalType::Saas.as_str(), "saas");
        assert_eq!(PortalType::Tenant.as_str(), "tenant");
    }

    #[test]
    fn test_root_path() {
        assert_eq!(PortalType::Saas.root_path(), "/saas");
        assert_eq!(PortalType::Tenant.root_path(), "/tenant");
    }
}
