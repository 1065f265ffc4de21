//! Capability strings: one `resource:action` permission grant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The action half of a capability string.
///
/// Mirrors the backend's permission types (`view`, `create`, `update`,
/// `delete`) plus `manage`, which subsumes all four for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    Manage,
}

impl Action {
    /// Returns the action as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
        }
    }

    /// Parse an action from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "view" => Some(Action::View),
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "manage" => Some(Action::Manage),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for capability string parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityParseError(pub String);

impl fmt::Display for CapabilityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid capability string: {}", self.0)
    }
}

impl std::error::Error for CapabilityParseError {}

/// One permission grant.
///
/// The wildcard `*:manage` is a distinguished variant rather than a literal
/// string so that permission checks test for it explicitly before any
/// membership lookup.
///
/// Serialized as its string form (`"grades:update"`, `"*:manage"`), which
/// is also the persisted snapshot layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Capability {
    /// Wildcard grant held by super admins; allows everything.
    ManageAll,
    /// A single `resource:action` grant.
    Grant { resource: String, action: Action },
}

impl Capability {
    /// String form of the wildcard grant.
    pub const WILDCARD: &'static str = "*:manage";

    /// Creates a single `resource:action` grant.
    pub fn grant(resource: impl Into<String>, action: Action) -> Self {
        Capability::Grant {
            resource: resource.into(),
            action,
        }
    }

    /// Whether this is the wildcard grant.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Capability::ManageAll)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::ManageAll => write!(f, "{}", Self::WILDCARD),
            Capability::Grant { resource, action } => write!(f, "{}:{}", resource, action),
        }
    }
}

impl FromStr for Capability {
    type Err = CapabilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::WILDCARD {
            return Ok(Capability::ManageAll);
        }
        let (resource, action) = s
            .split_once(':')
            .ok_or_else(|| CapabilityParseError(s.to_string()))?;
        if resource.is_empty() || resource == "*" {
            return Err(CapabilityParseError(s.to_string()));
        }
        let action = Action::parse(action).ok_or_else(|| CapabilityParseError(s.to_string()))?;
        Ok(Capability::Grant {
            resource: resource.to_string(),
            action,
        })
    }
}

impl TryFrom<String> for Capability {
    type Error = CapabilityParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Capability> for String {
    fn from(cap: Capability) -> String {
        cap.to_string()
    }
}
