//! Conditional-render decisions driven by the permission set.
//!
//! A UX aid, not a security boundary: the gate hides affordances the user
//! cannot use, while the backend independently authorizes every mutating
//! request.

use crate::permissions::PermissionSet;
use campus_commons::{Action, Capability};

/// How multiple required capabilities combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// Every capability must be held.
    All,
    /// Any one capability suffices.
    Any,
}

/// A pure should-this-render decision.
///
/// # Examples
///
/// ```rust
/// use campus_commons::{Action, Capability, Role};
/// use campus_session::{role_grants, PermissionGate};
///
/// let gate = PermissionGate::require("grades", Action::Update);
/// assert!(gate.should_render(role_grants(Role::Teacher)));
/// assert!(!gate.should_render(role_grants(Role::Student)));
/// ```
#[derive(Debug, Clone)]
pub struct PermissionGate {
    required: Vec<Capability>,
    mode: GateMode,
}

impl PermissionGate {
    /// Gate on a single `resource:action` pair.
    pub fn require(resource: impl Into<String>, action: Action) -> Self {
        PermissionGate {
            required: vec![Capability::grant(resource, action)],
            mode: GateMode::All,
        }
    }

    /// Gate on an explicit list, all of which must be held.
    pub fn all(caps: impl IntoIterator<Item = Capability>) -> Self {
        PermissionGate {
            required: caps.into_iter().collect(),
            mode: GateMode::All,
        }
    }

    /// Gate on an explicit list, any one of which suffices.
    pub fn any(caps: impl IntoIterator<Item = Capability>) -> Self {
        PermissionGate {
            required: caps.into_iter().collect(),
            mode: GateMode::Any,
        }
    }

    /// Whether the gated fragment should render. Pure; no side effects.
    /// An empty requirement list always renders.
    pub fn should_render(&self, permissions: &PermissionSet) -> bool {
        match self.mode {
            GateMode::All => permissions.all(&self.required),
            GateMode::Any => self.required.is_empty() || permissions.any(&self.required),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::role_grants;
    use campus_commons::Role;

    #[test]
    fn test_single_requirement() {
        let gate = PermissionGate::require("grades", Action::Update);
        assert!(gate.should_render(role_grants(Role::Teacher)));
        assert!(gate.should_render(role_grants(Role::SuperAdmin)));
        assert!(!gate.should_render(role_grants(Role::Parent)));
    }

    #[test]
    fn test_all_mode() {
        let gate = PermissionGate::all([
            Capability::grant("grades", Action::View),
            Capability::grant("grades", Action::Update),
        ]);
        assert!(gate.should_render(role_grants(Role::Teacher)));
        assert!(!gate.should_render(role_grants(Role::Student)));
    }

    #[test]
    fn test_any_mode() {
        let gate = PermissionGate::any([
            Capability::grant("billing", Action::Manage),
            Capability::grant("grades", Action::View),
        ]);
        assert!(gate.should_render(role_grants(Role::Student)));
        assert!(!gate.should_render(&PermissionSet::empty()));
    }

    #[test]
    fn test_empty_requirements_always_render() {
        let empty_all = PermissionGate::all([]);
        let empty_any = PermissionGate::any([]);
        assert!(empty_all.should_render(&PermissionSet::empty()));
        assert!(empty_any.should_render(&PermissionSet::empty()));
    }

    #[test]
    fn test_anonymous_set_hides_everything() {
        let gate = PermissionGate::require("students", Action::View);
        assert!(!gate.should_render(&PermissionSet::empty()));
    }
}
