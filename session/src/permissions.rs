//! The static role → capability table and permission set queries.
//!
//! Process-wide constant data, never mutated at runtime. A capability
//! check passes iff the wildcard grant is present (checked first) or the
//! exact `resource:action` capability is a member of the role's set.
//! There is no hierarchy and no inheritance between roles.

use campus_commons::{Action, Capability, Role};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Resources administered inside one school. School admins hold every
/// action on each of these.
const SCHOOL_RESOURCES: &[&str] = &[
    "students",
    "teachers",
    "parents",
    "staff",
    "classes",
    "grades",
    "attendance",
    "reports",
    "library",
    "communication",
    "billing",
    "settings",
];

const TEACHER_GRANTS: &[(&str, Action)] = &[
    ("students", Action::View),
    ("classes", Action::View),
    ("classes", Action::Update),
    ("grades", Action::View),
    ("grades", Action::Create),
    ("grades", Action::Update),
    ("attendance", Action::View),
    ("attendance", Action::Create),
    ("attendance", Action::Update),
    ("reports", Action::View),
    ("reports", Action::Create),
    ("library", Action::View),
    ("library", Action::Create),
    ("library", Action::Update),
    ("communication", Action::View),
    ("communication", Action::Create),
    ("communication", Action::Update),
];

const STUDENT_GRANTS: &[(&str, Action)] = &[
    ("classes", Action::View),
    ("grades", Action::View),
    ("attendance", Action::View),
    ("library", Action::View),
    ("communication", Action::View),
];

const PARENT_GRANTS: &[(&str, Action)] = &[
    ("grades", Action::View),
    ("attendance", Action::View),
    ("reports", Action::View),
    ("communication", Action::View),
    ("billing", Action::View),
];

const STAFF_GRANTS: &[(&str, Action)] = &[
    ("students", Action::View),
    ("classes", Action::View),
    ("attendance", Action::View),
    ("attendance", Action::Create),
    ("library", Action::View),
    ("library", Action::Create),
    ("communication", Action::View),
];

/// An unordered set of capability grants with wildcard-aware membership.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionSet(HashSet<Capability>);

impl PermissionSet {
    /// The empty set; every query answers `false`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_capabilities(caps: impl IntoIterator<Item = Capability>) -> Self {
        PermissionSet(caps.into_iter().collect())
    }

    /// Membership test. The wildcard sentinel is checked before any exact
    /// lookup so a super-admin set answers `true` for everything.
    pub fn contains(&self, cap: &Capability) -> bool {
        if self.0.contains(&Capability::ManageAll) {
            return true;
        }
        self.0.contains(cap)
    }

    /// Exact `resource:action` check.
    pub fn allows(&self, resource: &str, action: Action) -> bool {
        self.contains(&Capability::grant(resource, action))
    }

    /// True when at least one of `caps` is held. Empty input is `false`.
    pub fn any(&self, caps: &[Capability]) -> bool {
        caps.iter().any(|c| self.contains(c))
    }

    /// True when every one of `caps` is held. Empty input is `true`.
    pub fn all(&self, caps: &[Capability]) -> bool {
        caps.iter().all(|c| self.contains(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The capabilities in stable string form, for persistence.
    pub fn to_vec(&self) -> Vec<Capability> {
        let mut caps: Vec<Capability> = self.0.iter().cloned().collect();
        caps.sort_by_key(|c| c.to_string());
        caps
    }
}

static GRANTS: Lazy<HashMap<Role, PermissionSet>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        Role::SuperAdmin,
        PermissionSet::from_capabilities([Capability::ManageAll]),
    );

    // School admins get the full action set on every school resource,
    // spelled out because membership checks are exact.
    let school_admin = SCHOOL_RESOURCES.iter().flat_map(|resource| {
        [
            Action::View,
            Action::Create,
            Action::Update,
            Action::Delete,
            Action::Manage,
        ]
        .into_iter()
        .map(move |action| Capability::grant(*resource, action))
    });
    table.insert(
        Role::SchoolAdmin,
        PermissionSet::from_capabilities(school_admin),
    );

    for (role, grants) in [
        (Role::Teacher, TEACHER_GRANTS),
        (Role::Student, STUDENT_GRANTS),
        (Role::Parent, PARENT_GRANTS),
        (Role::Staff, STAFF_GRANTS),
    ] {
        table.insert(
            role,
            PermissionSet::from_capabilities(
                grants.iter().map(|(r, a)| Capability::grant(*r, *a)),
            ),
        );
    }

    table
});

/// The fixed capability set for a role.
pub fn role_grants(role: Role) -> &'static PermissionSet {
    GRANTS
        .get(&role)
        .expect("permission table covers every role")
}

/// Capability check against the static table: true iff the role holds the
/// wildcard or the exact `resource:action` grant.
pub fn has(role: Role, resource: &str, action: Action) -> bool {
    role_grants(role).allows(resource, action)
}
