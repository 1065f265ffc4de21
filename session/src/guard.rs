//! The authorization checkpoint evaluated before rendering a navigation
//! target.
//!
//! Pure decision logic over a [`SessionView`] snapshot: given what a route
//! requires, answer `Allow` or `Redirect(path)`. Policy, in order:
//!
//! 1. authentication required, no session → login (original path
//!    preserved for the post-login return)
//! 2. wrong portal → that portal's root
//! 3. role not among the required ones → unauthorized
//! 4. any required permission absent → unauthorized
//!
//! The guard never mutates session state; the out-of-band auth-failure
//! signal ([`crate::SessionManager::on_auth_failure`]) is the app's hook
//! for forcing a login redirect from anywhere.

use crate::permissions::PermissionSet;
use campus_commons::{Capability, PortalType, Role, UserId};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when the original path is carried in the `next`
/// query parameter, so a target with its own query string survives the
/// round trip.
const NEXT_TARGET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?');

/// What the route guard needs to know about the current session.
///
/// Obtained from [`crate::SessionManager::view`]; `None` there means
/// anonymous or expired.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub user_id: UserId,
    pub role: Role,
    pub portal: PortalType,
    pub permissions: PermissionSet,
}

/// Authorization requirements attached to a navigation target.
#[derive(Debug, Clone, Default)]
pub struct RouteRequirements {
    pub requires_auth: bool,
    pub portal: Option<PortalType>,
    pub roles: Vec<Role>,
    pub permissions: Vec<Capability>,
}

impl RouteRequirements {
    /// A public route: anyone may enter.
    pub fn public() -> Self {
        Self::default()
    }

    /// A route that only requires a valid session.
    pub fn authenticated() -> Self {
        RouteRequirements {
            requires_auth: true,
            ..Self::default()
        }
    }

    /// Restrict to one portal.
    pub fn portal(mut self, portal: PortalType) -> Self {
        self.portal = Some(portal);
        self
    }

    /// Restrict to a set of roles.
    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    /// Require capabilities (all must be held).
    pub fn permissions(mut self, caps: impl IntoIterator<Item = Capability>) -> Self {
        self.permissions = caps.into_iter().collect();
        self
    }

    /// Whether this route can be decided without a session at all.
    fn needs_session(&self) -> bool {
        self.requires_auth
            || self.portal.is_some()
            || !self.roles.is_empty()
            || !self.permissions.is_empty()
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// The route guard and its redirect targets.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
    unauthorized_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        RouteGuard {
            login_path: "/login".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
        }
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the login redirect target.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Override the unauthorized redirect target.
    pub fn with_unauthorized_path(mut self, path: impl Into<String>) -> Self {
        self.unauthorized_path = path.into();
        self
    }

    /// The login redirect, preserving the originally requested path so the
    /// app can return there after login. The target is percent-encoded so
    /// its own query string, if any, stays inside the `next` parameter.
    pub fn login_redirect(&self, target: &str) -> RouteDecision {
        RouteDecision::Redirect(format!(
            "{}?next={}",
            self.login_path,
            utf8_percent_encode(target, NEXT_TARGET)
        ))
    }

    /// Decide whether navigation to `target` is allowed.
    pub fn evaluate(
        &self,
        target: &str,
        requirements: &RouteRequirements,
        session: Option<&SessionView>,
    ) -> RouteDecision {
        let view = match session {
            Some(view) => view,
            None => {
                if requirements.needs_session() {
                    return self.login_redirect(target);
                }
                return RouteDecision::Allow;
            }
        };

        if let Some(required_portal) = requirements.portal {
            if required_portal != view.portal {
                return RouteDecision::Redirect(view.portal.root_path().to_string());
            }
        }

        if !requirements.roles.is_empty() && !requirements.roles.contains(&view.role) {
            return RouteDecision::Redirect(self.unauthorized_path.clone());
        }

        if !requirements.permissions.is_empty()
            && !view.permissions.all(&requirements.permissions)
        {
            return RouteDecision::Redirect(self.unauthorized_path.clone());
        }

        RouteDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::role_grants;
    use campus_commons::Action;

    fn view(role: Role) -> SessionView {
        SessionView {
            user_id: UserId::new("u1"),
            role,
            portal: role.portal_type(),
            permissions: role_grants(role).clone(),
        }
    }

    #[test]
    fn test_public_route_allows_anonymous() {
        let guard = RouteGuard::new();
        let decision = guard.evaluate("/", &RouteRequirements::public(), None);
        assert_eq!(decision, RouteDecision::Allow);
    }

    #[test]
    fn test_anonymous_redirected_to_login_with_next() {
        let guard = RouteGuard::new();
        let decision = guard.evaluate(
            "/tenant/grades",
            &RouteRequirements::authenticated(),
            None,
        );
        assert_eq!(
            decision,
            RouteDecision::Redirect("/login?next=/tenant/grades".to_string())
        );
    }

    #[test]
    fn test_login_redirect_encodes_target_query() {
        let guard = RouteGuard::new();
        let decision = guard.evaluate(
            "/tenant/grades?term=2&class=7b",
            &RouteRequirements::authenticated(),
            None,
        );
        assert_eq!(
            decision,
            RouteDecision::Redirect(
                "/login?next=/tenant/grades%3Fterm%3D2%26class%3D7b".to_string()
            )
        );
    }

    #[test]
    fn test_portal_mismatch_redirects_to_own_portal_root() {
        let guard = RouteGuard::new();
        let school_admin = view(Role::SchoolAdmin);
        let requirements = RouteRequirements::authenticated().portal(PortalType::Saas);
        let decision = guard.evaluate("/saas/schools", &requirements, Some(&school_admin));
        // Redirected to the tenant portal root, never reaching the target
        assert_eq!(decision, RouteDecision::Redirect("/tenant".to_string()));
    }

    #[test]
    fn test_super_admin_reaches_saas_portal() {
        let guard = RouteGuard::new();
        let admin = view(Role::SuperAdmin);
        let requirements = RouteRequirements::authenticated().portal(PortalType::Saas);
        let decision = guard.evaluate("/saas/schools", &requirements, Some(&admin));
        assert_eq!(decision, RouteDecision::Allow);
    }

    #[test]
    fn test_role_restriction() {
        let guard = RouteGuard::new();
        let requirements =
            RouteRequirements::authenticated().roles([Role::SchoolAdmin, Role::Teacher]);
        assert_eq!(
            guard.evaluate("/tenant/grades/edit", &requirements, Some(&view(Role::Teacher))),
            RouteDecision::Allow
        );
        assert_eq!(
            guard.evaluate("/tenant/grades/edit", &requirements, Some(&view(Role::Student))),
            RouteDecision::Redirect("/unauthorized".to_string())
        );
    }

    #[test]
    fn test_permission_restriction() {
        let guard = RouteGuard::new();
        let requirements = RouteRequirements::authenticated()
            .permissions([Capability::grant("billing", Action::Manage)]);
        assert_eq!(
            guard.evaluate("/tenant/billing", &requirements, Some(&view(Role::SchoolAdmin))),
            RouteDecision::Allow
        );
        assert_eq!(
            guard.evaluate("/tenant/billing", &requirements, Some(&view(Role::Teacher))),
            RouteDecision::Redirect("/unauthorized".to_string())
        );
    }

    #[test]
    fn test_portal_checked_before_roles() {
        // A student probing a saas-only, super-admin-only route lands on
        // their portal root, not the unauthorized page.
        let guard = RouteGuard::new();
        let requirements = RouteRequirements::authenticated()
            .portal(PortalType::Saas)
            .roles([Role::SuperAdmin]);
        assert_eq!(
            guard.evaluate("/saas", &requirements, Some(&view(Role::Student))),
            RouteDecision::Redirect("/tenant".to_string())
        );
    }

    #[test]
    fn test_custom_paths() {
        let guard = RouteGuard::new()
            .with_login_path("/signin")
            .with_unauthorized_path("/403");
        assert_eq!(
            guard.evaluate("/x", &RouteRequirements::authenticated(), None),
            RouteDecision::Redirect("/signin?next=/x".to_string())
        );
        let requirements = RouteRequirements::authenticated().roles([Role::SuperAdmin]);
        assert_eq!(
            guard.evaluate("/x", &requirements, Some(&view(Role::Teacher))),
            RouteDecision::Redirect("/403".to_string())
        );
    }
}
