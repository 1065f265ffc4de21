//! Tenant identity and subdomain resolution.

use crate::constants::AuthConstants;
use crate::ids::TenantId;
use serde::{Deserialize, Serialize};

/// One school on the platform.
///
/// Exactly one tenant is active per browser session. It is derived from the
/// host name before login and replaced by the backend's authoritative
/// record on a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub subdomain: String,
    pub name: String,
}

impl Tenant {
    /// The fixed fallback tenant used on loopback hosts.
    pub fn demo() -> Self {
        Tenant {
            id: TenantId::new(AuthConstants::DEMO_SUBDOMAIN),
            subdomain: AuthConstants::DEMO_SUBDOMAIN.to_string(),
            name: AuthConstants::DEMO_TENANT_NAME.to_string(),
        }
    }

    /// Derive the active tenant from a host name.
    ///
    /// `northside.campushq.io` resolves to subdomain `northside`; loopback
    /// hosts and bare domains fall back to the demo tenant.
    pub fn from_host(host: &str) -> Self {
        match subdomain_from_host(host) {
            Some(subdomain) => Tenant {
                id: TenantId::new(subdomain),
                subdomain: subdomain.to_string(),
                name: subdomain.to_string(),
            },
            None => Tenant::demo(),
        }
    }
}

/// Extract the tenant subdomain (first DNS label) from a host name.
///
/// Returns `None` for loopback hosts and for hosts without a subdomain
/// (fewer than three labels), in which case callers fall back to the demo
/// tenant.
pub fn subdomain_from_host(host: &str) -> Option<&str> {
    // Remove port if present
    let host = host.split(':').next().unwrap_or(host);
    if host.is_empty() || is_loopback(host) {
        return None;
    }
    let mut labels = host.split('.');
    let first = labels.next()?;
    // school1.yourplatform.com -> school1; yourplatform.com has no subdomain
    if labels.count() < 2 || first.is_empty() {
        return None;
    }
    Some(first)
}

fn is_loopback(host: &str) -> bool {
    host == "localhost" || host == "127.0.0.1" || host == "::1" || host.ends_with(".localhost")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_extraction() {
        assert_eq!(
            subdomain_from_host("northside.campushq.io"),
            Some("northside")
        );
        assert_eq!(
            subdomain_from_host("school1.yourplatform.com:8080"),
            Some("school1")
        );
        assert_eq!(subdomain_from_host("campushq.io"), None);
        assert_eq!(subdomain_from_host("localhost"), None);
        assert_eq!(subdomain_from_host("localhost:3000"), None);
        assert_eq!(subdomain_from_host("127.0.0.1"), None);
        assert_eq!(subdomain_from_host("northside.localhost"), None);
        assert_eq!(subdomain_from_host(""), None);
    }

    #[test]
    fn test_from_host_resolves_tenant() {
        let tenant = Tenant::from_host("northside.campushq.io");
        assert_eq!(tenant.subdomain, "northside");
        assert_eq!(tenant.id.as_str(), "northside");
    }

    #[test]
    fn test_from_host_falls_back_to_demo() {
        let tenant = Tenant::from_host("localhost:5173");
        assert_eq!(tenant, Tenant::demo());
        assert_eq!(tenant.subdomain, "demo");
    }
}
