//! Authentication and storage constants shared across client crates.

/// Constants for session storage and tenant resolution.
pub struct AuthConstants;

impl AuthConstants {
    /// Fixed key under which the serialized session snapshot is persisted.
    pub const SESSION_STORAGE_KEY: &'static str = "campus.session";

    /// Subdomain of the fallback tenant used on loopback hosts.
    pub const DEMO_SUBDOMAIN: &'static str = "demo";

    /// Display name of the fallback tenant.
    pub const DEMO_TENANT_NAME: &'static str = "Demo School";

    /// How long before token expiry a refresh becomes due, in seconds.
    pub const REFRESH_LOOKAHEAD_SECS: u64 = 300;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_lookahead_is_five_minutes() {
        assert_eq!(AuthConstants::REFRESH_LOOKAHEAD_SECS, 5 * 60);
    }
}
