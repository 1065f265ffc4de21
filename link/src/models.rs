//! Request and response models for the auth endpoints.

use campus_commons::{Tenant, User};
use serde::{Deserialize, Serialize};

/// Credentials sent to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Tenant subdomain the login is scoped to. Absent for platform-level
    /// logins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginRequest {
            email: email.into(),
            password: password.into(),
            tenant: None,
        }
    }

    pub fn with_tenant(mut self, subdomain: impl Into<String>) -> Self {
        self.tenant = Some(subdomain.into());
        self
    }
}

/// Successful login payload: the user plus a fresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    /// Authoritative tenant record, when the backend returns one. Falls
    /// back to the host-derived tenant otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<Tenant>,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Body of a token refresh request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// A refreshed token grant.
///
/// The backend may rotate the refresh token; when it does not, the caller
/// keeps using the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_commons::{Role, UserId};

    #[test]
    fn test_login_request_omits_absent_tenant() {
        let req = LoginRequest::new("ada@northside.edu", "pw");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("tenant"));

        let scoped = req.with_tenant("northside");
        let json = serde_json::to_string(&scoped).unwrap();
        assert!(json.contains("\"tenant\":\"northside\""));
    }

    #[test]
    fn test_login_response_parses_minimal_payload() {
        let json = r#"{
            "user": {"id":"u1","display_name":"Ada","email":"ada@northside.edu","role":"teacher"},
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 900
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.user.id, UserId::new("u1"));
        assert_eq!(resp.user.role, Role::Teacher);
        assert!(resp.tenant.is_none());
        assert_eq!(resp.expires_in, 900);
    }

    #[test]
    fn test_token_grant_without_rotation() {
        let json = r#"{"access_token":"at2","expires_in":900}"#;
        let grant: TokenGrant = serde_json::from_str(json).unwrap();
        assert_eq!(grant.refresh_token, None);
    }
}
