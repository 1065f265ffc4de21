//! Authentication provider for the campus-link client.
//!
//! Attaches the appropriate Authorization header to outgoing HTTP requests.

use crate::error::Result;

/// Authentication credentials for the campus backend.
///
/// # Examples
///
/// ```rust
/// use campus_link::AuthProvider;
///
/// // Bearer token authentication
/// let auth = AuthProvider::bearer_token("eyJhbGc...".to_string());
///
/// // No authentication (login and refresh requests)
/// let auth = AuthProvider::none();
/// ```
#[derive(Debug, Clone)]
pub enum AuthProvider {
    /// Bearer token authentication
    BearerToken(String),

    /// No authentication
    None,
}

impl AuthProvider {
    /// Create bearer token authentication.
    pub fn bearer_token(token: impl Into<String>) -> Self {
        Self::BearerToken(token.into())
    }

    /// No authentication (for unauthenticated endpoints).
    pub fn none() -> Self {
        Self::None
    }

    /// Attach authentication headers to an HTTP request builder.
    ///
    /// - BearerToken: `Authorization: Bearer <token>`
    /// - None: no headers
    pub fn apply_to_request(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder> {
        match self {
            Self::BearerToken(token) => Ok(request.bearer_auth(token)),
            Self::None => Ok(request),
        }
    }

    /// Check if authentication is configured.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_creation() {
        let bearer = AuthProvider::bearer_token("test_token");
        assert!(bearer.is_authenticated());

        let none = AuthProvider::none();
        assert!(!none.is_authenticated());
    }

    #[test]
    fn test_apply_to_request_does_not_error() {
        let client = reqwest::Client::new();
        let request = client.get("http://localhost:8000");
        let result = AuthProvider::bearer_token("abc").apply_to_request(request);
        assert!(result.is_ok());
    }
}
