//! Error types for campus-link.

/// Result type for campus-link operations.
pub type Result<T> = std::result::Result<T, CampusLinkError>;

/// Errors produced by the campus-link client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CampusLinkError {
    /// Connection failed or the transport broke mid-request.
    #[error("Network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The backend rejected the credentials or token (401/403).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend answered with a non-success status outside the
    /// authentication class.
    #[error("Server error ({status_code}): {message}")]
    Server { status_code: u16, message: String },

    /// The response body could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The client was misconfigured (e.g. missing base URL).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The operation was superseded and its result discarded.
    #[error("Operation cancelled")]
    Cancelled,
}

impl CampusLinkError {
    /// Whether this error means the session itself is no longer valid, as
    /// opposed to a transient transport failure.
    pub fn is_authentication(&self) -> bool {
        matches!(self, CampusLinkError::Authentication(_))
    }
}

impl From<reqwest::Error> for CampusLinkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CampusLinkError::Timeout(e.to_string())
        } else if e.is_decode() {
            CampusLinkError::Serialization(e.to_string())
        } else {
            CampusLinkError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CampusLinkError::Server {
            status_code: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (503): maintenance");
    }

    #[test]
    fn test_is_authentication() {
        assert!(CampusLinkError::Authentication("bad token".into()).is_authentication());
        assert!(!CampusLinkError::Network("down".into()).is_authentication());
    }
}
