//! Error types for campus-session.

use campus_link::CampusLinkError;

/// Result type for session operations.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors produced by the session subsystem.
///
/// Nothing here is fatal to the application: the worst outcome of any
/// session error is a forced logout.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// The backend rejected the login credentials. Surfaced to the user;
    /// any prior session is left untouched.
    #[error("Invalid credentials: {0}")]
    Credential(String),

    /// A transport or server failure from the backend client.
    #[error(transparent)]
    Api(#[from] CampusLinkError),

    /// The token store failed to read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The persisted snapshot was missing required fields or unparseable.
    /// Handled by discarding the snapshot and falling back to anonymous.
    #[error("Malformed session snapshot: {0}")]
    InvalidSnapshot(String),

    /// An operation that needs an active session was called without one.
    #[error("No active session")]
    NotAuthenticated,

    /// The session changed while the operation was in flight; its result
    /// was discarded.
    #[error("Operation superseded by logout or re-login")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_is_transparent() {
        let err: SessionError = CampusLinkError::Network("down".to_string()).into();
        assert_eq!(err.to_string(), "Network error: down");
    }

    #[test]
    fn test_credential_display() {
        let err = SessionError::Credential("bad password".to_string());
        assert_eq!(err.to_string(), "Invalid credentials: bad password");
    }
}
