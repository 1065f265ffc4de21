//! Authentication failure fan-out.
//!
//! Any collaborator that detects an unrecoverable 401 broadcasts through
//! here; the application wires a listener that forces a login redirect
//! regardless of the current route.

use std::fmt;
use std::sync::{Arc, RwLock};

/// Why a session became unusable.
#[derive(Debug, Clone)]
pub enum AuthFailure {
    /// The refresh exchange failed; the session is unrecoverable.
    RefreshFailed(String),
    /// Background validation of a restored session was rejected.
    ValidationFailed(String),
    /// A collaborator outside this crate observed an unrecoverable 401.
    External(String),
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::RefreshFailed(msg) => write!(f, "token refresh failed: {}", msg),
            AuthFailure::ValidationFailed(msg) => write!(f, "session validation failed: {}", msg),
            AuthFailure::External(msg) => write!(f, "authentication failure: {}", msg),
        }
    }
}

/// Type alias for auth-failure listeners.
pub type AuthFailureCallback = Arc<dyn Fn(&AuthFailure) + Send + Sync>;

/// Registry of auth-failure listeners.
#[derive(Default)]
pub(crate) struct AuthEvents {
    callbacks: RwLock<Vec<AuthFailureCallback>>,
}

impl AuthEvents {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&self, callback: AuthFailureCallback) {
        self.callbacks.write().unwrap().push(callback);
    }

    pub(crate) fn notify(&self, failure: &AuthFailure) {
        let callbacks = self.callbacks.read().unwrap().clone();
        for callback in callbacks {
            callback(failure);
        }
    }
}

impl fmt::Debug for AuthEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.callbacks.read().unwrap().len();
        f.debug_struct("AuthEvents").field("listeners", &count).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_every_listener() {
        let events = AuthEvents::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            events.subscribe(Arc::new(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        }
        events.notify(&AuthFailure::External("401".to_string()));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_notify_without_listeners_is_fine() {
        AuthEvents::new().notify(&AuthFailure::RefreshFailed("x".to_string()));
    }
}
