//! The persisted session snapshot.
//!
//! One JSON record stored under the fixed token-store key. Absence of any
//! required field invalidates the whole record, which callers treat as
//! "no session".

use crate::error::{SessionError, SessionResult};
use campus_commons::{Capability, Tenant, User};
use serde::{Deserialize, Serialize};

/// Access and refresh token strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Everything the session manager persists between application runs.
///
/// The permission list is written for wire compatibility, but restores
/// always recompute permissions from the user's role; the role is the
/// single source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: User,
    pub tenant: Tenant,
    pub permissions: Vec<Capability>,
    pub tokens: TokenPair,
    pub expires_at_ms: u64,
}

impl SessionSnapshot {
    /// Parse a snapshot from its stored JSON form.
    ///
    /// Fails on malformed JSON, missing fields, or empty token strings;
    /// callers discard the stored record in all of those cases.
    pub fn from_json(raw: &str) -> SessionResult<Self> {
        let snapshot: SessionSnapshot = serde_json::from_str(raw)
            .map_err(|e| SessionError::InvalidSnapshot(e.to_string()))?;
        if snapshot.tokens.access.is_empty() || snapshot.tokens.refresh.is_empty() {
            return Err(SessionError::InvalidSnapshot(
                "empty token in stored snapshot".to_string(),
            ));
        }
        Ok(snapshot)
    }

    /// Serialize for the token store.
    pub fn to_json(&self) -> SessionResult<String> {
        serde_json::to_string(self).map_err(|e| SessionError::Storage(e.to_string()))
    }
}
