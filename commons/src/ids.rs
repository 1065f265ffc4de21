//! Type-safe wrappers for user and tenant identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for identifier validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdValidationError(pub String);

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a string.
            ///
            /// # Panics
            /// Panics if the identifier is empty. Use `try_new()` for
            /// fallible creation.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self::try_new(id).expect(concat!($label, " cannot be empty"))
            }

            /// Creates a new identifier, returning an error if validation fails.
            pub fn try_new(id: impl Into<String>) -> Result<Self, IdValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(IdValidationError(
                        concat!($label, " cannot be empty").to_string(),
                    ));
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner String.
            #[inline]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Type-safe wrapper for user identifiers.
    ///
    /// Ensures user IDs cannot be accidentally used where tenant IDs are
    /// expected.
    UserId,
    "User ID"
);

string_id!(
    /// Type-safe wrapper for tenant identifiers.
    TenantId,
    "Tenant ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_round_trip() {
        let id = UserId::new("user_123");
        assert_eq!(id.as_str(), "user_123");
        assert_eq!(id.to_string(), "user_123");
        assert_eq!(id.clone().into_string(), "user_123");
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(UserId::try_new("").is_err());
        assert!(TenantId::try_new("").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id = TenantId::new("northside");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"northside\"");
        let back: TenantId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
