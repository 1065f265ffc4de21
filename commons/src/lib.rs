//! # campus-commons
//!
//! Shared types and constants for the campus platform client crates.
//!
//! This crate provides the foundational vocabulary used across
//! `campus-link` and `campus-session`. It stays dependency-light
//! (serde only) to prevent circular dependency issues.
//!
//! ## Type-Safe Wrappers
//!
//! - `UserId` / `TenantId`: validated identifier wrappers
//! - `Role`: the fixed role enumeration issued by the backend
//! - `Capability`: one `resource:action` permission grant, with the
//!   wildcard `*:manage` as a distinguished variant
//!
//! ## Example Usage
//!
//! ```rust
//! use campus_commons::{Capability, Role, Tenant};
//!
//! let role = Role::Teacher;
//! assert_eq!(role.as_str(), "teacher");
//!
//! let cap: Capability = "grades:update".parse().unwrap();
//! assert_eq!(cap.to_string(), "grades:update");
//!
//! let tenant = Tenant::from_host("northside.campushq.io");
//! assert_eq!(tenant.subdomain, "northside");
//! ```

pub mod capability;
pub mod constants;
pub mod ids;
pub mod portal;
pub mod role;
pub mod tenant;
pub mod user;

// Re-export commonly used types at crate root
pub use capability::{Action, Capability, CapabilityParseError};
pub use constants::AuthConstants;
pub use ids::{IdValidationError, TenantId, UserId};
pub use portal::PortalType;
pub use role::Role;
pub use tenant::Tenant;
pub use user::User;
