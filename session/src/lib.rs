//! # campus-session
//!
//! Session, token storage, and authorization subsystem for the campus
//! platform client.
//!
//! This crate provides:
//! - [`TokenStore`]: persistent storage abstraction for the session snapshot
//! - [`permissions`]: the static role → capability table and [`PermissionSet`]
//! - [`SessionManager`]: owned, injectable authentication state with
//!   login / logout / refresh / restore
//! - [`RouteGuard`]: the authorization checkpoint evaluated before
//!   rendering a navigation target
//! - [`PermissionGate`]: conditional-render decisions driven by the
//!   permission set
//!
//! ## Security Philosophy
//!
//! - **UX, not enforcement**: the gate and guard hide what a user cannot
//!   use; the backend independently authorizes every mutating request.
//! - **Fail closed**: permission queries answer `false` whenever there is
//!   no valid session; they never panic and never throw.
//! - **Role determines permissions**: the permission set is always
//!   recomputed from the role via the static table, never trusted from
//!   persisted state.
//!
//! ## Architecture
//!
//! ```text
//! Route Guard / Permission Gate
//!          ↓ (views / permission sets)
//!    SessionManager ── AuthApi (campus-link) ──→ backend
//!          ↓
//!     TokenStore (file / memory)
//! ```

pub mod error;
pub mod events;
pub mod gate;
pub mod guard;
pub mod manager;
pub mod permissions;
pub mod snapshot;
pub mod store;

// Re-export main types
pub use error::{SessionError, SessionResult};
pub use events::{AuthFailure, AuthFailureCallback};
pub use gate::{GateMode, PermissionGate};
pub use guard::{RouteDecision, RouteGuard, RouteRequirements, SessionView};
pub use manager::{RestorePolicy, SessionManager, SessionManagerBuilder, SessionStatus};
pub use permissions::{has, role_grants, PermissionSet};
pub use snapshot::{SessionSnapshot, TokenPair};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
