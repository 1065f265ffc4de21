//! # campus-link
//!
//! Async REST client for the campus platform's authentication endpoints.
//!
//! Wraps the four backend calls the session subsystem consumes (login,
//! logout, current-user fetch, and token refresh) behind the [`AuthApi`]
//! trait so that consumers (and their tests) never depend on a live
//! backend.
//!
//! # Examples
//!
//! ```rust,no_run
//! use campus_link::{AuthApi, CampusLinkClient, LoginRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CampusLinkClient::builder()
//!     .base_url("https://northside.campushq.io")
//!     .build()?;
//!
//! let grant = client
//!     .login(&LoginRequest::new("ada@northside.edu", "hunter2"))
//!     .await?;
//! println!("logged in as {}", grant.user.display_name);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod timeouts;

pub use auth::AuthProvider;
pub use client::{AuthApi, CampusLinkClient, CampusLinkClientBuilder};
pub use error::{CampusLinkError, Result};
pub use models::{LoginRequest, LoginResponse, RefreshRequest, TokenGrant};
pub use timeouts::CampusLinkTimeouts;
