//! Timeout configuration for campus-link operations.

use std::time::Duration;

/// Timeout configuration for campus-link HTTP operations.
///
/// # Examples
///
/// ```rust
/// use campus_link::CampusLinkTimeouts;
/// use std::time::Duration;
///
/// // Use defaults (recommended for most cases)
/// let timeouts = CampusLinkTimeouts::default();
///
/// // Custom timeouts for high-latency environments
/// let timeouts = CampusLinkTimeouts::builder()
///     .connection_timeout(Duration::from_secs(60))
///     .request_timeout(Duration::from_secs(120))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CampusLinkTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connection_timeout: Duration,

    /// Total timeout for a request/response round trip.
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl Default for CampusLinkTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl CampusLinkTimeouts {
    /// Create a new builder for custom timeout configuration.
    pub fn builder() -> CampusLinkTimeoutsBuilder {
        CampusLinkTimeoutsBuilder::new()
    }

    /// Timeouts optimized for fast local development.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// Builder for [`CampusLinkTimeouts`].
#[derive(Debug, Default)]
pub struct CampusLinkTimeoutsBuilder {
    connection_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl CampusLinkTimeoutsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = Some(timeout);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> CampusLinkTimeouts {
        let defaults = CampusLinkTimeouts::default();
        CampusLinkTimeouts {
            connection_timeout: self.connection_timeout.unwrap_or(defaults.connection_timeout),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        }
    }
}
