//! Main campus-link client with builder pattern.
//!
//! Provides the [`AuthApi`] trait consumed by the session layer and its
//! HTTP implementation, [`CampusLinkClient`].

use crate::{
    auth::AuthProvider,
    error::{CampusLinkError, Result},
    models::{LoginRequest, LoginResponse, RefreshRequest, TokenGrant},
    timeouts::CampusLinkTimeouts,
};
use campus_commons::User;
use serde::de::DeserializeOwned;

/// The backend auth endpoints the session subsystem consumes.
///
/// `CampusLinkClient` is the production implementation; tests substitute a
/// scripted mock. Exact request/response shapes are owned by the backend;
/// this trait only promises what the session layer needs: a user with an
/// id and role, plus access/refresh token strings.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a user and a token pair.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// Best-effort server-side session invalidation.
    async fn logout(&self, access_token: &str) -> Result<()>;

    /// Fetch the user the access token belongs to. Used to validate a
    /// restored session.
    async fn current_user(&self, access_token: &str) -> Result<User>;

    /// Exchange a refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant>;
}

/// HTTP client for the campus backend auth endpoints.
///
/// Use [`CampusLinkClient::builder`] to construct instances.
///
/// # Examples
///
/// ```rust,no_run
/// use campus_link::CampusLinkClient;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CampusLinkClient::builder()
///     .base_url("https://northside.campushq.io")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CampusLinkClient {
    base_url: String,
    http_client: reqwest::Client,
    timeouts: CampusLinkTimeouts,
}

impl CampusLinkClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> CampusLinkClientBuilder {
        CampusLinkClientBuilder::new()
    }

    /// The configured timeouts.
    pub fn timeouts(&self) -> &CampusLinkTimeouts {
        &self.timeouts
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a response to a parsed body or the appropriate error class:
    /// 401/403 are authentication failures, other non-2xx are server
    /// errors.
    async fn handle_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| CampusLinkError::Serialization(e.to_string()));
        }
        Err(Self::status_error(status, response).await)
    }

    async fn handle_empty(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::status_error(status, response).await)
    }

    async fn status_error(status: reqwest::StatusCode, response: reqwest::Response) -> CampusLinkError {
        let message = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            CampusLinkError::Authentication(if message.is_empty() {
                status.to_string()
            } else {
                message
            })
        } else {
            CampusLinkError::Server {
                status_code: status.as_u16(),
                message,
            }
        }
    }
}

#[async_trait::async_trait]
impl AuthApi for CampusLinkClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response = self
            .http_client
            .post(self.url("/api/v1/auth/login"))
            .json(request)
            .send()
            .await?;
        Self::handle_json(response).await
    }

    async fn logout(&self, access_token: &str) -> Result<()> {
        let request = self.http_client.post(self.url("/api/v1/auth/logout"));
        let request = AuthProvider::bearer_token(access_token).apply_to_request(request)?;
        let response = request.send().await?;
        Self::handle_empty(response).await
    }

    async fn current_user(&self, access_token: &str) -> Result<User> {
        let request = self.http_client.get(self.url("/api/v1/auth/me"));
        let request = AuthProvider::bearer_token(access_token).apply_to_request(request)?;
        let response = request.send().await?;
        Self::handle_json(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self
            .http_client
            .post(self.url("/api/v1/auth/token/refresh"))
            .json(&body)
            .send()
            .await?;
        Self::handle_json(response).await
    }
}

/// Builder for [`CampusLinkClient`].
#[derive(Debug, Default)]
pub struct CampusLinkClientBuilder {
    base_url: Option<String>,
    timeouts: Option<CampusLinkTimeouts>,
}

impl CampusLinkClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend base URL, e.g. `https://northside.campushq.io`. Required.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the default timeouts.
    pub fn timeouts(mut self, timeouts: CampusLinkTimeouts) -> Self {
        self.timeouts = Some(timeouts);
        self
    }

    pub fn build(self) -> Result<CampusLinkClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| CampusLinkError::Configuration("base_url is required".to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CampusLinkError::Configuration(format!(
                "base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }
        let timeouts = self.timeouts.unwrap_or_default();
        let http_client = reqwest::Client::builder()
            .connect_timeout(timeouts.connection_timeout)
            .timeout(timeouts.request_timeout)
            .build()
            .map_err(|e| CampusLinkError::Configuration(e.to_string()))?;
        log::debug!("campus-link client configured for {}", base_url);
        Ok(CampusLinkClient {
            base_url,
            http_client,
            timeouts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_base_url() {
        let err = CampusLinkClient::builder().build().unwrap_err();
        assert!(matches!(err, CampusLinkError::Configuration(_)));
    }

    #[test]
    fn test_builder_rejects_non_http_url() {
        let err = CampusLinkClient::builder()
            .base_url("northside.campushq.io")
            .build()
            .unwrap_err();
        assert!(matches!(err, CampusLinkError::Configuration(_)));
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = CampusLinkClient::builder()
            .base_url("http://localhost:8000/")
            .build()
            .unwrap();
        assert_eq!(client.url("/api/v1/auth/login"), "http://localhost:8000/api/v1/auth/login");
    }
}
