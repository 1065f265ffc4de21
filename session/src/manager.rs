//! The session manager: owned, injectable authentication state.
//!
//! One instance exists per application; consumers receive it explicitly
//! (clones share the same state) rather than through a hidden global.
//!
//! State machine:
//!
//! ```text
//! ANONYMOUS → AUTHENTICATING → AUTHENTICATED → (REFRESHING → AUTHENTICATED | ANONYMOUS)
//!                   ↓ failure                          ↓ logout
//!               ANONYMOUS  ←──────────────────────────┘
//! ```
//!
//! Concurrency: a single tokio mutex serializes `refresh()` so at most one
//! exchange is ever in flight: followers await the gate and observe the
//! refreshed expiry instead of racing their own call. A generation counter
//! bumped on logout/login discards responses that arrive for a session
//! that no longer exists.

use crate::error::{SessionError, SessionResult};
use crate::events::{AuthEvents, AuthFailure, AuthFailureCallback};
use crate::guard::SessionView;
use crate::permissions::{role_grants, PermissionSet};
use crate::snapshot::{SessionSnapshot, TokenPair};
use crate::store::TokenStore;
use campus_commons::{AuthConstants, Capability, Tenant, User};
use campus_link::{AuthApi, CampusLinkError, LoginRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current time in millis since Unix epoch.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// What to do when background validation of a restored session is
/// rejected by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestorePolicy {
    /// Keep the restored session and only log the failure. Matches the
    /// historical "stay logged in offline" behavior.
    #[default]
    KeepOffline,
    /// Clear the session and snapshot, and emit an auth failure.
    ClearOnFailure,
}

/// Observable lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Authenticating,
    Authenticated,
    Refreshing,
}

/// A live authenticated session.
#[derive(Debug, Clone)]
struct ActiveSession {
    user: User,
    tenant: Tenant,
    permissions: PermissionSet,
    tokens: TokenPair,
    expires_at_ms: u64,
}

impl ActiveSession {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            tenant: self.tenant.clone(),
            permissions: self.permissions.to_vec(),
            tokens: self.tokens.clone(),
            expires_at_ms: self.expires_at_ms,
        }
    }

    fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        // Permissions are always recomputed from the role; the persisted
        // list is wire compatibility only.
        let permissions = role_grants(snapshot.user.role).clone();
        ActiveSession {
            user: snapshot.user,
            tenant: snapshot.tenant,
            permissions,
            tokens: snapshot.tokens,
            expires_at_ms: snapshot.expires_at_ms,
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at_ms <= now_ms()
    }

    fn refresh_due(&self) -> bool {
        let lookahead_ms = AuthConstants::REFRESH_LOOKAHEAD_SECS * 1000;
        self.expires_at_ms <= now_ms() + lookahead_ms
    }
}

enum SessionState {
    Anonymous,
    /// Login in flight. The prior session, if any, is restored on failure.
    Authenticating { prior: Option<Box<ActiveSession>> },
    Authenticated(ActiveSession),
    Refreshing(ActiveSession),
}

impl SessionState {
    fn active(&self) -> Option<&ActiveSession> {
        match self {
            SessionState::Authenticated(a) | SessionState::Refreshing(a) => Some(a),
            _ => None,
        }
    }

    fn status(&self) -> SessionStatus {
        match self {
            SessionState::Anonymous => SessionStatus::Anonymous,
            SessionState::Authenticating { .. } => SessionStatus::Authenticating,
            SessionState::Authenticated(_) => SessionStatus::Authenticated,
            SessionState::Refreshing(_) => SessionStatus::Refreshing,
        }
    }
}

struct ManagerInner {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
    tenant: Tenant,
    restore_policy: RestorePolicy,
    state: RwLock<SessionState>,
    /// Bumped on logout and successful login; in-flight responses from an
    /// older generation are discarded.
    generation: AtomicU64,
    /// Serializes refresh exchanges (single-flight).
    refresh_gate: tokio::sync::Mutex<()>,
    events: AuthEvents,
}

/// Owned authentication state for the current application instance.
///
/// Cheap to clone; clones share the same state, so background tasks and
/// UI consumers can each hold one.
///
/// # Examples
///
/// ```rust,no_run
/// use campus_commons::Tenant;
/// use campus_link::CampusLinkClient;
/// use campus_session::{FileTokenStore, SessionManager};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CampusLinkClient::builder()
///     .base_url("https://northside.campushq.io")
///     .build()?;
/// let manager = SessionManager::builder()
///     .api(Arc::new(client))
///     .store(Arc::new(FileTokenStore::new("~/.campus")))
///     .tenant(Tenant::from_host("northside.campushq.io"))
///     .build()?;
///
/// manager.initialize().await?;
/// if !manager.is_authenticated() {
///     manager.login("ada@northside.edu", "hunter2").await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<ManagerInner>,
}

impl SessionManager {
    /// Create a new builder.
    pub fn builder() -> SessionManagerBuilder {
        SessionManagerBuilder::new()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.state.read().unwrap()
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.state.write().unwrap()
    }

    fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    fn bump_generation(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Persist a snapshot; storage failures are logged, never fatal.
    fn persist(&self, snapshot: &SessionSnapshot) {
        let result = snapshot.to_json().and_then(|json| self.inner.store.set(&json));
        if let Err(e) = result {
            log::warn!("failed to persist session snapshot: {}", e);
        }
    }

    fn clear_persisted(&self) {
        if let Err(e) = self.inner.store.remove() {
            log::warn!("failed to remove session snapshot: {}", e);
        }
    }

    // ── Lifecycle operations ────────────────────────────────────────────

    /// Restore a persisted session, if one exists and is structurally
    /// valid, then validate it against the backend in the background.
    ///
    /// Restoration is optimistic: the session becomes usable immediately,
    /// and a failed validation is handled per the configured
    /// [`RestorePolicy`]. A backend that is merely unreachable never
    /// clears a restored session. Initialization failures degrade to the
    /// anonymous state instead of blocking startup.
    pub async fn initialize(&self) -> SessionResult<()> {
        let raw = match self.inner.store.get() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(()),
            Err(e) => {
                log::warn!("token store unreadable, starting anonymous: {}", e);
                return Ok(());
            }
        };

        let snapshot = match SessionSnapshot::from_json(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::debug!("discarding persisted session: {}", e);
                self.clear_persisted();
                return Ok(());
            }
        };

        let active = ActiveSession::from_snapshot(snapshot);
        let access_token = active.tokens.access.clone();
        let user_id = active.user.id.clone();
        *self.write_state() = SessionState::Authenticated(active);
        let generation = self.generation();

        // Best-effort revalidation; the restored session stays usable
        // while this runs.
        let manager = self.clone();
        tokio::spawn(async move {
            match manager.inner.api.current_user(&access_token).await {
                Ok(_) => {
                    log::debug!("restored session validated for user {}", user_id);
                }
                Err(e) if e.is_authentication() => match manager.inner.restore_policy {
                    RestorePolicy::KeepOffline => {
                        log::warn!("restored session failed validation, keeping it: {}", e);
                    }
                    RestorePolicy::ClearOnFailure => {
                        if manager.generation() == generation {
                            *manager.write_state() = SessionState::Anonymous;
                            manager.clear_persisted();
                            manager
                                .inner
                                .events
                                .notify(&AuthFailure::ValidationFailed(e.to_string()));
                        }
                    }
                },
                Err(e) => {
                    log::debug!("session validation skipped, backend unreachable: {}", e);
                }
            }
        });

        Ok(())
    }

    /// Exchange credentials for a new session.
    ///
    /// On failure the previous session (if any) is left exactly as it
    /// was and the error surfaces to the caller; on success the session
    /// is replaced wholesale and the snapshot persisted.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<User> {
        if email.is_empty() || password.is_empty() {
            return Err(SessionError::Credential(
                "email and password are required".to_string(),
            ));
        }

        let generation = self.generation();
        {
            let mut state = self.write_state();
            let prior = match std::mem::replace(&mut *state, SessionState::Anonymous) {
                SessionState::Authenticated(a) | SessionState::Refreshing(a) => Some(Box::new(a)),
                SessionState::Authenticating { prior } => prior,
                SessionState::Anonymous => None,
            };
            *state = SessionState::Authenticating { prior };
        }

        let request =
            LoginRequest::new(email, password).with_tenant(self.inner.tenant.subdomain.clone());
        match self.inner.api.login(&request).await {
            Ok(response) => {
                let user = response.user.clone();
                let tenant = response.tenant.unwrap_or_else(|| self.inner.tenant.clone());
                let active = ActiveSession {
                    permissions: role_grants(user.role).clone(),
                    user: response.user,
                    tenant,
                    tokens: TokenPair {
                        access: response.access_token,
                        refresh: response.refresh_token,
                    },
                    expires_at_ms: now_ms() + response.expires_in * 1000,
                };
                let snapshot = active.snapshot();
                {
                    let mut state = self.write_state();
                    if self.generation() != generation {
                        // A logout won the race; stay logged out.
                        log::debug!("discarding login response for a superseded session");
                        return Err(SessionError::Cancelled);
                    }
                    *state = SessionState::Authenticated(active);
                }
                self.bump_generation();
                self.persist(&snapshot);
                Ok(user)
            }
            Err(e) => {
                {
                    let mut state = self.write_state();
                    if self.generation() == generation {
                        match std::mem::replace(&mut *state, SessionState::Anonymous) {
                            SessionState::Authenticating { prior: Some(prior) } => {
                                *state = SessionState::Authenticated(*prior);
                            }
                            SessionState::Authenticating { prior: None } => {}
                            // An overlapping login already settled the
                            // state; leave it as it is.
                            other => *state = other,
                        }
                    }
                }
                Err(match e {
                    CampusLinkError::Authentication(msg) => SessionError::Credential(msg),
                    other => SessionError::Api(other),
                })
            }
        }
    }

    /// End the session.
    ///
    /// The backend invalidation call is best-effort: transport failures
    /// are logged and swallowed, and local state plus the persisted
    /// snapshot are cleared regardless. A logout that overlaps an
    /// in-flight refresh wins; the late response is discarded.
    pub async fn logout(&self) {
        self.bump_generation();
        let access_token = {
            let mut state = self.write_state();
            let access = state.active().map(|a| a.tokens.access.clone());
            *state = SessionState::Anonymous;
            access
        };
        self.clear_persisted();

        if let Some(token) = access_token {
            if let Err(e) = self.inner.api.logout(&token).await {
                log::warn!("server-side logout failed (ignored): {}", e);
            }
        }
    }

    /// Exchange the refresh token for a new access token when expiry is
    /// within the five-minute lookahead window (or already past).
    ///
    /// Serialized: concurrent callers share one backend exchange. A
    /// terminal failure makes the session unrecoverable: state goes
    /// anonymous, the snapshot is removed, and an auth failure is
    /// broadcast.
    pub async fn refresh(&self) -> SessionResult<()> {
        let _gate = self.inner.refresh_gate.lock().await;

        // Re-check under the gate: a follower arriving after the leader
        // finished sees the extended expiry and returns without its own
        // exchange.
        let (refresh_token, generation) = {
            let state = self.read_state();
            match &*state {
                SessionState::Authenticated(a) if a.refresh_due() => {
                    (a.tokens.refresh.clone(), self.generation())
                }
                SessionState::Authenticated(_) => return Ok(()),
                _ => return Err(SessionError::NotAuthenticated),
            }
        };

        {
            let mut state = self.write_state();
            match std::mem::replace(&mut *state, SessionState::Anonymous) {
                SessionState::Authenticated(a) => *state = SessionState::Refreshing(a),
                other => {
                    // Logout or re-login slipped in between the two locks.
                    *state = other;
                    return Err(SessionError::Cancelled);
                }
            }
        }

        match self.inner.api.refresh(&refresh_token).await {
            Ok(grant) => {
                let mut state = self.write_state();
                if self.generation() != generation {
                    log::debug!("discarding refresh response for a superseded session");
                    return Err(SessionError::Cancelled);
                }
                match std::mem::replace(&mut *state, SessionState::Anonymous) {
                    SessionState::Refreshing(mut active) => {
                        active.tokens.access = grant.access_token;
                        if let Some(refresh_token) = grant.refresh_token {
                            active.tokens.refresh = refresh_token;
                        }
                        active.expires_at_ms = now_ms() + grant.expires_in * 1000;
                        let snapshot = active.snapshot();
                        *state = SessionState::Authenticated(active);
                        drop(state);
                        self.persist(&snapshot);
                        Ok(())
                    }
                    other => {
                        *state = other;
                        Err(SessionError::Cancelled)
                    }
                }
            }
            Err(e) => {
                {
                    let mut state = self.write_state();
                    if self.generation() != generation {
                        return Err(SessionError::Cancelled);
                    }
                    *state = SessionState::Anonymous;
                }
                self.clear_persisted();
                self.inner
                    .events
                    .notify(&AuthFailure::RefreshFailed(e.to_string()));
                Err(SessionError::Api(e))
            }
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Current lifecycle phase.
    pub fn status(&self) -> SessionStatus {
        self.read_state().status()
    }

    /// Whether a session exists and its expiry is still in the future.
    /// An expired session answers `false` until a refresh succeeds.
    pub fn is_authenticated(&self) -> bool {
        self.read_state()
            .active()
            .map(|a| !a.is_expired())
            .unwrap_or(false)
    }

    /// The authenticated user, if any (expired sessions included, since
    /// the identity is still known).
    pub fn current_user(&self) -> Option<User> {
        self.read_state().active().map(|a| a.user.clone())
    }

    /// The active tenant: the session's once authenticated, the
    /// host-derived one otherwise.
    pub fn tenant(&self) -> Tenant {
        self.read_state()
            .active()
            .map(|a| a.tenant.clone())
            .unwrap_or_else(|| self.inner.tenant.clone())
    }

    /// The access token for authorizing API calls, when a valid session
    /// exists.
    pub fn access_token(&self) -> Option<String> {
        let state = self.read_state();
        state
            .active()
            .filter(|a| !a.is_expired())
            .map(|a| a.tokens.access.clone())
    }

    /// The current permission set; empty whenever there is no valid
    /// session, so every downstream check fails closed.
    pub fn permissions(&self) -> PermissionSet {
        let state = self.read_state();
        state
            .active()
            .filter(|a| !a.is_expired())
            .map(|a| a.permissions.clone())
            .unwrap_or_default()
    }

    /// Set-membership test against the current session. `false` without a
    /// valid session; never panics.
    pub fn has_permission(&self, cap: &Capability) -> bool {
        self.permissions().contains(cap)
    }

    /// True when at least one capability is held.
    pub fn has_any(&self, caps: &[Capability]) -> bool {
        self.permissions().any(caps)
    }

    /// True when every capability is held.
    pub fn has_all(&self, caps: &[Capability]) -> bool {
        self.permissions().all(caps)
    }

    /// Snapshot for the route guard; `None` without a valid session.
    pub fn view(&self) -> Option<SessionView> {
        let state = self.read_state();
        state.active().filter(|a| !a.is_expired()).map(|a| SessionView {
            user_id: a.user.id.clone(),
            role: a.user.role,
            portal: a.user.role.portal_type(),
            permissions: a.permissions.clone(),
        })
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Register a listener for authentication failures (failed refresh,
    /// rejected validation, or an external 401 broadcast).
    pub fn on_auth_failure(&self, callback: impl Fn(&AuthFailure) + Send + Sync + 'static) {
        self.inner.events.subscribe(Arc::new(callback));
    }

    /// Broadcast an authentication failure observed outside this crate,
    /// e.g. an unrecoverable 401 from a data endpoint.
    pub fn notify_auth_failure(&self, reason: impl Into<String>) {
        self.inner
            .events
            .notify(&AuthFailure::External(reason.into()));
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("status", &self.status())
            .field("tenant", &self.inner.tenant.subdomain)
            .finish()
    }
}

/// Builder for [`SessionManager`].
#[derive(Default)]
pub struct SessionManagerBuilder {
    api: Option<Arc<dyn AuthApi>>,
    store: Option<Arc<dyn TokenStore>>,
    tenant: Option<Tenant>,
    restore_policy: RestorePolicy,
    callbacks: Vec<AuthFailureCallback>,
}

impl SessionManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend client. Required.
    pub fn api(mut self, api: Arc<dyn AuthApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Snapshot storage. Required.
    pub fn store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Active tenant, usually [`Tenant::from_host`]. Defaults to the demo
    /// tenant.
    pub fn tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(tenant);
        self
    }

    /// Policy for restored sessions that fail backend validation.
    pub fn restore_policy(mut self, policy: RestorePolicy) -> Self {
        self.restore_policy = policy;
        self
    }

    /// Register an auth-failure listener at construction time.
    pub fn on_auth_failure(
        mut self,
        callback: impl Fn(&AuthFailure) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.push(Arc::new(callback));
        self
    }

    pub fn build(self) -> SessionResult<SessionManager> {
        let api = self.api.ok_or_else(|| {
            SessionError::Api(CampusLinkError::Configuration(
                "SessionManager requires an AuthApi".to_string(),
            ))
        })?;
        let store = self.store.ok_or_else(|| {
            SessionError::Api(CampusLinkError::Configuration(
                "SessionManager requires a TokenStore".to_string(),
            ))
        })?;
        let events = AuthEvents::new();
        for callback in self.callbacks {
            events.subscribe(callback);
        }
        Ok(SessionManager {
            inner: Arc::new(ManagerInner {
                api,
                store,
                tenant: self.tenant.unwrap_or_else(Tenant::demo),
                restore_policy: self.restore_policy,
                state: RwLock::new(SessionState::Anonymous),
                generation: AtomicU64::new(0),
                refresh_gate: tokio::sync::Mutex::new(()),
                events,
            }),
        })
    }
}
