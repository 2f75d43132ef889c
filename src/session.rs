//! Admin session: persisted token, login/logout lifecycle and the page gate.
//!
//! The session is hydrated once at start-up from a [`TokenStore`] (browser
//! `localStorage`, or memory off the browser) and installed on the backend as
//! the bearer token. Only administrators and content managers may sign in.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use admin_wire::{LoginRequest, LoginResponse, User};

use crate::backend::{fetch_json, to_body, ApiRequest, SharedBackend};
use crate::error::{ApiError, ValidationErrors};

pub const LOGIN_PATH: &str = "/web/auth/login";
pub const ME_PATH: &str = "/web/auth/me";

/// Stored sessions older than this are discarded on hydrate.
pub const SESSION_MAX_AGE_DAYS: i64 = 7;

pub const ACCESS_DENIED: &str = "You do not have permission to access this area.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub user: User,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.saved_at > Duration::days(SESSION_MAX_AGE_DAYS)
    }
}

/// A session write or removal the store could not carry out.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("could not {action} the stored session: {reason}")]
pub struct StoreError {
    pub action: &'static str,
    pub reason: String,
}

impl StoreError {
    pub fn new(action: &'static str, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
        }
    }
}

/// Where the session survives page reloads.
pub trait TokenStore {
    fn load(&self) -> Option<StoredSession>;
    fn save(&self, session: &StoredSession) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: RefCell<Option<StoredSession>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredSession> {
        self.session.borrow().clone()
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        *self.session.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.session.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    fn writable(action: &'static str) -> Result<web_sys::Storage, StoreError> {
        Self::storage().ok_or_else(|| StoreError::new(action, "localStorage is unavailable"))
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalStorageStore {
    fn load(&self) -> Option<StoredSession> {
        let raw = Self::storage()?.get_item(&self.key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored session");
                None
            }
        }
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        let storage = Self::writable("save")?;
        let raw = serde_json::to_string(session).map_err(|e| StoreError::new("save", e.to_string()))?;
        storage
            .set_item(&self.key, &raw)
            .map_err(|e| StoreError::new("save", format!("{:?}", e)))
    }

    fn clear(&self) -> Result<(), StoreError> {
        Self::writable("remove")?
            .remove_item(&self.key)
            .map_err(|e| StoreError::new("remove", format!("{:?}", e)))
    }
}

/// The store for the current platform.
pub fn default_store(key: &str) -> Rc<dyn TokenStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(LocalStorageStore::new(key))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        debug!(key, "Using in-memory session store");
        Rc::new(MemoryTokenStore::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Not hydrated yet
    Loading,
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// What the layout shell should render for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Loading,
    RedirectToLogin,
    Denied,
    Allowed,
}

pub fn gate(state: &SessionState) -> Gate {
    match state {
        SessionState::Loading => Gate::Loading,
        SessionState::Anonymous => Gate::RedirectToLogin,
        SessionState::Authenticated(user) if !user.role.can_administer() => Gate::Denied,
        SessionState::Authenticated(_) => Gate::Allowed,
    }
}

#[derive(Clone)]
pub struct AuthService {
    backend: SharedBackend,
    store: Rc<dyn TokenStore>,
}

impl AuthService {
    pub fn new(backend: SharedBackend, store: Rc<dyn TokenStore>) -> Self {
        Self { backend, store }
    }

    /// Restore a stored session and install its token.
    pub fn hydrate(&self, now: DateTime<Utc>) -> SessionState {
        match self.store.load() {
            Some(session) if session.is_expired(now) => {
                info!(saved_at = %session.saved_at, "Stored session expired");
                self.clear_store();
                self.backend.set_token(None);
                SessionState::Anonymous
            }
            Some(session) => {
                debug!(user = %session.user.id, "Hydrated session");
                self.backend.set_token(Some(session.access_token.clone()));
                SessionState::Authenticated(session.user)
            }
            None => {
                self.backend.set_token(None);
                SessionState::Anonymous
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let mut errors = ValidationErrors::new();
        errors.require("email", email, "Email");
        errors.require("password", password, "Password");
        errors.into_result()?;

        let body = to_body(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;
        let response: LoginResponse =
            fetch_json(self.backend.as_ref(), ApiRequest::post(LOGIN_PATH, body)).await?;

        if !response.user.role.can_administer() {
            warn!(user = %response.user.id, role = response.user.role.as_str(), "Sign-in refused for role");
            self.logout();
            return Err(ApiError::Backend {
                status: 403,
                message: ACCESS_DENIED.to_string(),
            });
        }

        self.save_store(&StoredSession {
            access_token: response.access_token.clone(),
            refresh_token: response.refresh_token,
            user: response.user.clone(),
            saved_at: Utc::now(),
        });
        self.backend.set_token(Some(response.access_token));
        info!(user = %response.user.id, role = response.user.role.as_str(), "Signed in");
        Ok(response.user)
    }

    pub fn logout(&self) {
        self.clear_store();
        self.backend.set_token(None);
        info!("Signed out");
    }

    /// Confirm the token with the backend. A 401 signs out (`Ok(None)`);
    /// other failures leave the hydrated session alone.
    pub async fn revalidate(&self) -> Result<Option<User>, ApiError> {
        match fetch_json::<User>(self.backend.as_ref(), ApiRequest::get(ME_PATH)).await {
            Ok(user) => {
                if let Some(mut session) = self.store.load() {
                    session.user = user.clone();
                    self.save_store(&session);
                }
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => {
                info!("Session rejected by backend");
                self.logout();
                Ok(None)
            }
            Err(e) => {
                debug!(error = %e, "Could not revalidate session");
                Err(e)
            }
        }
    }

    // The in-memory session carries on either way; only reload survival is lost.
    fn save_store(&self, session: &StoredSession) {
        if let Err(e) = self.store.save(session) {
            warn!(error = %e, "Session will not survive a reload");
        }
    }

    fn clear_store(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Stale session left in storage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use admin_wire::Role;
    use serde_json::json;

    fn service() -> (Rc<MockBackend>, Rc<MemoryTokenStore>, AuthService) {
        let backend = Rc::new(MockBackend::new());
        let store = Rc::new(MemoryTokenStore::default());
        let auth = AuthService::new(backend.clone(), store.clone());
        (backend, store, auth)
    }

    fn stored(role: Role, saved_at: DateTime<Utc>) -> StoredSession {
        StoredSession {
            access_token: "tok".into(),
            refresh_token: "ref".into(),
            user: User {
                id: "u1".into(),
                role,
                ..Default::default()
            },
            saved_at,
        }
    }

    #[tokio::test]
    async fn test_admin_login_persists_and_installs_token() {
        let (backend, store, auth) = service();
        backend.push_ok(json!({
            "accessToken": "jwt-1",
            "refreshToken": "r-1",
            "user": {"id": "u1", "email": "admin@test", "role": "Admin"}
        }));

        let user = auth.login("admin@test", "secret").await.unwrap();

        assert_eq!(user.role, Role::Admin);
        assert_eq!(backend.calls(), vec!["POST /web/auth/login"]);
        assert_eq!(backend.token().as_deref(), Some("jwt-1"));
        assert_eq!(store.load().unwrap().refresh_token, "r-1");
    }

    #[tokio::test]
    async fn test_student_login_is_refused() {
        let (backend, store, auth) = service();
        backend.push_ok(json!({
            "accessToken": "jwt-2",
            "user": {"id": "u2", "role": "Student"}
        }));

        let err = auth.login("student@test", "secret").await.unwrap_err();

        assert_eq!(err.user_message(), ACCESS_DENIED);
        assert!(store.load().is_none());
        assert!(backend.token().is_none());
    }

    #[tokio::test]
    async fn test_blank_credentials_skip_request() {
        let (backend, _, auth) = service();
        let err = auth.login("", "").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref v) if v.contains("email") && v.contains("password")));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_hydrate_fresh_and_expired() {
        let (backend, store, auth) = service();
        let now = Utc::now();

        store.save(&stored(Role::ContentManager, now - Duration::days(2))).unwrap();
        let state = auth.hydrate(now);
        assert!(matches!(state, SessionState::Authenticated(_)));
        assert_eq!(backend.token().as_deref(), Some("tok"));

        store.save(&stored(Role::Admin, now - Duration::days(8))).unwrap();
        assert_eq!(auth.hydrate(now), SessionState::Anonymous);
        assert!(store.load().is_none(), "expired session is discarded");
        assert!(backend.token().is_none());
    }

    #[tokio::test]
    async fn test_revalidate_401_logs_out_other_errors_keep_session() {
        let (backend, store, auth) = service();
        store.save(&stored(Role::Admin, Utc::now())).unwrap();
        auth.hydrate(Utc::now());

        backend.push_err(ApiError::Network("offline".into()));
        assert!(auth.revalidate().await.is_err());
        assert!(store.load().is_some());

        backend.push_err(ApiError::Backend {
            status: 401,
            message: String::new(),
        });
        assert_eq!(auth.revalidate().await.unwrap(), None);
        assert!(store.load().is_none());
        assert!(backend.token().is_none());
        assert_eq!(backend.calls(), vec!["GET /web/auth/me", "GET /web/auth/me"]);
    }

    struct FullStore;

    impl TokenStore for FullStore {
        fn load(&self) -> Option<StoredSession> {
            None
        }

        fn save(&self, _session: &StoredSession) -> Result<(), StoreError> {
            Err(StoreError::new("save", "QuotaExceededError"))
        }

        fn clear(&self) -> Result<(), StoreError> {
            Err(StoreError::new("remove", "SecurityError"))
        }
    }

    #[tokio::test]
    async fn test_storage_failures_do_not_break_sign_in_or_out() {
        let backend = Rc::new(MockBackend::new());
        let auth = AuthService::new(backend.clone(), Rc::new(FullStore));
        backend.push_ok(json!({
            "accessToken": "jwt-3",
            "user": {"id": "u3", "role": "Admin"}
        }));

        let user = auth.login("admin@test", "secret").await.unwrap();
        assert_eq!(user.id, "u3");
        assert_eq!(backend.token().as_deref(), Some("jwt-3"), "token installed despite the failed write");

        auth.logout();
        assert!(backend.token().is_none());
    }

    #[test]
    fn test_store_error_text() {
        let err = StoreError::new("save", "QuotaExceededError");
        assert_eq!(err.to_string(), "could not save the stored session: QuotaExceededError");
    }

    #[test]
    fn test_gate() {
        let admin = User {
            role: Role::Admin,
            ..Default::default()
        };
        let student = User::default();
        assert_eq!(gate(&SessionState::Loading), Gate::Loading);
        assert_eq!(gate(&SessionState::Anonymous), Gate::RedirectToLogin);
        assert_eq!(gate(&SessionState::Authenticated(student)), Gate::Denied);
        assert_eq!(gate(&SessionState::Authenticated(admin)), Gate::Allowed);
    }
}
