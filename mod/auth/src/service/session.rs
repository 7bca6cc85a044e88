use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;

use notehub_core::auth::cookie_value;
use notehub_core::{new_id, ServiceError, SessionAuthenticator, SessionUser};
use tracing::debug;

use crate::model::LoginRequest;
use crate::service::{password, AuthError, AuthService};

/// A live session: the user snapshot taken at login time.
struct SessionEntry {
    user: SessionUser,
    created_at: Instant,
}

/// In-memory session table keyed by opaque token.
///
/// Sessions live only in process memory — a restart invalidates all of
/// them, which is acceptable for this service. The table is owned by the
/// auth service and handed to the guard through it; there is no
/// module-level singleton.
pub struct SessionStore {
    ttl: Duration,
    entries: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    /// Create an empty store. A zero `ttl` disables expiry.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Mint a session for a user and return the opaque token.
    pub fn create(&self, user: SessionUser) -> String {
        let token = new_id();
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            token.clone(),
            SessionEntry {
                user,
                created_at: Instant::now(),
            },
        );
        token
    }

    /// Resolve a token to its user snapshot. Expired entries are dropped
    /// lazily on lookup.
    pub fn lookup(&self, token: &str) -> Option<SessionUser> {
        {
            let entries = self.entries.read().unwrap();
            match entries.get(token) {
                Some(entry) if !self.expired(entry) => return Some(entry.user.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.entries.write().unwrap().remove(token);
        None
    }

    /// Destroy a session. Destroying an unknown or already-destroyed
    /// token is not an error.
    pub fn destroy(&self, token: &str) {
        self.entries.write().unwrap().remove(token);
    }

    /// Number of stored entries (expired-but-uncollected included).
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expired(&self, entry: &SessionEntry) -> bool {
        !self.ttl.is_zero() && entry.created_at.elapsed() >= self.ttl
    }
}

impl AuthService {
    /// Log a user in: verify credentials, then mint a session carrying
    /// the user snapshot.
    ///
    /// "User not found" and "incorrect password" stay distinct errors.
    /// Neither leaves a session behind.
    pub fn login(&self, input: LoginRequest) -> Result<(SessionUser, String), AuthError> {
        let user = self
            .find_by_username(&input.username)?
            .ok_or(AuthError::UserNotFound)?;

        if !password::verify_password(&input.password, &user.password_hash) {
            return Err(AuthError::IncorrectPassword);
        }

        let snapshot = SessionUser {
            id: user.id,
            username: user.username,
            name: user.name,
        };
        let token = self.sessions.create(snapshot.clone());
        debug!(user_id = snapshot.id, "session created");
        Ok((snapshot, token))
    }

    /// Destroy the session behind a token. Idempotent.
    pub fn logout(&self, token: &str) {
        self.sessions.destroy(token);
    }
}

impl SessionAuthenticator for AuthService {
    fn authenticate(&self, headers: &HeaderMap) -> Result<SessionUser, ServiceError> {
        let token = cookie_value(headers, &self.config.cookie_name)
            .ok_or_else(|| ServiceError::Unauthorized("not logged in".into()))?;
        self.sessions
            .lookup(&token)
            .ok_or_else(|| ServiceError::Unauthorized("session expired or invalid".into()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::header::COOKIE;
    use notehub_sql::{SQLStore, SqliteStore};

    use super::*;
    use crate::model::RegisterRequest;
    use crate::service::AuthConfig;

    fn test_service() -> Arc<AuthService> {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        AuthService::new(sql, AuthConfig::default()).unwrap()
    }

    fn register(svc: &AuthService, username: &str, name: &str, password: &str) {
        svc.register(RegisterRequest {
            username: username.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        })
        .unwrap();
    }

    fn login(svc: &AuthService, username: &str, password: &str) -> Result<(SessionUser, String), AuthError> {
        svc.login(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn cookie_headers(name: &str, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, format!("{}={}", name, token).parse().unwrap());
        headers
    }

    fn test_user(id: i64) -> SessionUser {
        SessionUser {
            id,
            username: format!("user{}", id),
            name: format!("User {}", id),
        }
    }

    // ── SessionStore ────────────────────────────────────────────────

    #[test]
    fn create_lookup_destroy() {
        let store = SessionStore::new(Duration::ZERO);
        let token = store.create(test_user(1));

        let user = store.lookup(&token).unwrap();
        assert_eq!(user.id, 1);

        store.destroy(&token);
        assert!(store.lookup(&token).is_none());

        // Destroying again is not an error.
        store.destroy(&token);
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_token_misses() {
        let store = SessionStore::new(Duration::ZERO);
        assert!(store.lookup("no-such-token").is_none());
    }

    #[test]
    fn tokens_are_unique_per_session() {
        let store = SessionStore::new(Duration::ZERO);
        let a = store.create(test_user(1));
        let b = store.create(test_user(1));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);

        // One user, many devices: destroying one leaves the other.
        store.destroy(&a);
        assert!(store.lookup(&b).is_some());
    }

    #[test]
    fn entries_expire_after_ttl() {
        let store = SessionStore::new(Duration::from_millis(10));
        let token = store.create(test_user(1));
        assert!(store.lookup(&token).is_some());

        std::thread::sleep(Duration::from_millis(30));
        assert!(store.lookup(&token).is_none());
        // The expired entry was collected on lookup.
        assert!(store.is_empty());
    }

    // ── Login/logout flow ───────────────────────────────────────────

    #[test]
    fn register_then_login_succeeds() {
        let svc = test_service();
        register(&svc, "alice", "Alice A", "pw1");

        let (user, token) = login(&svc, "alice", "pw1").unwrap();
        assert_eq!(user.name, "Alice A");
        assert!(!token.is_empty());

        // The session snapshot points at the registered row.
        let stored = svc.find_by_username("alice").unwrap().unwrap();
        assert_eq!(user.id, stored.id);
    }

    #[test]
    fn login_unknown_user_fails_without_session() {
        let svc = test_service();
        let err = login(&svc, "ghost", "pw").unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert_eq!(err.to_string(), "login failed: user not found");
        assert!(svc.sessions.is_empty());
    }

    #[test]
    fn login_wrong_password_fails_without_session() {
        let svc = test_service();
        register(&svc, "alice", "Alice A", "pw1");

        let err = login(&svc, "alice", "wrong").unwrap_err();
        assert!(matches!(err, AuthError::IncorrectPassword));
        assert_eq!(err.to_string(), "login failed: incorrect password");
        assert!(svc.sessions.is_empty());
    }

    #[test]
    fn authenticate_reads_the_session_cookie() {
        let svc = test_service();
        register(&svc, "alice", "Alice A", "pw1");
        let (_, token) = login(&svc, "alice", "pw1").unwrap();

        let headers = cookie_headers(svc.cookie_name(), &token);
        let user = svc.authenticate(&headers).unwrap();
        assert_eq!(user.username, "alice");

        // No cookie, bogus token: denied.
        assert!(svc.authenticate(&HeaderMap::new()).is_err());
        let bogus = cookie_headers(svc.cookie_name(), "forged-token");
        assert!(svc.authenticate(&bogus).is_err());
    }

    #[test]
    fn logout_invalidates_the_token() {
        let svc = test_service();
        register(&svc, "alice", "Alice A", "pw1");
        let (_, token) = login(&svc, "alice", "pw1").unwrap();

        svc.logout(&token);
        let headers = cookie_headers(svc.cookie_name(), &token);
        assert!(svc.authenticate(&headers).is_err());

        // Logging out twice is fine.
        svc.logout(&token);
    }

    #[test]
    fn full_account_lifecycle() {
        let svc = test_service();

        // Register alice.
        register(&svc, "alice", "Alice A", "pw1");

        // Re-register under different casing: duplicate.
        let err = svc
            .register(RegisterRequest {
                username: "ALICE".to_string(),
                name: "Alice B".to_string(),
                password: "pw2".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));

        // Correct login mints a session.
        let (user, token) = login(&svc, "alice", "pw1").unwrap();
        assert_eq!(svc.sessions.len(), 1);

        // Wrong password: no extra session.
        assert!(login(&svc, "alice", "wrong").is_err());
        assert_eq!(svc.sessions.len(), 1);

        // Logout, then the old token is dead.
        svc.logout(&token);
        let headers = cookie_headers(svc.cookie_name(), &token);
        assert!(svc.authenticate(&headers).is_err());
        assert!(svc.sessions.is_empty());

        // The account itself survives.
        assert_eq!(svc.find_by_username("alice").unwrap().unwrap().id, user.id);
    }
}
