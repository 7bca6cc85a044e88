pub mod password;
pub mod schema;
pub mod session;
pub mod user;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use notehub_sql::SQLStore;

use crate::service::session::SessionStore;

/// Auth service error type.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    /// The normalized username already exists in the users table.
    #[error("this username is already registered")]
    DuplicateUsername,

    /// Login attempt for a username with no account.
    #[error("login failed: user not found")]
    UserNotFound,

    /// Login attempt with a wrong password.
    #[error("login failed: incorrect password")]
    IncorrectPassword,

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

impl From<AuthError> for notehub_core::ServiceError {
    fn from(e: AuthError) -> Self {
        use notehub_core::ServiceError;
        let msg = e.to_string();
        match e {
            AuthError::Validation(_) => ServiceError::Validation(msg),
            AuthError::DuplicateUsername => ServiceError::Conflict(msg),
            // Both login failures answer 401; the messages stay distinct.
            AuthError::UserNotFound | AuthError::IncorrectPassword => {
                ServiceError::Unauthorized(msg)
            }
            AuthError::Storage(_) => ServiceError::Storage(msg),
            AuthError::Internal(_) => ServiceError::Internal(msg),
        }
    }
}

/// Configuration for the auth service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Name of the session cookie.
    pub cookie_name: String,

    /// Session lifetime in seconds. Zero disables expiry.
    pub session_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "notehub_session".to_string(),
            session_ttl_secs: 86400, // 24h
        }
    }
}

/// The auth service. Owns the credential store handle and the session
/// table.
pub struct AuthService {
    pub(crate) sql: Arc<dyn SQLStore>,
    pub(crate) sessions: SessionStore,
    pub(crate) config: AuthConfig,
}

impl AuthService {
    /// Create a new AuthService, initializing the users schema. The
    /// session table starts empty and dies with the service.
    pub fn new(sql: Arc<dyn SQLStore>, config: AuthConfig) -> Result<Arc<Self>, AuthError> {
        schema::init_schema(sql.as_ref())?;
        let ttl = Duration::from_secs(config.session_ttl_secs);
        Ok(Arc::new(Self {
            sql,
            sessions: SessionStore::new(ttl),
            config,
        }))
    }

    /// Name of the session cookie this service reads and writes.
    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }
}
