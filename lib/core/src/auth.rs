//! Session authentication for the HTTP layer.
//!
//! The route layer does NOT depend on the auth module. It only knows
//! this trait. The concrete implementation is injected at router
//! construction time, so a protected router carries its guard from the
//! moment it is registered — there is no per-handler opt-in to forget.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::ServiceError;

/// Snapshot of the logged-in user attached to each authenticated request.
///
/// Denormalized from the users table at login time; protected handlers
/// read it from the request extensions instead of re-joining the store.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub name: String,
}

/// Authentication state of a request.
///
/// Routes that serve both states (user-status) match on this instead of
/// poking at an untyped session field.
#[derive(Debug, Clone)]
pub enum AuthContext {
    Anonymous,
    Authenticated(SessionUser),
}

/// Pluggable session authenticator.
///
/// The session token is read from the session cookie only, never from a
/// query string or body.
pub trait SessionAuthenticator: Send + Sync + 'static {
    /// Authenticate a request from its headers.
    fn authenticate(&self, headers: &HeaderMap) -> Result<SessionUser, ServiceError>;

    /// Non-failing variant for routes that serve both states.
    fn context(&self, headers: &HeaderMap) -> AuthContext {
        match self.authenticate(headers) {
            Ok(user) => AuthContext::Authenticated(user),
            Err(_) => AuthContext::Anonymous,
        }
    }
}

/// An authenticator that admits every request as the given user. Used
/// for testing.
pub struct AllowAll(pub SessionUser);

impl SessionAuthenticator for AllowAll {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<SessionUser, ServiceError> {
        Ok(self.0.clone())
    }
}

/// An authenticator that denies everything. Used for testing.
pub struct DenyAll;

impl SessionAuthenticator for DenyAll {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<SessionUser, ServiceError> {
        Err(ServiceError::Unauthorized("access denied".into()))
    }
}

/// Session-guard middleware.
///
/// Protected routers attach it with
/// `middleware::from_fn_with_state(authn, require_session)` when they are
/// built. On success the `SessionUser` is stored as an Extension for
/// handlers to access via `Extension<SessionUser>`; on failure the
/// middleware answers 401 and the handler never runs.
pub async fn require_session(
    State(authn): State<Arc<dyn SessionAuthenticator>>,
    mut req: Request,
    next: Next,
) -> Response {
    match authn.authenticate(req.headers()) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

/// Extract a cookie value from the Cookie header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        if let Some((k, v)) = pair.trim().split_once('=') {
            if k == name {
                return Some(v.to_string());
            }
        }
    }
    None
}

/// Set-Cookie value carrying a freshly minted session token.
pub fn session_cookie(name: &str, token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, token)
}

/// Set-Cookie value that clears the session cookie.
pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}
