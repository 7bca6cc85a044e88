//! POST /register, POST /login, GET /logout.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use notehub_core::auth::{clear_session_cookie, cookie_value, session_cookie};
use notehub_core::ServiceError;

use crate::api::AppState;
use crate::model::{LoginRequest, RegisterRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

/// Handle POST /register.
///
/// Hashing is CPU-bound, so the service call runs on the blocking pool
/// instead of stalling the async workers.
async fn register(
    State(svc): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let task_svc = Arc::clone(&svc);
    tokio::task::spawn_blocking(move || task_svc.register(input))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?
        .map_err(ServiceError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "registration successful, you can now log in",
        })),
    ))
}

/// Handle POST /login.
///
/// On success the session cookie is set and the client is sent to the
/// notes view. The store write (session entry) completes before the
/// response leaves.
async fn login(
    State(svc): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Response, ServiceError> {
    let task_svc = Arc::clone(&svc);
    let (_user, token) = tokio::task::spawn_blocking(move || task_svc.login(input))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?
        .map_err(ServiceError::from)?;

    let cookie = session_cookie(svc.cookie_name(), &token);
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/notes.html")).into_response())
}

/// Handle GET /logout.
///
/// Destroying an already-gone session is fine; the cookie is cleared
/// either way and the client lands back on the public page.
async fn logout(State(svc): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_value(&headers, svc.cookie_name()) {
        svc.logout(&token);
    }
    let cookie = clear_session_cookie(svc.cookie_name());
    ([(SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}
