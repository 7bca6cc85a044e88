//! GET /api/user-status — anonymous-or-authenticated UI state.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};

use notehub_core::{AuthContext, SessionAuthenticator};

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/user-status", get(user_status))
}

/// Report whether the request carries a live session. Public: the
/// anonymous answer is a valid answer.
async fn user_status(
    State(svc): State<AppState>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    match svc.context(&headers) {
        AuthContext::Authenticated(user) => Json(serde_json::json!({
            "loggedIn": true,
            "name": user.name,
        })),
        AuthContext::Anonymous => Json(serde_json::json!({
            "loggedIn": false,
        })),
    }
}
