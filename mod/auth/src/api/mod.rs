mod account;
mod status;

use std::sync::Arc;

use axum::Router;

use crate::service::AuthService;

/// Shared state for auth routes.
pub type AppState = Arc<AuthService>;

/// Build the auth router.
///
/// Every route here is public: registration and login must be reachable
/// anonymously, and logout/user-status degrade gracefully without a
/// session.
pub fn build_router(svc: Arc<AuthService>) -> Router {
    Router::new()
        .merge(account::routes())
        .merge(status::routes())
        .with_state(svc)
}
