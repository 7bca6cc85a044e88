mod notes;
mod reviews;

use std::sync::Arc;

use axum::middleware;
use axum::Router;

use notehub_core::auth::require_session;
use notehub_core::SessionAuthenticator;

use crate::service::NotesService;

/// Shared state for notes routes.
pub type AppState = Arc<NotesService>;

/// Build the notes router.
///
/// The session guard is layered over the whole router here, at
/// construction time. Handlers read the authenticated user from
/// `Extension<SessionUser>`; none of them can be reached without it.
pub fn build_router(svc: Arc<NotesService>, authn: Arc<dyn SessionAuthenticator>) -> Router {
    Router::new()
        .merge(notes::routes())
        .merge(reviews::routes())
        .layer(middleware::from_fn_with_state(authn, require_session))
        .with_state(svc)
}
