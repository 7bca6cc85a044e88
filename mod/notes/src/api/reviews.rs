//! GET/POST /api/notes/{id}/reviews.

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use notehub_core::{ServiceError, SessionUser};

use crate::api::AppState;
use crate::model::CreateReview;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/notes/{id}/reviews",
        get(list_reviews).post(create_review),
    )
}

async fn list_reviews(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let reviews = svc.list_reviews(id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "items": reviews })))
}

async fn create_review(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
    Extension(user): Extension<SessionUser>,
    Json(input): Json<CreateReview>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let review = svc
        .create_review(id, &user, input)
        .map_err(ServiceError::from)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(review).unwrap()),
    ))
}
