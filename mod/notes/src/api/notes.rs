//! GET /api/notes, GET /api/notes/{id}, POST /upload.

use axum::extract::{Extension, Multipart, Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use notehub_core::{ListParams, ServiceError, SessionUser};

use crate::api::AppState;
use crate::model::UploadNote;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_notes))
        .route("/api/notes/{id}", get(get_note))
        .route("/upload", post(upload))
}

async fn list_notes(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.list_notes(&params).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn get_note(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let note = svc.get_note(id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(note).unwrap()))
}

/// Handle POST /upload — multipart form with title/subject/branch and a
/// `noteFile` part. On success the client is sent back to the notes
/// view; the catalog row is committed before the redirect leaves.
async fn upload(
    State(svc): State<AppState>,
    Extension(user): Extension<SessionUser>,
    mut multipart: Multipart,
) -> Result<Response, ServiceError> {
    let mut title = String::new();
    let mut subject = String::new();
    let mut branch = String::new();
    let mut original_filename = String::new();
    let mut data: Vec<u8> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Validation(e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| ServiceError::Validation(e.to_string()))?;
            }
            "subject" => {
                subject = field
                    .text()
                    .await
                    .map_err(|e| ServiceError::Validation(e.to_string()))?;
            }
            "branch" => {
                branch = field
                    .text()
                    .await
                    .map_err(|e| ServiceError::Validation(e.to_string()))?;
            }
            "noteFile" => {
                original_filename = field
                    .file_name()
                    .unwrap_or("note.bin")
                    .to_string();
                data = field
                    .bytes()
                    .await
                    .map_err(|e| ServiceError::Validation(e.to_string()))?
                    .to_vec();
            }
            _ => {}
        }
    }

    let input = UploadNote {
        title,
        subject,
        branch,
        original_filename,
        data,
    };
    svc.upload_note(input, &user).map_err(ServiceError::from)?;

    Ok(Redirect::to("/notes.html").into_response())
}
