use serde::{Deserialize, Serialize};

/// A review left on a note.
///
/// `user_name` is a display-name snapshot taken at review time, not a
/// live join against the users table.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: i64,
    pub note_id: i64,
    pub user_id: i64,
    pub user_name: String,
    /// Star rating, 1–5.
    pub rating: i64,
    pub comment: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for POST /api/notes/{id}/reviews.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub rating: i64,
    pub comment: String,
}
