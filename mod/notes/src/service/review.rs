use notehub_core::{now_rfc3339, SessionUser};
use notehub_sql::{Row, Value};
use tracing::info;

use crate::model::{CreateReview, Review};
use crate::service::{NotesError, NotesService};

impl NotesService {
    /// Reviews for a note, newest first.
    pub fn list_reviews(&self, note_id: i64) -> Result<Vec<Review>, NotesError> {
        let rows = self
            .sql
            .query(
                "SELECT id, note_id, user_id, user_name, rating, comment, created_at
                 FROM reviews WHERE note_id = ?1 ORDER BY created_at DESC",
                &[Value::Integer(note_id)],
            )
            .map_err(|e| NotesError::Storage(e.to_string()))?;

        rows.iter().map(review_from_row).collect()
    }

    /// Attach a review to an existing note, stamped with the reviewer's
    /// id and display-name snapshot.
    pub fn create_review(
        &self,
        note_id: i64,
        user: &SessionUser,
        input: CreateReview,
    ) -> Result<Review, NotesError> {
        if !(1..=5).contains(&input.rating) {
            return Err(NotesError::Validation(
                "rating must be between 1 and 5".into(),
            ));
        }
        let comment = input.comment.trim().to_string();
        if comment.is_empty() {
            return Err(NotesError::Validation("comment is required".into()));
        }

        // The FK is declared but SQLite leaves it unenforced by default;
        // check the note exists so reviews cannot dangle.
        self.get_note(note_id)?;

        let created_at = now_rfc3339();
        let id = self
            .sql
            .insert(
                "INSERT INTO reviews (note_id, user_id, user_name, rating, comment, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &[
                    Value::Integer(note_id),
                    Value::Integer(user.id),
                    Value::Text(user.name.clone()),
                    Value::Integer(input.rating),
                    Value::Text(comment.clone()),
                    Value::Text(created_at.clone()),
                ],
            )
            .map_err(|e| NotesError::Storage(e.to_string()))?;

        info!(review_id = id, note_id, user_id = user.id, "review added");

        Ok(Review {
            id,
            note_id,
            user_id: user.id,
            user_name: user.name.clone(),
            rating: input.rating,
            comment,
            created_at,
        })
    }
}

/// Map a reviews row into the model struct.
fn review_from_row(row: &Row) -> Result<Review, NotesError> {
    Ok(Review {
        id: row
            .get_i64("id")
            .ok_or_else(|| NotesError::Internal("reviews row missing id".into()))?,
        note_id: row.get_i64("note_id").unwrap_or_default(),
        user_id: row.get_i64("user_id").unwrap_or_default(),
        user_name: row.get_str("user_name").unwrap_or_default().to_string(),
        rating: row.get_i64("rating").unwrap_or_default(),
        comment: row.get_str("comment").unwrap_or_default().to_string(),
        created_at: row.get_str("created_at").unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use notehub_blob::{BlobStore, FileStore};
    use notehub_sql::{SQLStore, SqliteStore};

    use super::*;
    use crate::model::UploadNote;

    fn test_service() -> (Arc<NotesService>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let blob: Arc<dyn BlobStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        (NotesService::new(sql, blob).unwrap(), dir)
    }

    fn reviewer(id: i64, name: &str) -> SessionUser {
        SessionUser {
            id,
            username: name.to_lowercase(),
            name: name.to_string(),
        }
    }

    fn seed_note(svc: &NotesService) -> i64 {
        svc.upload_note(
            UploadNote {
                title: "Week 1".to_string(),
                subject: "Math".to_string(),
                branch: "CS".to_string(),
                original_filename: "notes.pdf".to_string(),
                data: b"x".to_vec(),
            },
            &reviewer(1, "Alice"),
        )
        .unwrap()
        .id
    }

    fn review_input(rating: i64, comment: &str) -> CreateReview {
        CreateReview {
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn create_review_stamps_the_reviewer() {
        let (svc, _dir) = test_service();
        let note_id = seed_note(&svc);

        let review = svc
            .create_review(note_id, &reviewer(2, "Bob"), review_input(4, "solid notes"))
            .unwrap();
        assert_eq!(review.note_id, note_id);
        assert_eq!(review.user_id, 2);
        assert_eq!(review.user_name, "Bob");
        assert_eq!(review.rating, 4);
    }

    #[test]
    fn reviews_list_newest_first() {
        let (svc, _dir) = test_service();
        let note_id = seed_note(&svc);

        // created_at must differ for the ordering assertion.
        svc.create_review(note_id, &reviewer(2, "Bob"), review_input(3, "ok"))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        svc.create_review(note_id, &reviewer(3, "Cara"), review_input(5, "great"))
            .unwrap();

        let reviews = svc.list_reviews(note_id).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].user_name, "Cara");
        assert_eq!(reviews[1].user_name, "Bob");
    }

    #[test]
    fn review_on_missing_note_is_not_found() {
        let (svc, _dir) = test_service();
        assert!(matches!(
            svc.create_review(999, &reviewer(2, "Bob"), review_input(4, "x")),
            Err(NotesError::NotFound(_))
        ));
    }

    #[test]
    fn review_validation() {
        let (svc, _dir) = test_service();
        let note_id = seed_note(&svc);

        assert!(matches!(
            svc.create_review(note_id, &reviewer(2, "Bob"), review_input(0, "x")),
            Err(NotesError::Validation(_))
        ));
        assert!(matches!(
            svc.create_review(note_id, &reviewer(2, "Bob"), review_input(6, "x")),
            Err(NotesError::Validation(_))
        ));
        assert!(matches!(
            svc.create_review(note_id, &reviewer(2, "Bob"), review_input(3, "   ")),
            Err(NotesError::Validation(_))
        ));
    }

    #[test]
    fn reviews_for_note_without_reviews_is_empty() {
        let (svc, _dir) = test_service();
        let note_id = seed_note(&svc);
        assert!(svc.list_reviews(note_id).unwrap().is_empty());
    }
}
