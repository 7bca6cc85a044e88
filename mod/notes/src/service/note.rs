use chrono::Utc;

use notehub_core::{ListParams, ListResult, SessionUser};
use notehub_sql::{Row, Value};
use tracing::info;

use crate::model::{Note, UploadNote};
use crate::service::{NotesError, NotesService};

impl NotesService {
    /// Store an uploaded note file and its catalog row.
    ///
    /// The blob write happens first, then the row insert; both complete
    /// before this returns, so a success response always has the file
    /// and the catalog entry.
    pub fn upload_note(
        &self,
        input: UploadNote,
        uploader: &SessionUser,
    ) -> Result<Note, NotesError> {
        let title = input.title.trim().to_string();
        let subject = input.subject.trim().to_string();
        let branch = input.branch.trim().to_string();
        if title.is_empty() || subject.is_empty() || branch.is_empty() {
            return Err(NotesError::Validation(
                "title, subject and branch are required".into(),
            ));
        }
        if input.data.is_empty() {
            return Err(NotesError::Validation("note file is required".into()));
        }

        // Timestamp prefix keeps same-named uploads from clobbering each
        // other.
        let filename = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(&input.original_filename),
        );
        let filepath = format!("uploads/{}", filename);
        self.blob
            .put(&filepath, &input.data)
            .map_err(|e| NotesError::Storage(e.to_string()))?;

        let id = self
            .sql
            .insert(
                "INSERT INTO notes (title, subject, branch, filename, filepath, uploader_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &[
                    Value::Text(title.clone()),
                    Value::Text(subject.clone()),
                    Value::Text(branch.clone()),
                    Value::Text(filename.clone()),
                    Value::Text(filepath.clone()),
                    Value::Integer(uploader.id),
                ],
            )
            .map_err(|e| NotesError::Storage(e.to_string()))?;

        info!(note_id = id, uploader_id = uploader.id, "note uploaded");

        Ok(Note {
            id,
            title,
            subject,
            branch,
            filename,
            filepath,
            uploader_id: uploader.id,
        })
    }

    /// List catalog entries, newest first.
    pub fn list_notes(&self, params: &ListParams) -> Result<ListResult<Note>, NotesError> {
        let rows = self
            .sql
            .query(
                "SELECT id, title, subject, branch, filename, filepath, uploader_id
                 FROM notes ORDER BY id DESC LIMIT ?1 OFFSET ?2",
                &[
                    Value::Integer(params.limit as i64),
                    Value::Integer(params.offset as i64),
                ],
            )
            .map_err(|e| NotesError::Storage(e.to_string()))?;

        let items = rows
            .iter()
            .map(note_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let count_rows = self
            .sql
            .query("SELECT COUNT(*) AS n FROM notes", &[])
            .map_err(|e| NotesError::Storage(e.to_string()))?;
        let total = count_rows
            .first()
            .and_then(|r| r.get_i64("n"))
            .unwrap_or(0) as usize;

        Ok(ListResult { items, total })
    }

    /// Fetch one note by id.
    pub fn get_note(&self, id: i64) -> Result<Note, NotesError> {
        let rows = self
            .sql
            .query(
                "SELECT id, title, subject, branch, filename, filepath, uploader_id
                 FROM notes WHERE id = ?1",
                &[Value::Integer(id)],
            )
            .map_err(|e| NotesError::Storage(e.to_string()))?;

        rows.first()
            .map(note_from_row)
            .transpose()?
            .ok_or_else(|| NotesError::NotFound(format!("note {} not found", id)))
    }
}

/// Map a notes row into the model struct.
fn note_from_row(row: &Row) -> Result<Note, NotesError> {
    Ok(Note {
        id: row
            .get_i64("id")
            .ok_or_else(|| NotesError::Internal("notes row missing id".into()))?,
        title: row.get_str("title").unwrap_or_default().to_string(),
        subject: row.get_str("subject").unwrap_or_default().to_string(),
        branch: row.get_str("branch").unwrap_or_default().to_string(),
        filename: row.get_str("filename").unwrap_or_default().to_string(),
        filepath: row.get_str("filepath").unwrap_or_default().to_string(),
        uploader_id: row.get_i64("uploader_id").unwrap_or_default(),
    })
}

/// Keep blob keys tame: alphanumerics, dot, dash, underscore.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "note.bin".to_string()
    } else {
        cleaned
    }
}
