use notehub_sql::SQLStore;

use crate::service::NotesError;

/// Initialize the SQLite schema for notes and reviews.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), NotesError> {
    let statements = [
        // Notes table: one row per uploaded file.
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            subject TEXT NOT NULL,
            branch TEXT NOT NULL,
            filename TEXT NOT NULL,
            filepath TEXT NOT NULL,
            uploader_id INTEGER,
            FOREIGN KEY (uploader_id) REFERENCES users (id)
        )",
        "CREATE INDEX IF NOT EXISTS idx_notes_uploader ON notes(uploader_id)",

        // Reviews table: user_name is a snapshot, not a join.
        "CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            note_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            user_name TEXT NOT NULL,
            rating INTEGER NOT NULL,
            comment TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (note_id) REFERENCES notes (id),
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
        "CREATE INDEX IF NOT EXISTS idx_reviews_note ON reviews(note_id)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])
            .map_err(|e| NotesError::Storage(e.to_string()))?;
    }

    Ok(())
}
