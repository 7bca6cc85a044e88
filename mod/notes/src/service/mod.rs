pub mod note;
pub mod review;
pub mod schema;

use std::sync::Arc;

use thiserror::Error;

use notehub_blob::BlobStore;
use notehub_sql::SQLStore;

/// Notes service error type.
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

impl From<NotesError> for notehub_core::ServiceError {
    fn from(e: NotesError) -> Self {
        use notehub_core::ServiceError;
        let msg = e.to_string();
        match e {
            NotesError::NotFound(_) => ServiceError::NotFound(msg),
            NotesError::Validation(_) => ServiceError::Validation(msg),
            NotesError::Storage(_) => ServiceError::Storage(msg),
            NotesError::Internal(_) => ServiceError::Internal(msg),
        }
    }
}

/// The notes service. Holds the SQL store for catalog rows and the blob
/// store for uploaded files.
pub struct NotesService {
    pub(crate) sql: Arc<dyn SQLStore>,
    pub(crate) blob: Arc<dyn BlobStore>,
}

impl NotesService {
    /// Create a new NotesService, initializing the notes/reviews schema.
    pub fn new(
        sql: Arc<dyn SQLStore>,
        blob: Arc<dyn BlobStore>,
    ) -> Result<Arc<Self>, NotesError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql, blob }))
    }
}
