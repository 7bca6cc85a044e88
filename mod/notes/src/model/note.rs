use serde::Serialize;

/// A note catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: i64,

    pub title: String,

    /// Course/subject the note belongs to.
    pub subject: String,

    /// Study branch (department).
    pub branch: String,

    /// Stored file name, timestamped to keep uploads distinct.
    pub filename: String,

    /// Blob store key of the uploaded file.
    pub filepath: String,

    /// Id of the user who uploaded the note.
    pub uploader_id: i64,
}

/// Input for a note upload: the multipart metadata fields plus the file
/// bytes.
#[derive(Debug, Clone)]
pub struct UploadNote {
    pub title: String,
    pub subject: String,
    pub branch: String,
    pub original_filename: String,
    pub data: Vec<u8>,
}
