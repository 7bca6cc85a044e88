use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobError {
    #[error("io error: {0}")]
    Io(String),

    #[error("invalid blob key: {0}")]
    InvalidKey(String),
}
