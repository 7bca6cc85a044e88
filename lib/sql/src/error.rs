use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    #[error("query error: {0}")]
    Query(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("connection error: {0}")]
    Connection(String),

    /// A table constraint (UNIQUE, NOT NULL, FK) rejected the statement.
    /// Callers that rely on store-level uniqueness match on this variant.
    #[error("constraint violation: {0}")]
    Constraint(String),
}
