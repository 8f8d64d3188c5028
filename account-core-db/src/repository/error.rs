use thiserror::Error;

/// Failures reported by a record store.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A unique constraint rejected the write; carries the colliding key
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// The stored version no longer matches the one the caller loaded
    #[error("Concurrent update detected for {0}")]
    ConcurrentUpdate(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
