use thiserror::Error;

/// Caller-visible failures of the account operations.
///
/// Every variant is terminal: nothing is retried or suppressed inside the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A required field is missing or malformed, or a business rule rejected the request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A deposit or withdrawal amount fell outside the configured bounds.
    #[error("Limit violation: {0}")]
    LimitViolation(String),

    /// The withdrawal exceeds the available balance.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Duplicate account: {0}")]
    DuplicateAccount(String),

    /// The record changed between load and save.
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
