use account_core_api::error::ApiError;
use account_core_db::repository::RepositoryError;

/// Translate a store failure into the caller-visible error taxonomy.
pub fn store_error(err: RepositoryError) -> ApiError {
    match err {
        RepositoryError::DuplicateKey(key) => {
            ApiError::DuplicateAccount(format!("an account with number {key} already exists"))
        }
        RepositoryError::ConcurrentUpdate(key) => ApiError::ConcurrentModification(format!(
            "account {key} was modified by another request, reload and retry"
        )),
        other => ApiError::DatabaseError(other.to_string()),
    }
}
