use async_trait::async_trait;

use crate::models::identifiable::Identifiable;
use crate::repository::error::RepositoryResult;

/// Repository trait for looking up an entity by its account number
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl FindByAccountNumber<AccountModel> for AccountRepositoryImpl {
///     async fn find_by_account_number(&self, account_number: &str) -> RepositoryResult<Option<AccountModel>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait FindByAccountNumber<T: Identifiable>: Send + Sync {
    /// Find an entity by its account number
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The found entity
    /// * `Ok(None)` - If no entity carries this account number
    /// * `Err` - An error if the query could not be executed
    async fn find_by_account_number(&self, account_number: &str) -> RepositoryResult<Option<T>>;
}
