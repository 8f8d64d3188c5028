use async_trait::async_trait;

use crate::repository::error::RepositoryResult;

/// Repository trait for deleting an entity by its account number
#[async_trait]
pub trait DeleteByAccountNumber: Send + Sync {
    /// Delete the entity carrying this account number
    ///
    /// # Returns
    /// * `Ok(u64)` - The number of records removed; 0 when nothing matched
    /// * `Err` - An error if the statement could not be executed
    async fn delete_by_account_number(&self, account_number: &str) -> RepositoryResult<u64>;
}
