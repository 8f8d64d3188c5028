use async_trait::async_trait;

use crate::models::identifiable::Identifiable;
use crate::repository::error::RepositoryResult;

/// Repository trait for persisting a single entity
///
/// Entities that have never been persisted (hash of 0) are inserted; all
/// others are updated only if the stored hash still equals the one they were
/// loaded with. The store computes the new hash and returns the saved entity.
#[async_trait]
pub trait Save<T: Identifiable>: Send + Sync {
    /// Insert or update an entity
    ///
    /// # Returns
    /// * `Ok(T)` - The saved entity with its new hash
    /// * `Err(DuplicateKey)` - If an insert collides with an existing account number
    /// * `Err(ConcurrentUpdate)` - If an update found a different stored version
    async fn save(&self, item: T) -> RepositoryResult<T>;
}
