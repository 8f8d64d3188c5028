use futures::stream::BoxStream;

use crate::models::identifiable::Identifiable;
use crate::repository::error::RepositoryResult;

/// Repository trait for scanning every stored entity
///
/// The returned stream is lazy: nothing is read from the store until it is
/// polled, and every call starts a new scan. Callers compose their own
/// filters on top of it, for instance with `TryStreamExt::try_filter`.
///
/// # Example
/// ```ignore
/// let savings = repo
///     .find_all()
///     .try_filter(|a| futures::future::ready(a.customer_id.as_str() == customer_id));
/// ```
pub trait FindAll<T: Identifiable>: Send + Sync {
    /// Stream all entities
    fn find_all(&self) -> BoxStream<'_, RepositoryResult<T>>;
}
