use uuid::Uuid;

/// Trait for entities that carry a surrogate UUID primary key
pub trait Identifiable {
    /// Returns the unique identifier of the entity
    fn get_id(&self) -> Uuid;
}
