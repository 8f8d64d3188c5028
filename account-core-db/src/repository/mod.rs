pub mod error;
pub mod find_by_account_number;
pub mod find_all;
pub mod save;
pub mod delete_by_account_number;
pub mod account_repository;
#[cfg(feature = "memory")]
pub mod in_memory;

// Re-exports
pub use error::*;
pub use find_by_account_number::*;
pub use find_all::*;
pub use save::*;
pub use delete_by_account_number::*;
pub use account_repository::*;
#[cfg(feature = "memory")]
pub use in_memory::*;
