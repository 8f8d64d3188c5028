pub mod identifiable;
pub mod account;

// Re-exports
pub use identifiable::*;
pub use account::*;
