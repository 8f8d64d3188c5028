#[allow(clippy::module_inception)]
pub mod account;
pub mod holder;
pub mod common_enums;

pub use account::AccountModel;
pub use holder::{HolderModel, SignatoryModel};
pub use common_enums::{CustomerKind, ProductKind};
