pub mod repo_impl;
pub mod find_by_account_number;
pub mod find_all;
pub mod save;
pub mod delete_by_account_number;

pub use repo_impl::AccountRepositoryImpl;
