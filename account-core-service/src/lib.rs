pub mod account_number;
pub mod clock;
pub mod error;
pub mod manager;
pub mod mapper;
pub mod validation;

pub use account_number::{AccountNumberGenerator, RandomAccountNumberGenerator, TimestampAccountNumberGenerator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::AccountManager;
pub use mapper::{AccountMapper, DefaultAccountMapper};

#[cfg(test)]
pub mod test_utils;
