//! Account number assignment.
//!
//! Numbers produced here are not checked for uniqueness; the store's unique
//! key on the account number is what rejects a collision.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Produces a fresh account number for a new account.
pub trait AccountNumberGenerator: Send + Sync {
    fn generate(&self, now: DateTime<Utc>) -> String;
}

/// Epoch milliseconds followed by the date as `yyyyMMdd`.
///
/// Two creates within the same millisecond receive the same number, so the
/// second one fails with a duplicate-account error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampAccountNumberGenerator;

impl AccountNumberGenerator for TimestampAccountNumberGenerator {
    fn generate(&self, now: DateTime<Utc>) -> String {
        format!("{}{}", now.timestamp_millis(), now.format("%Y%m%d"))
    }
}

/// Fourteen random digits followed by the date as `yyyyMMdd`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAccountNumberGenerator;

const RANDOM_DIGITS: usize = 14;

impl AccountNumberGenerator for RandomAccountNumberGenerator {
    fn generate(&self, now: DateTime<Utc>) -> String {
        let mut rng = rand::thread_rng();
        let digits: String = (0..RANDOM_DIGITS)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        format!("{digits}{}", now.format("%Y%m%d"))
    }
}
