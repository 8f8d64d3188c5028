use serde::{Deserialize, Serialize};
use std::fmt;

/// The product an account was opened for.
///
/// The persisted form is the configured product code; this enum is what the
/// business rules branch on once a code has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    Savings,
    Checking,
    FixedTerm,
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProductKind::Savings => "SAVINGS",
            ProductKind::Checking => "CHECKING",
            ProductKind::FixedTerm => "FIXED_TERM",
        })
    }
}

/// Customer class, derived from the length of the customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerKind {
    /// Individual; implicitly the sole holder of the account.
    Personal,
    /// Organization; must name its holders explicitly.
    Business,
}

impl fmt::Display for CustomerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CustomerKind::Personal => "PERSONAL",
            CustomerKind::Business => "BUSINESS",
        })
    }
}
