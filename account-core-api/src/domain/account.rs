use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// # Documentation
/// - Wire representation of a bank account exchanged with the transport layer
/// - `account` is only honoured on create when it carries the ATM sentinel; otherwise the server assigns it
/// - `holders` and `signatories` are only meaningful for business customers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub account: Option<String>,
    pub product_id: Option<String>,
    pub customer_id: Option<String>,
    #[serde(default)]
    pub available_balance: Decimal,
    pub create_date: Option<DateTime<Utc>>,
    pub modify_date: Option<DateTime<Utc>>,
    pub holders: Option<Vec<HolderDto>>,
    pub signatories: Option<Vec<SignatoryDto>>,
}

/// A named, coded party on a business account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HolderDto {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
}

impl HolderDto {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A person authorised to sign for a business account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignatoryDto {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
}

impl SignatoryDto {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
