//! Tunables for the account rules.
//!
//! Defaults mirror the values the service has always shipped with; every
//! setting can be overridden through an `ACCOUNT_*` environment variable.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_PERSONAL_CUSTOMER_ID_LENGTH: &str = "ACCOUNT_PERSONAL_CUSTOMER_ID_LENGTH";
pub const ENV_BUSINESS_CUSTOMER_ID_LENGTH: &str = "ACCOUNT_BUSINESS_CUSTOMER_ID_LENGTH";
pub const ENV_MIN_DEPOSIT_AMOUNT: &str = "ACCOUNT_MIN_DEPOSIT_AMOUNT";
pub const ENV_MAX_DEPOSIT_AMOUNT: &str = "ACCOUNT_MAX_DEPOSIT_AMOUNT";
pub const ENV_MIN_WITHDRAWAL_AMOUNT: &str = "ACCOUNT_MIN_WITHDRAWAL_AMOUNT";
pub const ENV_MAX_WITHDRAWAL_AMOUNT: &str = "ACCOUNT_MAX_WITHDRAWAL_AMOUNT";
pub const ENV_SAVINGS_PRODUCT_CODE: &str = "ACCOUNT_SAVINGS_PRODUCT_CODE";
pub const ENV_CHECKING_PRODUCT_CODE: &str = "ACCOUNT_CHECKING_PRODUCT_CODE";
pub const ENV_FIXED_TERM_PRODUCT_CODE: &str = "ACCOUNT_FIXED_TERM_PRODUCT_CODE";
pub const ENV_ATM_ACCOUNT_NUMBER: &str = "ACCOUNT_ATM_ACCOUNT_NUMBER";

/// Stored width of the customer id, in bytes.
pub const CUSTOMER_ID_WIDTH: usize = 20;
/// Stored width of a product code, in bytes.
pub const PRODUCT_CODE_WIDTH: usize = 20;
/// Stored width of an account number, in bytes.
pub const ACCOUNT_NUMBER_WIDTH: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Inconsistent settings: {0}")]
    Inconsistent(String),
}

/// Product identifier codes accepted on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCodes {
    pub savings: String,
    pub checking: String,
    pub fixed_term: String,
}

impl Default for ProductCodes {
    fn default() -> Self {
        Self {
            savings: "SAVINGS".to_string(),
            checking: "CHECKING".to_string(),
            fixed_term: "FIXED_TERM".to_string(),
        }
    }
}

/// Inclusive amount bounds for one kind of balance movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountLimits {
    pub min: Decimal,
    pub max: Decimal,
}

impl AmountLimits {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Whether `amount` lies within `[min, max]`
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min && amount <= self.max
    }
}

/// Business-rule settings for the account manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSettings {
    /// Customer-id length, in bytes, that identifies a personal customer.
    pub personal_customer_id_length: usize,

    /// Customer-id length, in bytes, that identifies a business customer.
    pub business_customer_id_length: usize,

    pub deposit_limits: AmountLimits,

    pub withdrawal_limits: AmountLimits,

    pub product_codes: ProductCodes,

    /// Reserved account number used for ATM-originated operations.
    pub atm_account_number: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            personal_customer_id_length: 8,
            business_customer_id_length: 11,
            deposit_limits: AmountLimits::new(Decimal::ONE, Decimal::from(3000)),
            withdrawal_limits: AmountLimits::new(Decimal::ONE, Decimal::from(3000)),
            product_codes: ProductCodes::default(),
            atm_account_number: "0000000000000001".to_string(),
        }
    }
}

impl AccountSettings {
    /// Build settings from the process environment, falling back to the
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let settings = Self {
            personal_customer_id_length: parse_or(
                &lookup,
                ENV_PERSONAL_CUSTOMER_ID_LENGTH,
                defaults.personal_customer_id_length,
            )?,
            business_customer_id_length: parse_or(
                &lookup,
                ENV_BUSINESS_CUSTOMER_ID_LENGTH,
                defaults.business_customer_id_length,
            )?,
            deposit_limits: AmountLimits::new(
                parse_or(&lookup, ENV_MIN_DEPOSIT_AMOUNT, defaults.deposit_limits.min)?,
                parse_or(&lookup, ENV_MAX_DEPOSIT_AMOUNT, defaults.deposit_limits.max)?,
            ),
            withdrawal_limits: AmountLimits::new(
                parse_or(&lookup, ENV_MIN_WITHDRAWAL_AMOUNT, defaults.withdrawal_limits.min)?,
                parse_or(&lookup, ENV_MAX_WITHDRAWAL_AMOUNT, defaults.withdrawal_limits.max)?,
            ),
            product_codes: ProductCodes {
                savings: lookup(ENV_SAVINGS_PRODUCT_CODE).unwrap_or(defaults.product_codes.savings),
                checking: lookup(ENV_CHECKING_PRODUCT_CODE)
                    .unwrap_or(defaults.product_codes.checking),
                fixed_term: lookup(ENV_FIXED_TERM_PRODUCT_CODE)
                    .unwrap_or(defaults.product_codes.fixed_term),
            },
            atm_account_number: lookup(ENV_ATM_ACCOUNT_NUMBER)
                .unwrap_or(defaults.atm_account_number),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the account rules cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.personal_customer_id_length == 0 || self.business_customer_id_length == 0 {
            return Err(ConfigError::Inconsistent(
                "customer id lengths must be greater than zero".to_string(),
            ));
        }
        if self.personal_customer_id_length > CUSTOMER_ID_WIDTH
            || self.business_customer_id_length > CUSTOMER_ID_WIDTH
        {
            return Err(ConfigError::Inconsistent(format!(
                "customer id lengths must not exceed {CUSTOMER_ID_WIDTH}"
            )));
        }
        if self.personal_customer_id_length == self.business_customer_id_length {
            return Err(ConfigError::Inconsistent(format!(
                "personal and business customer id lengths must differ (both {})",
                self.personal_customer_id_length
            )));
        }

        for (name, limits) in [
            ("deposit", &self.deposit_limits),
            ("withdrawal", &self.withdrawal_limits),
        ] {
            if limits.min.is_sign_negative() {
                return Err(ConfigError::Inconsistent(format!(
                    "minimum {name} amount must not be negative"
                )));
            }
            if limits.min > limits.max {
                return Err(ConfigError::Inconsistent(format!(
                    "minimum {name} amount {} exceeds maximum {}",
                    limits.min, limits.max
                )));
            }
        }

        let codes = &self.product_codes;
        if codes.savings.is_empty() || codes.checking.is_empty() || codes.fixed_term.is_empty() {
            return Err(ConfigError::Inconsistent(
                "product codes must not be empty".to_string(),
            ));
        }
        if [&codes.savings, &codes.checking, &codes.fixed_term]
            .iter()
            .any(|code| code.len() > PRODUCT_CODE_WIDTH)
        {
            return Err(ConfigError::Inconsistent(format!(
                "product codes must not exceed {PRODUCT_CODE_WIDTH} bytes"
            )));
        }
        if codes.savings == codes.checking
            || codes.savings == codes.fixed_term
            || codes.checking == codes.fixed_term
        {
            return Err(ConfigError::Inconsistent(
                "product codes must be distinct".to_string(),
            ));
        }

        if self.atm_account_number.trim().is_empty() {
            return Err(ConfigError::Inconsistent(
                "ATM account number must not be blank".to_string(),
            ));
        }
        if self.atm_account_number.len() > ACCOUNT_NUMBER_WIDTH {
            return Err(ConfigError::Inconsistent(format!(
                "ATM account number must not exceed {ACCOUNT_NUMBER_WIDTH} bytes"
            )));
        }

        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}
