//! Create-time validation.
//!
//! Steps run in a fixed order and the first failure is returned. Store scans
//! are awaited in sequence; nothing here blocks.

use account_core_api::config::{AccountSettings, ProductCodes};
use account_core_api::domain::account::AccountDto;
use account_core_api::error::{ApiError, ApiResult};
use account_core_db::models::account::{CustomerKind, ProductKind};
use account_core_db::repository::AccountRepository;
use futures::future;
use futures::stream::TryStreamExt;
use validator::Validate;

use crate::error::store_error;

/// Outcome of a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedDraft {
    pub product: ProductKind,
    pub customer: CustomerKind,
}

/// Resolve a product code against the configured codes.
pub fn resolve_product(codes: &ProductCodes, code: &str) -> Option<ProductKind> {
    if code == codes.savings {
        Some(ProductKind::Savings)
    } else if code == codes.checking {
        Some(ProductKind::Checking)
    } else if code == codes.fixed_term {
        Some(ProductKind::FixedTerm)
    } else {
        None
    }
}

/// Classify a customer by the byte length of its identifier.
pub fn classify_customer(settings: &AccountSettings, customer_id: &str) -> Option<CustomerKind> {
    let length = customer_id.len();
    if length == settings.personal_customer_id_length {
        Some(CustomerKind::Personal)
    } else if length == settings.business_customer_id_length {
        Some(CustomerKind::Business)
    } else {
        None
    }
}

pub struct CreateValidation<'a, R: ?Sized> {
    settings: &'a AccountSettings,
    repository: &'a R,
}

impl<'a, R> CreateValidation<'a, R>
where
    R: AccountRepository + ?Sized,
{
    pub fn new(settings: &'a AccountSettings, repository: &'a R) -> Self {
        Self {
            settings,
            repository,
        }
    }

    pub async fn validate(&self, draft: &AccountDto) -> ApiResult<ValidatedDraft> {
        let product = self.check_product(draft)?;
        let (customer_id, customer) = self.check_customer(draft)?;

        match customer {
            CustomerKind::Business => self.check_business(draft, product)?,
            CustomerKind::Personal => self.check_personal(draft, product, customer_id).await?,
        }

        Ok(ValidatedDraft { product, customer })
    }

    fn check_product(&self, draft: &AccountDto) -> ApiResult<ProductKind> {
        let codes = &self.settings.product_codes;
        draft
            .product_id
            .as_deref()
            .and_then(|code| resolve_product(codes, code))
            .ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "invalid product id, accepted values are {} (savings), {} (checking) and {} (fixed term)",
                    codes.savings, codes.checking, codes.fixed_term
                ))
            })
    }

    fn check_customer<'d>(&self, draft: &'d AccountDto) -> ApiResult<(&'d str, CustomerKind)> {
        let customer_id = draft
            .customer_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidInput("customer id is required".to_string()))?;

        let kind = classify_customer(self.settings, customer_id).ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "invalid customer id, expected a length of {} bytes for personal customers or {} for business customers",
                self.settings.personal_customer_id_length, self.settings.business_customer_id_length
            ))
        })?;

        Ok((customer_id, kind))
    }

    fn check_business(&self, draft: &AccountDto, product: ProductKind) -> ApiResult<()> {
        let holders = match draft.holders.as_deref() {
            Some(holders) if !holders.is_empty() => holders,
            _ => {
                return Err(ApiError::InvalidInput(
                    "business accounts require at least one holder".to_string(),
                ))
            }
        };

        if holders.iter().any(|h| h.validate().is_err()) {
            return Err(ApiError::InvalidInput(
                "every holder needs a code and a name".to_string(),
            ));
        }

        match product {
            ProductKind::Checking => Ok(()),
            ProductKind::Savings => Err(ApiError::InvalidInput(
                "business customers cannot open savings accounts".to_string(),
            )),
            ProductKind::FixedTerm => Err(ApiError::InvalidInput(
                "business customers cannot open fixed-term accounts".to_string(),
            )),
        }
    }

    async fn check_personal(
        &self,
        draft: &AccountDto,
        product: ProductKind,
        customer_id: &str,
    ) -> ApiResult<()> {
        if draft.holders.is_some() {
            return Err(ApiError::InvalidInput(
                "personal accounts cannot declare holders".to_string(),
            ));
        }
        if draft.signatories.is_some() {
            return Err(ApiError::InvalidInput(
                "personal accounts cannot declare signatories".to_string(),
            ));
        }

        let capped_code = match product {
            ProductKind::Savings => &self.settings.product_codes.savings,
            ProductKind::Checking => &self.settings.product_codes.checking,
            ProductKind::FixedTerm => return Ok(()),
        };

        if self.customer_holds(customer_id, capped_code).await? {
            tracing::debug!(customer_id, product = %product, "personal product already held");
            return Err(ApiError::InvalidInput(format!(
                "customer {customer_id} already holds an account with product {capped_code}"
            )));
        }

        Ok(())
    }

    /// Whether the store has an account for this customer and product code.
    async fn customer_holds(&self, customer_id: &str, product_code: &str) -> ApiResult<bool> {
        let mut matching = self.repository.find_all().try_filter(move |account| {
            future::ready(
                account.customer_id.as_str() == customer_id
                    && account.product_id.as_str() == product_code,
            )
        });

        Ok(matching.try_next().await.map_err(store_error)?.is_some())
    }
}
