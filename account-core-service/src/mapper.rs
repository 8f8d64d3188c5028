//! Conversion between wire DTOs and persistence models.

use account_core_api::domain::account::{AccountDto, HolderDto, SignatoryDto};
use account_core_api::error::{ApiError, ApiResult};
use account_core_db::models::account::{AccountModel, HolderModel, SignatoryModel};
use heapless::String as HeaplessString;
use uuid::Uuid;

/// Pure two-way mapping between [`AccountDto`] and [`AccountModel`].
pub trait AccountMapper: Send + Sync {
    fn model_to_dto(&self, model: &AccountModel) -> AccountDto;

    /// Build an unsaved model from a draft.
    ///
    /// # Returns
    /// * `Err(InvalidInput)` - If a required field is missing or a text field exceeds its stored width
    fn dto_to_model(&self, dto: &AccountDto) -> ApiResult<AccountModel>;
}

/// Field-for-field mapper.
///
/// Models produced by `dto_to_model` carry a nil id and zero hashes, which
/// marks them as not yet persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAccountMapper;

impl AccountMapper for DefaultAccountMapper {
    fn model_to_dto(&self, model: &AccountModel) -> AccountDto {
        AccountDto {
            account: Some(model.account_number.as_str().to_string()),
            product_id: Some(model.product_id.as_str().to_string()),
            customer_id: Some(model.customer_id.as_str().to_string()),
            available_balance: model.available_balance,
            create_date: Some(model.create_date),
            modify_date: model.modify_date,
            holders: model.holders.as_ref().map(|holders| {
                holders
                    .iter()
                    .map(|h| HolderDto::new(h.code.as_str(), h.name.as_str()))
                    .collect()
            }),
            signatories: model.signatories.as_ref().map(|signatories| {
                signatories
                    .iter()
                    .map(|s| SignatoryDto::new(s.code.as_str(), s.name.as_str()))
                    .collect()
            }),
        }
    }

    fn dto_to_model(&self, dto: &AccountDto) -> ApiResult<AccountModel> {
        let product_id = dto
            .product_id
            .as_deref()
            .ok_or_else(|| ApiError::InvalidInput("product id is required".to_string()))?;
        let customer_id = dto
            .customer_id
            .as_deref()
            .ok_or_else(|| ApiError::InvalidInput("customer id is required".to_string()))?;

        let holders = dto
            .holders
            .as_ref()
            .map(|holders| {
                holders
                    .iter()
                    .map(|h| {
                        Ok(HolderModel {
                            code: bounded("holder code", &h.code)?,
                            name: bounded("holder name", &h.name)?,
                        })
                    })
                    .collect::<ApiResult<Vec<_>>>()
            })
            .transpose()?;

        let signatories = dto
            .signatories
            .as_ref()
            .map(|signatories| {
                signatories
                    .iter()
                    .map(|s| {
                        Ok(SignatoryModel {
                            code: bounded("signatory code", &s.code)?,
                            name: bounded("signatory name", &s.name)?,
                        })
                    })
                    .collect::<ApiResult<Vec<_>>>()
            })
            .transpose()?;

        Ok(AccountModel {
            id: Uuid::nil(),
            account_number: bounded("account number", dto.account.as_deref().unwrap_or_default())?,
            product_id: bounded("product id", product_id)?,
            customer_id: bounded("customer id", customer_id)?,
            available_balance: dto.available_balance,
            create_date: dto.create_date.unwrap_or_default(),
            modify_date: dto.modify_date,
            holders,
            signatories,
            antecedent_hash: 0,
            hash: 0,
        })
    }
}

/// Copy `value` into a fixed-capacity string, rejecting input that does not fit.
pub(crate) fn bounded<const N: usize>(field: &str, value: &str) -> ApiResult<HeaplessString<N>> {
    HeaplessString::try_from(value)
        .map_err(|_| ApiError::InvalidInput(format!("{field} exceeds {N} bytes")))
}
