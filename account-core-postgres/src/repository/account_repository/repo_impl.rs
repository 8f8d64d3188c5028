use account_core_db::models::account::{AccountModel, HolderModel, SignatoryModel};
use crate::utils::{get_heapless_string, TryFromRow};
use sqlx::types::Json;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

pub struct AccountRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl AccountRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for AccountModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let holders: Option<Json<Vec<HolderModel>>> = row.try_get("holders")?;
        let signatories: Option<Json<Vec<SignatoryModel>>> = row.try_get("signatories")?;

        Ok(AccountModel {
            id: row.try_get("id")?,
            account_number: get_heapless_string(row, "account_number")?,
            product_id: get_heapless_string(row, "product_id")?,
            customer_id: get_heapless_string(row, "customer_id")?,
            available_balance: row.try_get("available_balance")?,
            create_date: row.try_get("create_date")?,
            modify_date: row.try_get("modify_date")?,
            holders: holders.map(|Json(holders)| holders),
            signatories: signatories.map(|Json(signatories)| signatories),
            antecedent_hash: row.try_get("antecedent_hash")?,
            hash: row.try_get("hash")?,
        })
    }
}
