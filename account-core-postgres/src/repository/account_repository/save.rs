use async_trait::async_trait;
use account_core_db::models::account::AccountModel;
use account_core_db::repository::{RepositoryError, RepositoryResult, Save};
use sqlx::types::Json;

use crate::utils::map_sqlx_error;

use super::repo_impl::AccountRepositoryImpl;

impl AccountRepositoryImpl {
    pub(super) async fn insert_impl(&self, mut item: AccountModel) -> RepositoryResult<AccountModel> {
        item.antecedent_hash = 0;
        item.hash = item.compute_hash().map_err(RepositoryError::Serialization)?;

        sqlx::query(
            r#"
            INSERT INTO account
            (id, account_number, product_id, customer_id, available_balance, create_date,
             modify_date, holders, signatories, antecedent_hash, hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(item.id)
        .bind(item.account_number.as_str())
        .bind(item.product_id.as_str())
        .bind(item.customer_id.as_str())
        .bind(item.available_balance)
        .bind(item.create_date)
        .bind(item.modify_date)
        .bind(item.holders.as_ref().map(Json))
        .bind(item.signatories.as_ref().map(Json))
        .bind(item.antecedent_hash)
        .bind(item.hash)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, item.account_number.as_str()))?;

        Ok(item)
    }

    pub(super) async fn update_impl(&self, mut item: AccountModel) -> RepositoryResult<AccountModel> {
        let previous_hash = item.hash;

        let computed_hash = item.compute_hash().map_err(RepositoryError::Serialization)?;
        if computed_hash == previous_hash {
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM account WHERE account_number = $1)",
            )
            .bind(item.account_number.as_str())
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, item.account_number.as_str()))?;

            if !exists {
                tracing::warn!(
                    account_number = item.account_number.as_str(),
                    "unchanged account no longer stored"
                );
                return Err(RepositoryError::ConcurrentUpdate(
                    item.account_number.as_str().to_string(),
                ));
            }
            return Ok(item);
        }

        item.antecedent_hash = previous_hash;
        item.hash = 0;
        item.hash = item.compute_hash().map_err(RepositoryError::Serialization)?;

        let rows_affected = sqlx::query(
            r#"
            UPDATE account SET
            product_id = $2, customer_id = $3, available_balance = $4, modify_date = $5,
            holders = $6, signatories = $7, antecedent_hash = $8, hash = $9
            WHERE account_number = $1 AND hash = $10
            "#,
        )
        .bind(item.account_number.as_str())
        .bind(item.product_id.as_str())
        .bind(item.customer_id.as_str())
        .bind(item.available_balance)
        .bind(item.modify_date)
        .bind(item.holders.as_ref().map(Json))
        .bind(item.signatories.as_ref().map(Json))
        .bind(item.antecedent_hash)
        .bind(item.hash)
        .bind(previous_hash)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, item.account_number.as_str()))?
        .rows_affected();

        if rows_affected == 0 {
            tracing::warn!(
                account_number = item.account_number.as_str(),
                "concurrent update detected"
            );
            return Err(RepositoryError::ConcurrentUpdate(
                item.account_number.as_str().to_string(),
            ));
        }

        Ok(item)
    }
}

#[async_trait]
impl Save<AccountModel> for AccountRepositoryImpl {
    async fn save(&self, item: AccountModel) -> RepositoryResult<AccountModel> {
        if item.is_new() {
            self.insert_impl(item).await
        } else {
            self.update_impl(item).await
        }
    }
}
