use async_trait::async_trait;
use account_core_db::models::account::AccountModel;
use account_core_db::repository::{FindByAccountNumber, RepositoryError, RepositoryResult};

use crate::utils::{map_sqlx_error, TryFromRow};

use super::repo_impl::AccountRepositoryImpl;

impl AccountRepositoryImpl {
    pub(super) async fn find_by_account_number_impl(
        &self,
        account_number: &str,
    ) -> RepositoryResult<Option<AccountModel>> {
        let row = sqlx::query(
            r#"
            SELECT id, account_number, product_id, customer_id, available_balance, create_date,
                   modify_date, holders, signatories, antecedent_hash, hash
            FROM account
            WHERE account_number = $1
            "#,
        )
        .bind(account_number)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, account_number))?;

        row.map(|row| AccountModel::try_from_row(&row))
            .transpose()
            .map_err(RepositoryError::Database)
    }
}

#[async_trait]
impl FindByAccountNumber<AccountModel> for AccountRepositoryImpl {
    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> RepositoryResult<Option<AccountModel>> {
        self.find_by_account_number_impl(account_number).await
    }
}
