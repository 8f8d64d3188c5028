use account_core_db::models::account::AccountModel;
use account_core_db::repository::{FindAll, RepositoryError, RepositoryResult};
use futures::stream::{BoxStream, StreamExt};

use crate::utils::{map_sqlx_error, TryFromRow};

use super::repo_impl::AccountRepositoryImpl;

const SELECT_ALL_ACCOUNTS: &str = "SELECT id, account_number, product_id, customer_id, \
    available_balance, create_date, modify_date, holders, signatories, antecedent_hash, hash \
    FROM account ORDER BY create_date, account_number";

impl FindAll<AccountModel> for AccountRepositoryImpl {
    fn find_all(&self) -> BoxStream<'_, RepositoryResult<AccountModel>> {
        sqlx::query(SELECT_ALL_ACCOUNTS)
            .fetch(&*self.pool)
            .map(|row| {
                let row = row.map_err(|e| map_sqlx_error(e, "account"))?;
                AccountModel::try_from_row(&row).map_err(RepositoryError::Database)
            })
            .boxed()
    }
}
