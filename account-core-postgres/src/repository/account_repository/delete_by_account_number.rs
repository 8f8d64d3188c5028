use async_trait::async_trait;
use account_core_db::repository::{DeleteByAccountNumber, RepositoryResult};

use crate::utils::map_sqlx_error;

use super::repo_impl::AccountRepositoryImpl;

#[async_trait]
impl DeleteByAccountNumber for AccountRepositoryImpl {
    async fn delete_by_account_number(&self, account_number: &str) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM account WHERE account_number = $1")
            .bind(account_number)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, account_number))?;

        Ok(result.rows_affected())
    }
}
