use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::account::AccountModel;
use crate::repository::delete_by_account_number::DeleteByAccountNumber;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::find_all::FindAll;
use crate::repository::find_by_account_number::FindByAccountNumber;
use crate::repository::save::Save;

/// Process-local account store keyed by account number.
///
/// Enforces the same contract as the PostgreSQL store: unique account numbers
/// on insert and hash-checked updates. Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository(Arc<RwLock<HashMap<String, AccountModel>>>);

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

#[async_trait]
impl FindByAccountNumber<AccountModel> for InMemoryAccountRepository {
    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> RepositoryResult<Option<AccountModel>> {
        Ok(self.0.read().get(account_number).cloned())
    }
}

impl FindAll<AccountModel> for InMemoryAccountRepository {
    fn find_all(&self) -> BoxStream<'_, RepositoryResult<AccountModel>> {
        let data = self.0.clone();

        // Snapshot on first poll so the scan reflects the store at read time.
        stream::once(async move {
            let mut accounts: Vec<AccountModel> = data.read().values().cloned().collect();
            accounts.sort_by(|a, b| {
                a.create_date
                    .cmp(&b.create_date)
                    .then_with(|| a.account_number.cmp(&b.account_number))
            });
            stream::iter(accounts.into_iter().map(Ok))
        })
        .flatten()
        .boxed()
    }
}

#[async_trait]
impl Save<AccountModel> for InMemoryAccountRepository {
    async fn save(&self, mut item: AccountModel) -> RepositoryResult<AccountModel> {
        let key = item.account_number.as_str().to_owned();
        let mut data = self.0.write();

        if item.is_new() {
            if data.contains_key(&key) {
                return Err(RepositoryError::DuplicateKey(key));
            }
            item.antecedent_hash = 0;
            item.hash = item.compute_hash().map_err(RepositoryError::Serialization)?;
            data.insert(key, item.clone());
            return Ok(item);
        }

        let previous_hash = item.hash;
        let stored_hash = match data.get(&key) {
            Some(stored) => stored.hash,
            None => return Err(RepositoryError::ConcurrentUpdate(key)),
        };

        let computed_hash = item.compute_hash().map_err(RepositoryError::Serialization)?;
        if computed_hash == previous_hash {
            return Ok(item);
        }
        if stored_hash != previous_hash {
            return Err(RepositoryError::ConcurrentUpdate(key));
        }

        item.antecedent_hash = previous_hash;
        item.hash = 0;
        item.hash = item.compute_hash().map_err(RepositoryError::Serialization)?;
        data.insert(key, item.clone());
        Ok(item)
    }
}

#[async_trait]
impl DeleteByAccountNumber for InMemoryAccountRepository {
    async fn delete_by_account_number(&self, account_number: &str) -> RepositoryResult<u64> {
        Ok(self.0.write().remove(account_number).map_or(0, |_| 1))
    }
}
