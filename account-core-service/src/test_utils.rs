#[cfg(test)]
pub mod test_utils {
    use std::sync::Arc;

    use account_core_api::config::AccountSettings;
    use account_core_api::domain::account::{AccountDto, HolderDto};
    use account_core_db::models::account::AccountModel;
    use account_core_db::repository::{
        DeleteByAccountNumber, FindAll, FindByAccountNumber, InMemoryAccountRepository,
        RepositoryResult, Save,
    };
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use futures::stream::BoxStream;
    use rust_decimal::Decimal;

    use crate::account_number::AccountNumberGenerator;
    use crate::clock::ManualClock;
    use crate::manager::AccountManager;

    pub const PERSONAL_ID: &str = "12345678";
    pub const BUSINESS_ID: &str = "20123456789";

    pub fn personal_draft(product: &str) -> AccountDto {
        AccountDto {
            product_id: Some(product.to_string()),
            customer_id: Some(PERSONAL_ID.to_string()),
            ..Default::default()
        }
    }

    pub fn business_draft(product: &str) -> AccountDto {
        AccountDto {
            product_id: Some(product.to_string()),
            customer_id: Some(BUSINESS_ID.to_string()),
            holders: Some(vec![HolderDto::new("H1", "Acme Treasurer")]),
            ..Default::default()
        }
    }

    /// Manager over a fresh in-memory store, with a clock frozen at a known instant
    pub fn create_manager() -> (
        AccountManager<InMemoryAccountRepository>,
        InMemoryAccountRepository,
        Arc<ManualClock>,
    ) {
        let repository = InMemoryAccountRepository::new();
        let start = Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let clock = Arc::new(ManualClock::starting_at(start));
        let manager = AccountManager::new(Arc::new(repository.clone()), AccountSettings::default())
            .with_clock(clock.clone());
        (manager, repository, clock)
    }

    pub fn create_manager_with_number(
        number: &str,
    ) -> (
        AccountManager<InMemoryAccountRepository>,
        InMemoryAccountRepository,
        Arc<ManualClock>,
    ) {
        let (manager, repository, clock) = create_manager();
        let manager =
            manager.with_number_generator(Arc::new(FixedAccountNumberGenerator::new(number)));
        (manager, repository, clock)
    }

    /// Always hands out the same account number.
    pub struct FixedAccountNumberGenerator(String);

    impl FixedAccountNumberGenerator {
        pub fn new(number: &str) -> Self {
            Self(number.to_string())
        }
    }

    impl AccountNumberGenerator for FixedAccountNumberGenerator {
        fn generate(&self, _now: DateTime<Utc>) -> String {
            self.0.clone()
        }
    }

    /// Store wrapper that lets another writer update a record right after it
    /// has been read, so the reader's save carries a stale version.
    pub struct RacingRepository {
        inner: InMemoryAccountRepository,
    }

    impl RacingRepository {
        pub const INTERLEAVED_BALANCE: Decimal = Decimal::ONE_HUNDRED;

        pub fn new(inner: InMemoryAccountRepository) -> Self {
            Self { inner }
        }
    }

    #[async_trait]
    impl FindByAccountNumber<AccountModel> for RacingRepository {
        async fn find_by_account_number(
            &self,
            account_number: &str,
        ) -> RepositoryResult<Option<AccountModel>> {
            let loaded = self.inner.find_by_account_number(account_number).await?;
            if let Some(account) = &loaded {
                let mut other = account.clone();
                other.available_balance = Self::INTERLEAVED_BALANCE;
                self.inner.save(other).await?;
            }
            Ok(loaded)
        }
    }

    impl FindAll<AccountModel> for RacingRepository {
        fn find_all(&self) -> BoxStream<'_, RepositoryResult<AccountModel>> {
            self.inner.find_all()
        }
    }

    #[async_trait]
    impl Save<AccountModel> for RacingRepository {
        async fn save(&self, item: AccountModel) -> RepositoryResult<AccountModel> {
            self.inner.save(item).await
        }
    }

    #[async_trait]
    impl DeleteByAccountNumber for RacingRepository {
        async fn delete_by_account_number(&self, account_number: &str) -> RepositoryResult<u64> {
            self.inner.delete_by_account_number(account_number).await
        }
    }
}
