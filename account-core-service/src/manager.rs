use std::sync::Arc;

use account_core_api::config::AccountSettings;
use account_core_api::domain::account::AccountDto;
use account_core_api::error::{ApiError, ApiResult};
use account_core_api::service::AccountService;
use account_core_db::models::account::AccountModel;
use account_core_db::repository::AccountRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::account_number::{AccountNumberGenerator, TimestampAccountNumberGenerator};
use crate::clock::{Clock, SystemClock};
use crate::error::store_error;
use crate::mapper::{bounded, AccountMapper, DefaultAccountMapper};
use crate::validation::CreateValidation;

/// Account lifecycle manager backed by an injected store.
///
/// Holds no per-request state; concurrent calls are safe as long as the store
/// is. Lost updates on the balance are prevented by the store's version check,
/// which surfaces here as [`ApiError::ConcurrentModification`].
///
/// # Example
/// ```ignore
/// let repository = Arc::new(InMemoryAccountRepository::new());
/// let manager = AccountManager::new(repository, AccountSettings::from_env()?);
/// let account = manager.create(draft).await?;
/// ```
pub struct AccountManager<R, M = DefaultAccountMapper> {
    repository: Arc<R>,
    mapper: M,
    settings: AccountSettings,
    number_generator: Arc<dyn AccountNumberGenerator>,
    clock: Arc<dyn Clock>,
}

impl<R: AccountRepository> AccountManager<R> {
    pub fn new(repository: Arc<R>, settings: AccountSettings) -> Self {
        Self {
            repository,
            mapper: DefaultAccountMapper,
            settings,
            number_generator: Arc::new(TimestampAccountNumberGenerator),
            clock: Arc::new(SystemClock),
        }
    }
}

impl<R, M> AccountManager<R, M>
where
    R: AccountRepository,
    M: AccountMapper,
{
    pub fn with_mapper<N: AccountMapper>(self, mapper: N) -> AccountManager<R, N> {
        AccountManager {
            repository: self.repository,
            mapper,
            settings: self.settings,
            number_generator: self.number_generator,
            clock: self.clock,
        }
    }

    pub fn with_number_generator(mut self, generator: Arc<dyn AccountNumberGenerator>) -> Self {
        self.number_generator = generator;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &AccountSettings {
        &self.settings
    }

    async fn load(&self, account_number: &str) -> ApiResult<AccountModel> {
        self.repository
            .find_by_account_number(account_number)
            .await
            .map_err(store_error)?
            .ok_or_else(|| {
                tracing::debug!(account_number, "account not found");
                ApiError::NotFound(format!("no account exists with number {account_number}"))
            })
    }

    fn assign_account_number(&self, draft: &AccountDto, now: DateTime<Utc>) -> String {
        match draft.account.as_deref() {
            Some(number) if number == self.settings.atm_account_number => number.to_string(),
            _ => self.number_generator.generate(now),
        }
    }
}

#[async_trait]
impl<R, M> AccountService for AccountManager<R, M>
where
    R: AccountRepository,
    M: AccountMapper,
{
    async fn get_by_account_number(&self, account_number: &str) -> ApiResult<AccountDto> {
        if account_number.trim().is_empty() {
            return Err(ApiError::InvalidInput("account number is required".to_string()));
        }

        let model = self.load(account_number).await?;
        Ok(self.mapper.model_to_dto(&model))
    }

    fn list_by_customer<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> ApiResult<BoxStream<'a, ApiResult<AccountDto>>> {
        if customer_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("customer id is required".to_string()));
        }

        tracing::debug!(customer_id, "listing accounts");
        Ok(self
            .repository
            .find_all()
            .map_err(store_error)
            .try_filter(move |account| future::ready(account.customer_id.as_str() == customer_id))
            .map_ok(move |account| self.mapper.model_to_dto(&account))
            .boxed())
    }

    async fn create(&self, draft: AccountDto) -> ApiResult<AccountDto> {
        let validated = CreateValidation::new(&self.settings, self.repository.as_ref())
            .validate(&draft)
            .await
            .inspect_err(|err| tracing::debug!(error = %err, "account draft rejected"))?;

        let mut model = self.mapper.dto_to_model(&draft)?;
        let now = self.clock.now();

        model.id = Uuid::new_v4();
        model.account_number = bounded("account number", &self.assign_account_number(&draft, now))?;
        if !model.available_balance.is_zero() {
            tracing::debug!(
                requested = %model.available_balance,
                "opening balance ignored, accounts start empty"
            );
            model.available_balance = Decimal::ZERO;
        }
        model.create_date = now;
        model.modify_date = None;

        let saved = self.repository.save(model).await.map_err(|err| {
            tracing::warn!(error = %err, "failed to persist new account");
            store_error(err)
        })?;

        tracing::info!(
            account_number = saved.account_number.as_str(),
            customer_id = saved.customer_id.as_str(),
            product = %validated.product,
            customer = %validated.customer,
            "account created"
        );
        Ok(self.mapper.model_to_dto(&saved))
    }

    async fn deposit(&self, amount: Decimal, account_number: &str) -> ApiResult<AccountDto> {
        let mut model = self.load(account_number).await?;

        let limits = self.settings.deposit_limits;
        if !limits.contains(amount) {
            tracing::debug!(account_number, %amount, "deposit outside limits");
            return Err(ApiError::LimitViolation(format!(
                "deposit amount must be between {} and {}",
                limits.min, limits.max
            )));
        }

        model.available_balance += amount;
        model.modify_date = Some(self.clock.now());

        let saved = self.repository.save(model).await.map_err(store_error)?;
        tracing::info!(account_number, %amount, balance = %saved.available_balance, "deposit applied");
        Ok(self.mapper.model_to_dto(&saved))
    }

    async fn withdraw(&self, amount: Decimal, account_number: &str) -> ApiResult<AccountDto> {
        let mut model = self.load(account_number).await?;

        let limits = self.settings.withdrawal_limits;
        if !limits.contains(amount) {
            tracing::debug!(account_number, %amount, "withdrawal outside limits");
            return Err(ApiError::LimitViolation(format!(
                "withdrawal amount must be between {} and {}",
                limits.min, limits.max
            )));
        }
        if amount > model.available_balance {
            tracing::debug!(
                account_number,
                %amount,
                balance = %model.available_balance,
                "insufficient funds"
            );
            return Err(ApiError::BadRequest(format!(
                "insufficient funds in account {account_number}"
            )));
        }

        model.available_balance -= amount;
        model.modify_date = Some(self.clock.now());

        let saved = self.repository.save(model).await.map_err(store_error)?;
        tracing::info!(account_number, %amount, balance = %saved.available_balance, "withdrawal applied");
        Ok(self.mapper.model_to_dto(&saved))
    }

    async fn delete(&self, account_number: &str) -> ApiResult<()> {
        let removed = self
            .repository
            .delete_by_account_number(account_number)
            .await
            .map_err(store_error)?;

        if removed == 0 {
            tracing::debug!(account_number, "nothing to delete");
        } else {
            tracing::info!(account_number, "account deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{
        business_draft, create_manager, create_manager_with_number, personal_draft,
        FixedAccountNumberGenerator, RacingRepository, BUSINESS_ID, PERSONAL_ID,
    };
    use account_core_api::domain::account::{HolderDto, SignatoryDto};
    use account_core_db::repository::InMemoryAccountRepository;
    use chrono::Duration;
    use rstest::rstest;
    use std::str::FromStr;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_create_personal_savings_account() {
        let (manager, _, clock) = create_manager();

        let created = assert_ok!(manager.create(personal_draft("SAVINGS")).await);

        assert_eq!(created.available_balance, Decimal::ZERO);
        assert_eq!(created.create_date, Some(clock.now()));
        assert!(created.modify_date.is_none());
        let number = created.account.unwrap();
        assert!(number.chars().all(|c| c.is_ascii_digit()));
        assert!(number.ends_with(&clock.now().format("%Y%m%d").to_string()));
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (manager, _, clock) = create_manager();
        let draft = business_draft("CHECKING");

        let created = assert_ok!(manager.create(draft.clone()).await);
        let number = created.account.clone().unwrap();
        let loaded = assert_ok!(manager.get_by_account_number(&number).await);

        assert_eq!(loaded, created);
        assert_eq!(
            loaded,
            AccountDto {
                account: Some(number),
                create_date: Some(clock.now()),
                ..draft
            }
        );
    }

    #[tokio::test]
    async fn test_create_ignores_opening_balance() {
        let (manager, _, _) = create_manager();
        let mut draft = personal_draft("CHECKING");
        draft.available_balance = Decimal::from(1_000);

        let created = assert_ok!(manager.create(draft).await);

        assert_eq!(created.available_balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_create_uses_atm_sentinel_verbatim() {
        let (manager, _, _) = create_manager();
        let mut draft = personal_draft("FIXED_TERM");
        draft.account = Some(manager.settings().atm_account_number.clone());

        let created = assert_ok!(manager.create(draft.clone()).await);
        assert_eq!(created.account.as_deref(), Some("0000000000000001"));

        let err = assert_err!(manager.create(draft).await);
        assert!(matches!(err, ApiError::DuplicateAccount(_)));
    }

    #[tokio::test]
    async fn test_create_replaces_caller_account_number() {
        let (manager, _, _) = create_manager();
        let mut draft = personal_draft("SAVINGS");
        draft.account = Some("999".to_string());

        let created = assert_ok!(manager.create(draft).await);

        assert_ne!(created.account.as_deref(), Some("999"));
    }

    #[rstest]
    #[case("SAVINGS")]
    #[case("CHECKING")]
    #[tokio::test]
    async fn test_personal_customer_holds_one_account_per_capped_product(#[case] product: &str) {
        let (manager, repository, clock) = create_manager();
        assert_ok!(manager.create(personal_draft(product)).await);
        clock.advance(Duration::milliseconds(1));

        let err = assert_err!(manager.create(personal_draft(product)).await);

        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_personal_customer_may_hold_several_fixed_term_accounts() {
        let (manager, repository, clock) = create_manager();
        assert_ok!(manager.create(personal_draft("FIXED_TERM")).await);
        clock.advance(Duration::milliseconds(1));
        assert_ok!(manager.create(personal_draft("FIXED_TERM")).await);

        assert_eq!(repository.len(), 2);
    }

    #[tokio::test]
    async fn test_personal_cap_is_per_customer() {
        let (manager, _, clock) = create_manager();
        assert_ok!(manager.create(personal_draft("SAVINGS")).await);
        clock.advance(Duration::milliseconds(1));

        let mut other = personal_draft("SAVINGS");
        other.customer_id = Some("87654321".to_string());
        assert_ok!(manager.create(other).await);
    }

    #[tokio::test]
    async fn test_create_with_widest_customer_id_setting() {
        let settings = AccountSettings {
            personal_customer_id_length: 20,
            ..AccountSettings::default()
        };
        assert_ok!(settings.validate());
        let manager = AccountManager::new(Arc::new(InMemoryAccountRepository::new()), settings);
        let mut draft = personal_draft("SAVINGS");
        draft.customer_id = Some("1".repeat(20));

        let created = assert_ok!(manager.create(draft).await);

        assert_eq!(created.customer_id.as_deref().map(str::len), Some(20));
    }

    #[tokio::test]
    async fn test_multibyte_customer_id_is_classified_by_bytes() {
        let (manager, repository, _) = create_manager();
        let mut draft = business_draft("CHECKING");
        draft.customer_id = Some("ñññññññññññ".to_string());

        let err = assert_err!(manager.create(draft).await);

        assert!(matches!(err, ApiError::InvalidInput(ref msg) if msg.starts_with("invalid customer id")));
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_product_message_uses_configured_code() {
        let mut settings = AccountSettings::default();
        settings.product_codes.savings = "AHORRO".to_string();
        let manager = AccountManager::new(Arc::new(InMemoryAccountRepository::new()), settings)
            .with_number_generator(Arc::new(FixedAccountNumberGenerator::new("555")));
        assert_ok!(manager.create(personal_draft("AHORRO")).await);

        let err = assert_err!(manager.create(personal_draft("AHORRO")).await);

        assert_eq!(
            err,
            ApiError::InvalidInput(format!("customer {PERSONAL_ID} already holds an account with product AHORRO"))
        );
    }

    #[rstest]
    #[case::no_holders(None)]
    #[case::empty_holders(Some(vec![]))]
    #[case::blank_name(Some(vec![HolderDto::new("H1", "")]))]
    #[case::blank_code(Some(vec![HolderDto::new("", "Acme Treasurer")]))]
    #[tokio::test]
    async fn test_business_account_requires_valid_holders(#[case] holders: Option<Vec<HolderDto>>) {
        let (manager, repository, _) = create_manager();
        let mut draft = business_draft("CHECKING");
        draft.holders = holders;

        let err = assert_err!(manager.create(draft).await);

        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert!(repository.is_empty());
    }

    #[rstest]
    #[case("SAVINGS")]
    #[case("FIXED_TERM")]
    #[tokio::test]
    async fn test_business_customer_limited_to_checking(#[case] product: &str) {
        let (manager, _, _) = create_manager();

        let err = assert_err!(manager.create(business_draft(product)).await);

        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[rstest]
    #[case::holders(Some(vec![HolderDto::new("H1", "Jane Doe")]), None)]
    #[case::signatories(None, Some(vec![SignatoryDto::new("S1", "Jane Doe")]))]
    #[case::empty_holders(Some(vec![]), None)]
    #[tokio::test]
    async fn test_personal_account_rejects_parties(
        #[case] holders: Option<Vec<HolderDto>>,
        #[case] signatories: Option<Vec<SignatoryDto>>,
    ) {
        let (manager, _, _) = create_manager();
        let mut draft = personal_draft("SAVINGS");
        draft.holders = holders;
        draft.signatories = signatories;

        let err = assert_err!(manager.create(draft).await);

        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[rstest]
    #[case::missing_product(None, Some(PERSONAL_ID))]
    #[case::unknown_product(Some("LOAN"), Some(PERSONAL_ID))]
    #[case::missing_customer(Some("SAVINGS"), None)]
    #[case::blank_customer(Some("SAVINGS"), Some("   "))]
    #[case::wrong_length(Some("SAVINGS"), Some("123456789"))]
    #[tokio::test]
    async fn test_create_rejects_malformed_draft(
        #[case] product: Option<&str>,
        #[case] customer: Option<&str>,
    ) {
        let (manager, _, _) = create_manager();
        let draft = AccountDto {
            product_id: product.map(str::to_string),
            customer_id: customer.map(str::to_string),
            ..Default::default()
        };

        let err = assert_err!(manager.create(draft).await);

        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_product_is_checked_before_customer() {
        let (manager, _, _) = create_manager();
        let draft = AccountDto {
            product_id: Some("LOAN".to_string()),
            customer_id: Some("1".to_string()),
            ..Default::default()
        };

        let err = assert_err!(manager.create(draft).await);

        assert!(matches!(err, ApiError::InvalidInput(ref msg) if msg.starts_with("invalid product id")));
    }

    #[tokio::test]
    async fn test_get_rejects_blank_and_unknown_numbers() {
        let (manager, _, _) = create_manager();

        assert!(matches!(
            manager.get_by_account_number(" ").await,
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            manager.get_by_account_number("404").await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[rstest]
    #[case("1")]
    #[case("250.75")]
    #[case("3000")]
    #[tokio::test]
    async fn test_deposit_within_limits(#[case] amount: &str) {
        let (manager, _, clock) = create_manager();
        let created = assert_ok!(manager.create(personal_draft("SAVINGS")).await);
        let number = created.account.unwrap();
        clock.advance(Duration::seconds(5));

        let amount = Decimal::from_str(amount).unwrap();
        let updated = assert_ok!(manager.deposit(amount, &number).await);

        assert_eq!(updated.available_balance, amount);
        assert_eq!(updated.modify_date, Some(clock.now()));
        assert!(updated.modify_date > updated.create_date);
    }

    #[rstest]
    #[case("0.99")]
    #[case("5000")]
    #[tokio::test]
    async fn test_deposit_outside_limits_is_rejected(#[case] amount: &str) {
        let (manager, _, _) = create_manager_with_number("123");
        assert_ok!(manager.create(personal_draft("SAVINGS")).await);

        let err = assert_err!(manager.deposit(Decimal::from_str(amount).unwrap(), "123").await);

        assert!(matches!(err, ApiError::LimitViolation(_)));
        let loaded = assert_ok!(manager.get_by_account_number("123").await);
        assert_eq!(loaded.available_balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_deposit_into_missing_account() {
        let (manager, _, _) = create_manager();

        let err = assert_err!(manager.deposit(Decimal::from(10), "404").await);

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_withdraw_more_than_balance() {
        let (manager, _, _) = create_manager_with_number("123");
        assert_ok!(manager.create(personal_draft("SAVINGS")).await);
        assert_ok!(manager.deposit(Decimal::from(50), "123").await);

        let err = assert_err!(manager.withdraw(Decimal::from(100), "123").await);

        assert!(matches!(err, ApiError::BadRequest(_)));
        let loaded = assert_ok!(manager.get_by_account_number("123").await);
        assert_eq!(loaded.available_balance, Decimal::from(50));
    }

    #[tokio::test]
    async fn test_withdraw_entire_balance() {
        let (manager, _, clock) = create_manager_with_number("123");
        assert_ok!(manager.create(personal_draft("CHECKING")).await);
        assert_ok!(manager.deposit(Decimal::from(50), "123").await);
        clock.advance(Duration::seconds(1));

        let updated = assert_ok!(manager.withdraw(Decimal::from(50), "123").await);

        assert_eq!(updated.available_balance, Decimal::ZERO);
        assert_eq!(updated.modify_date, Some(clock.now()));
    }

    #[rstest]
    #[case("0")]
    #[case("3000.01")]
    #[tokio::test]
    async fn test_withdraw_outside_limits_is_rejected(#[case] amount: &str) {
        let (manager, _, _) = create_manager_with_number("123");
        assert_ok!(manager.create(personal_draft("CHECKING")).await);
        assert_ok!(manager.deposit(Decimal::from(3000), "123").await);
        assert_ok!(manager.deposit(Decimal::from(3000), "123").await);

        let err = assert_err!(manager.withdraw(Decimal::from_str(amount).unwrap(), "123").await);

        assert!(matches!(err, ApiError::LimitViolation(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_account_is_noop() {
        let (manager, _, _) = create_manager();

        assert_ok!(manager.delete("999").await);
    }

    #[tokio::test]
    async fn test_delete_removes_account() {
        let (manager, repository, _) = create_manager_with_number("123");
        assert_ok!(manager.create(personal_draft("SAVINGS")).await);

        assert_ok!(manager.delete("123").await);

        assert!(repository.is_empty());
        assert!(matches!(
            manager.get_by_account_number("123").await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_by_customer_filters_and_rescans() {
        let (manager, _, clock) = create_manager();
        assert_ok!(manager.create(personal_draft("SAVINGS")).await);
        clock.advance(Duration::milliseconds(1));
        assert_ok!(manager.create(business_draft("CHECKING")).await);
        clock.advance(Duration::milliseconds(1));

        let first: Vec<AccountDto> =
            assert_ok!(assert_ok!(manager.list_by_customer(PERSONAL_ID)).try_collect().await);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].product_id.as_deref(), Some("SAVINGS"));

        assert_ok!(manager.create(personal_draft("FIXED_TERM")).await);

        let second: Vec<AccountDto> =
            assert_ok!(assert_ok!(manager.list_by_customer(PERSONAL_ID)).try_collect().await);
        assert_eq!(second.len(), 2);
        assert!(second.iter().all(|a| a.customer_id.as_deref() == Some(PERSONAL_ID)));

        let business: Vec<AccountDto> =
            assert_ok!(assert_ok!(manager.list_by_customer(BUSINESS_ID)).try_collect().await);
        assert_eq!(business.len(), 1);
    }

    #[tokio::test]
    async fn test_list_by_customer_empty_and_blank() {
        let (manager, _, _) = create_manager();

        let none: Vec<AccountDto> =
            assert_ok!(assert_ok!(manager.list_by_customer("00000000")).try_collect().await);
        assert!(none.is_empty());

        assert!(matches!(
            manager.list_by_customer(""),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_deposit_detects_concurrent_modification() {
        let inner = InMemoryAccountRepository::new();
        let setup = AccountManager::new(Arc::new(inner.clone()), AccountSettings::default())
            .with_number_generator(Arc::new(FixedAccountNumberGenerator::new("123")));
        assert_ok!(setup.create(personal_draft("SAVINGS")).await);

        let racing = AccountManager::new(
            Arc::new(RacingRepository::new(inner.clone())),
            AccountSettings::default(),
        );

        let err = assert_err!(racing.deposit(Decimal::from(10), "123").await);

        assert!(matches!(err, ApiError::ConcurrentModification(_)));
        let stored = assert_ok!(setup.get_by_account_number("123").await);
        assert_eq!(stored.available_balance, RacingRepository::INTERLEAVED_BALANCE);
    }
}
