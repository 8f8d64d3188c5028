use async_trait::async_trait;
use futures::stream::BoxStream;
use rust_decimal::Decimal;

use crate::domain::account::AccountDto;
use crate::error::ApiResult;

/// Account lifecycle operations exposed to the transport layer.
///
/// Every operation is request-scoped: implementations keep no state between
/// calls and rely on the underlying store for consistency.
///
/// # Example
/// ```ignore
/// let created = service.create(draft).await?;
/// let funded = service.deposit(Decimal::from(100), created.account.as_deref().unwrap()).await?;
/// ```
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Load a single account
    ///
    /// # Returns
    /// * `Err(InvalidInput)` - If the account number is blank
    /// * `Err(NotFound)` - If no account carries this number
    async fn get_by_account_number(&self, account_number: &str) -> ApiResult<AccountDto>;

    /// Lazily list every account owned by a customer
    ///
    /// The customer id is checked eagerly; the returned stream is evaluated
    /// against the store only when polled, and each call starts a fresh scan.
    /// An empty stream is a valid answer.
    fn list_by_customer<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> ApiResult<BoxStream<'a, ApiResult<AccountDto>>>;

    /// Validate a draft, assign its account number and persist it
    async fn create(&self, draft: AccountDto) -> ApiResult<AccountDto>;

    /// Add `amount` to the available balance
    async fn deposit(&self, amount: Decimal, account_number: &str) -> ApiResult<AccountDto>;

    /// Subtract `amount` from the available balance
    async fn withdraw(&self, amount: Decimal, account_number: &str) -> ApiResult<AccountDto>;

    /// Remove an account; removing a missing account is not an error
    async fn delete(&self, account_number: &str) -> ApiResult<()>;
}
