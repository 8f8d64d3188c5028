use crate::models::account::AccountModel;
use crate::repository::delete_by_account_number::DeleteByAccountNumber;
use crate::repository::find_all::FindAll;
use crate::repository::find_by_account_number::FindByAccountNumber;
use crate::repository::save::Save;

/// Everything the account manager needs from a store.
///
/// Implemented automatically for any type providing the individual traits.
pub trait AccountRepository:
    FindByAccountNumber<AccountModel>
    + FindAll<AccountModel>
    + Save<AccountModel>
    + DeleteByAccountNumber
{
}

impl<R> AccountRepository for R where
    R: FindByAccountNumber<AccountModel>
        + FindAll<AccountModel>
        + Save<AccountModel>
        + DeleteByAccountNumber
{
}
