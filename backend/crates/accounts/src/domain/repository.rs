//! Repository Trait
//!
//! Interface for account persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::Account;
use crate::error::AccountResult;
use kernel::pagination::Pagination;

/// Account repository trait
///
/// `create_account` receives the entity mutably so the implementation can
/// write back the assigned id, timestamps, and the final role set (after
/// upsert). Lookups return `None` for a missing account; mapping that to
/// `AccountError::AccountNotFound` is the caller's job.
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Persist a new account together with its roles, atomically.
    ///
    /// Every role name is looked up and created when absent; the account
    /// is associated with each. On success the entity's `id` is set. A
    /// duplicate email fails with `AccountError::EmailTaken` and leaves
    /// no partial rows behind.
    async fn create_account(&self, account: &mut Account) -> AccountResult<()>;

    /// Find an account (with roles) by its id
    async fn find_by_id(&self, id: i64) -> AccountResult<Option<Account>>;

    /// Find an account (with roles) by its email
    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>>;

    /// Find an account (with roles) by its username
    async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>>;

    /// Full-row update keyed by id: writes username, email, and password
    /// hash. Role membership is fixed at creation and not touched here.
    ///
    /// Fails with `AccountError::AccountNotFound` when the id does not exist.
    async fn update_account(&self, account: &Account) -> AccountResult<()>;

    /// Delete an account and its role associations
    ///
    /// Fails with `AccountError::AccountNotFound` when the id does not exist.
    async fn delete_account(&self, id: i64) -> AccountResult<()>;

    /// List accounts ordered by id, one page at a time
    ///
    /// Writes the total row count back into `pagination`.
    async fn list_accounts(&self, pagination: &mut Pagination) -> AccountResult<Vec<Account>>;
}
