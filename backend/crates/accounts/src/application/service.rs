//! Account Service
//!
//! Use cases over the repository trait: registration, authentication,
//! lookup, update, deletion, listing, and password change. Generic over
//! the repository so tests run against the in-memory implementation.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::entity::account::{Account, DEFAULT_ROLE};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::Email;
use crate::error::{AccountError, AccountResult};
use kernel::pagination::Pagination;

/// Account service
#[derive(Debug, Clone)]
pub struct AccountService<R: AccountRepository> {
    repo: Arc<R>,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register a new account
    ///
    /// Validates the email and password, hashes the password, defaults an
    /// empty role set to `["user"]`, and persists atomically. Returns the
    /// stored account with its assigned id.
    pub async fn register(
        &self,
        username: Option<String>,
        email: &str,
        password: String,
        roles: Vec<String>,
    ) -> AccountResult<Account> {
        let email = Email::new(email)?;

        let password = ClearTextPassword::new(password)
            .map_err(|e| AccountError::Validation(e.to_string()))?;
        let hashed = password.hash()?;

        let roles = normalize_roles(roles)?;

        let mut account = Account::new(
            username.unwrap_or_default(),
            email.into_db(),
            hashed.as_phc_string(),
            roles,
        );

        self.repo.create_account(&mut account).await?;

        tracing::info!(account_id = account.id, "Registered new account");
        Ok(account)
    }

    /// Authenticate by email and password
    ///
    /// A missing account, a wrong password, and a password that fails the
    /// policy all return `AccountNotFound`, so the response does not
    /// reveal whether the email is registered.
    pub async fn authenticate(&self, email: &str, password: String) -> AccountResult<Account> {
        let email = match Email::new(email) {
            Ok(e) => e,
            Err(_) => return Err(AccountError::AccountNotFound),
        };

        let account = self
            .repo
            .find_by_email(email.as_str())
            .await?
            .ok_or(AccountError::AccountNotFound)?;

        let password = match ClearTextPassword::new(password) {
            Ok(p) => p,
            Err(_) => return Err(AccountError::AccountNotFound),
        };

        // A hash we cannot parse is our own data corruption, not the
        // caller's mistake
        let hashed = HashedPassword::from_phc_string(&account.password)?;

        if !hashed.verify(&password)? {
            return Err(AccountError::AccountNotFound);
        }

        Ok(account)
    }

    /// Fetch an account by id
    pub async fn get_account_by_id(&self, id: i64) -> AccountResult<Account> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AccountError::AccountNotFound)
    }

    /// Fetch an account by email
    pub async fn get_account_by_email(&self, email: &str) -> AccountResult<Account> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or(AccountError::AccountNotFound)
    }

    /// Fetch an account by username
    pub async fn get_account_by_username(&self, username: &str) -> AccountResult<Account> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(AccountError::AccountNotFound)
    }

    /// Update mutable account fields
    pub async fn update_account(&self, account: &Account) -> AccountResult<()> {
        self.repo.update_account(account).await
    }

    /// Delete an account
    pub async fn delete_account(&self, id: i64) -> AccountResult<()> {
        self.repo.delete_account(id).await?;
        tracing::info!(account_id = id, "Deleted account");
        Ok(())
    }

    /// List accounts one page at a time; writes the total back into
    /// `pagination`
    pub async fn list_accounts(&self, pagination: &mut Pagination) -> AccountResult<Vec<Account>> {
        self.repo.list_accounts(pagination).await
    }

    /// Change an account's password after verifying the current one
    pub async fn change_password(
        &self,
        id: i64,
        current_password: String,
        new_password: String,
    ) -> AccountResult<()> {
        let mut account = self.get_account_by_id(id).await?;

        let current = ClearTextPassword::new(current_password)
            .map_err(|_| AccountError::Validation("Current password is incorrect".to_string()))?;

        let hashed = HashedPassword::from_phc_string(&account.password)?;
        if !hashed.verify(&current)? {
            return Err(AccountError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        let new = ClearTextPassword::new(new_password)
            .map_err(|e| AccountError::Validation(e.to_string()))?;
        let new_hash = new.hash()?;

        account.set_password_hash(new_hash.as_phc_string());
        self.repo.update_account(&account).await?;

        tracing::info!(account_id = id, "Changed account password");
        Ok(())
    }
}

/// Default an empty role set to `["user"]`, reject blank names, and
/// drop duplicates while preserving order
fn normalize_roles(roles: Vec<String>) -> AccountResult<Vec<String>> {
    if roles.is_empty() {
        return Ok(vec![DEFAULT_ROLE.to_string()]);
    }

    let mut seen = Vec::with_capacity(roles.len());
    for role in roles {
        let role = role.trim().to_string();
        if role.is_empty() {
            return Err(AccountError::Validation(
                "Role names cannot be blank".to_string(),
            ));
        }
        if !seen.contains(&role) {
            seen.push(role);
        }
    }
    Ok(seen)
}
