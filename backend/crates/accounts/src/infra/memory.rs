//! In-Memory Repository Implementation
//!
//! A `Mutex`-guarded store with the same observable behavior as the
//! PostgreSQL repository: unique emails, idempotent role upsert, and
//! atomic account creation. Used by tests and local development.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};
use kernel::pagination::Pagination;

#[derive(Debug, Default)]
struct Inner {
    accounts: Vec<Account>,
    roles: Vec<String>,
    next_id: i64,
}

/// In-memory account repository
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountRepository {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct role names ever persisted, in creation order
    pub async fn role_names(&self) -> Vec<String> {
        self.inner.lock().await.roles.clone()
    }
}

impl AccountRepository for MemoryAccountRepository {
    async fn create_account(&self, account: &mut Account) -> AccountResult<()> {
        // One lock for the whole operation makes it atomic
        let mut inner = self.inner.lock().await;

        if inner.accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::EmailTaken);
        }

        for role in &account.roles {
            if !inner.roles.contains(role) {
                inner.roles.push(role.clone());
            }
        }

        inner.next_id += 1;
        account.id = inner.next_id;
        inner.accounts.push(account.clone());

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> AccountResult<Option<Account>> {
        let inner = self.inner.lock().await;
        Ok(inner.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let inner = self.inner.lock().await;
        Ok(inner.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        let inner = self.inner.lock().await;
        Ok(inner.accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn update_account(&self, account: &Account) -> AccountResult<()> {
        let mut inner = self.inner.lock().await;

        if inner
            .accounts
            .iter()
            .any(|a| a.id != account.id && a.email == account.email)
        {
            return Err(AccountError::EmailTaken);
        }

        match inner.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(stored) => {
                stored.username = account.username.clone();
                stored.email = account.email.clone();
                stored.password = account.password.clone();
                stored.updated_at = account.updated_at;
                Ok(())
            }
            None => Err(AccountError::AccountNotFound),
        }
    }

    async fn delete_account(&self, id: i64) -> AccountResult<()> {
        let mut inner = self.inner.lock().await;

        let before = inner.accounts.len();
        inner.accounts.retain(|a| a.id != id);

        if inner.accounts.len() == before {
            return Err(AccountError::AccountNotFound);
        }
        Ok(())
    }

    async fn list_accounts(&self, pagination: &mut Pagination) -> AccountResult<Vec<Account>> {
        let inner = self.inner.lock().await;

        pagination.set_total(inner.accounts.len() as i64);

        let offset = pagination.offset() as usize;
        let limit = pagination.limit() as usize;

        Ok(inner
            .accounts
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str, roles: &[&str]) -> Account {
        Account::new(
            "",
            email,
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g",
            roles.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let repo = MemoryAccountRepository::new();

        let mut first = account("a@example.com", &["user"]);
        let mut second = account("b@example.com", &["user"]);
        repo.create_account(&mut first).await.unwrap();
        repo.create_account(&mut second).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MemoryAccountRepository::new();

        let mut first = account("a@example.com", &["user"]);
        repo.create_account(&mut first).await.unwrap();

        let mut dup = account("a@example.com", &["user"]);
        let result = repo.create_account(&mut dup).await;
        assert!(matches!(result, Err(AccountError::EmailTaken)));

        // No partial state from the failed create
        let found = repo.find_by_id(2).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_role_upsert_is_idempotent() {
        let repo = MemoryAccountRepository::new();

        let mut first = account("a@example.com", &["user", "admin"]);
        let mut second = account("b@example.com", &["admin", "editor"]);
        repo.create_account(&mut first).await.unwrap();
        repo.create_account(&mut second).await.unwrap();

        let roles = repo.role_names().await;
        assert_eq!(roles, vec!["user", "admin", "editor"]);
    }

    #[tokio::test]
    async fn test_concurrent_creates_share_one_role() {
        let repo = MemoryAccountRepository::new();

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..50 {
            let repo = repo.clone();
            tasks.spawn(async move {
                let mut acc = account(&format!("user{}@example.com", i), &["tester"]);
                repo.create_account(&mut acc).await
            });
        }

        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let roles = repo.role_names().await;
        assert_eq!(roles, vec!["tester"]);

        let mut pagination = Pagination::new(1, 100);
        let accounts = repo.list_accounts(&mut pagination).await.unwrap();
        assert_eq!(accounts.len(), 50);
    }

    #[tokio::test]
    async fn test_pagination() {
        let repo = MemoryAccountRepository::new();

        for i in 0..15 {
            let mut acc = account(&format!("user{}@example.com", i), &["user"]);
            repo.create_account(&mut acc).await.unwrap();
        }

        let mut page1 = Pagination::new(1, 10);
        let first = repo.list_accounts(&mut page1).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(page1.total, 15);

        let mut page2 = Pagination::new(2, 10);
        let second = repo.list_accounts(&mut page2).await.unwrap();
        assert_eq!(second.len(), 5);
        assert_eq!(page2.total, 15);

        // Pages do not overlap
        assert!(second.iter().all(|a| !first.iter().any(|f| f.id == a.id)));
    }

    #[tokio::test]
    async fn test_update_writes_full_row_but_not_roles() {
        let repo = MemoryAccountRepository::new();

        let mut acc = account("old@example.com", &["user", "admin"]);
        repo.create_account(&mut acc).await.unwrap();

        acc.username = "renamed".to_string();
        acc.email = "new@example.com".to_string();
        acc.password = "$argon2id$rehashed".to_string();
        acc.roles = vec!["superuser".to_string()];
        repo.update_account(&acc).await.unwrap();

        let stored = repo.find_by_id(acc.id).await.unwrap().unwrap();
        assert_eq!(stored.username, "renamed");
        assert_eq!(stored.email, "new@example.com");
        assert_eq!(stored.password, "$argon2id$rehashed");
        // Role membership is set at creation; update leaves it alone
        assert_eq!(stored.roles, vec!["user", "admin"]);

        assert!(repo.find_by_email("old@example.com").await.unwrap().is_none());
        assert!(repo.find_by_email("new@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let repo = MemoryAccountRepository::new();

        let mut first = account("a@example.com", &["user"]);
        let mut second = account("b@example.com", &["user"]);
        repo.create_account(&mut first).await.unwrap();
        repo.create_account(&mut second).await.unwrap();

        second.email = "a@example.com".to_string();
        let result = repo.update_account(&second).await;
        assert!(matches!(result, Err(AccountError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = MemoryAccountRepository::new();

        let ghost = account("ghost@example.com", &[]);
        let result = repo.update_account(&ghost).await;
        assert!(matches!(result, Err(AccountError::AccountNotFound)));

        let result = repo.delete_account(42).await;
        assert!(matches!(result, Err(AccountError::AccountNotFound)));
    }
}
