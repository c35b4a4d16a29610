//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};
use kernel::pagination::Pagination;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flat account row without roles
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Account row with its aggregated role names
#[derive(sqlx::FromRow)]
struct AccountWithRolesRow {
    id: i64,
    username: String,
    email: String,
    password: String,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountWithRolesRow {
    fn into_account(self) -> Account {
        Account {
            id: self.id,
            username: self.username,
            email: self.email,
            password: self.password,
            roles: self.roles,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SELECT_WITH_ROLES: &str = r#"
    SELECT
        a.id,
        a.username,
        a.email,
        a.password,
        COALESCE(
            array_agg(r.name ORDER BY r.id) FILTER (WHERE r.name IS NOT NULL),
            '{}'
        ) AS roles,
        a.created_at,
        a.updated_at
    FROM account a
    LEFT JOIN account_role ar ON ar.account_id = a.id
    LEFT JOIN role r ON r.id = ar.role_id
"#;

/// Look up a role id by name, creating the row when absent.
///
/// `ON CONFLICT DO NOTHING` plus the re-select makes this safe under
/// concurrent creation: whichever transaction loses the insert race picks
/// up the winner's row.
async fn role_id_or_create(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    now: DateTime<Utc>,
) -> AccountResult<i64> {
    if let Some(id) = sqlx::query_scalar::<_, i64>("SELECT id FROM role WHERE name = $1")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?
    {
        return Ok(id);
    }

    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO role (name, created_at, updated_at)
        VALUES ($1, $2, $2)
        ON CONFLICT (name) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(now)
    .fetch_optional(&mut **tx)
    .await?;

    if let Some(id) = inserted {
        return Ok(id);
    }

    // Lost the race; the row exists now
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM role WHERE name = $1")
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;

    Ok(id)
}

/// Map a unique-violation on the email constraint to `EmailTaken`
fn map_db_err(err: sqlx::Error) -> AccountError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some("account_email_key")
        {
            return AccountError::EmailTaken;
        }
    }
    AccountError::Database(err)
}

impl AccountRepository for PgAccountRepository {
    async fn create_account(&self, account: &mut Account) -> AccountResult<()> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO account (username, email, password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password, created_at, updated_at
            "#,
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password)
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        account.id = row.id;

        for role in &account.roles {
            let role_id = role_id_or_create(&mut tx, role, account.created_at).await?;

            sqlx::query(
                r#"
                INSERT INTO account_role (account_id, role_id, created_at)
                VALUES ($1, $2, $3)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(account.id)
            .bind(role_id)
            .bind(account.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> AccountResult<Option<Account>> {
        let query = format!("{} WHERE a.id = $1 GROUP BY a.id", SELECT_WITH_ROLES);

        let row = sqlx::query_as::<_, AccountWithRolesRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AccountWithRolesRow::into_account))
    }

    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let query = format!("{} WHERE a.email = $1 GROUP BY a.id", SELECT_WITH_ROLES);

        let row = sqlx::query_as::<_, AccountWithRolesRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AccountWithRolesRow::into_account))
    }

    async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        let query = format!("{} WHERE a.username = $1 GROUP BY a.id", SELECT_WITH_ROLES);

        let row = sqlx::query_as::<_, AccountWithRolesRow>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AccountWithRolesRow::into_account))
    }

    async fn update_account(&self, account: &Account) -> AccountResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE account
            SET username = $2, email = $3, password = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?
        .rows_affected();

        if affected == 0 {
            return Err(AccountError::AccountNotFound);
        }
        Ok(())
    }

    async fn delete_account(&self, id: i64) -> AccountResult<()> {
        // account_role rows go with it via ON DELETE CASCADE
        let affected = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AccountError::AccountNotFound);
        }
        Ok(())
    }

    async fn list_accounts(&self, pagination: &mut Pagination) -> AccountResult<Vec<Account>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM account")
            .fetch_one(&self.pool)
            .await?;
        pagination.set_total(total);

        let query = format!(
            "{} GROUP BY a.id ORDER BY a.id LIMIT $1 OFFSET $2",
            SELECT_WITH_ROLES
        );

        let rows = sqlx::query_as::<_, AccountWithRolesRow>(&query)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(AccountWithRolesRow::into_account)
            .collect())
    }
}
