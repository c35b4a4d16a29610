//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::Account;
use kernel::pagination::Pagination;

// ============================================================================
// Register
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name; defaults to the email when omitted
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
    pub password: String,
    /// Role names; an empty or omitted list becomes `["user"]`
    #[serde(default)]
    pub roles: Vec<String>,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Account
// ============================================================================

/// Account response (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            roles: account.roles,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

// ============================================================================
// Change Password
// ============================================================================

/// Password change request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ============================================================================
// List
// ============================================================================

/// Query parameters for the account list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

/// Paged account list response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsResponse {
    pub accounts: Vec<AccountResponse>,
    pub page: i64,
    pub size: i64,
    pub total: i64,
}

impl ListAccountsResponse {
    pub fn new(accounts: Vec<Account>, pagination: &Pagination) -> Self {
        Self {
            accounts: accounts.into_iter().map(AccountResponse::from).collect(),
            page: pagination.page,
            size: pagination.size,
            total: pagination.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_response_omits_password() {
        let account = Account::new(
            "alice",
            "alice@example.com",
            "$argon2id$secret",
            vec!["user".to_string()],
        );

        let response = AccountResponse::from(account);
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn test_register_request_defaults() {
        let json = r#"{"email":"a@example.com","password":"CorrectHorse1!"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();

        assert!(req.username.is_none());
        assert!(req.roles.is_empty());
    }
}
