//! Account Entity
//!
//! An account holds the login identity (email), a display username, the
//! Argon2id password hash, and the set of role names granted to it. The
//! plaintext password never appears on this type.

use chrono::{DateTime, Utc};

/// Role granted to every account that is created without explicit roles
pub const DEFAULT_ROLE: &str = "user";

/// Account entity
///
/// `password` is always a PHC-format hash string, never plaintext.
/// `id` is zero until the repository assigns one on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Database-assigned identifier (0 before first insert)
    pub id: i64,
    /// Display name; defaults to the email when not provided
    pub username: String,
    /// Unique login identity (normalized lowercase)
    pub email: String,
    /// Argon2id PHC hash string
    pub password: String,
    /// Role names granted to this account
    pub roles: Vec<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new, not-yet-persisted account
    ///
    /// An empty `username` falls back to the email. Roles are stored as
    /// given; defaulting an empty set happens in the service layer.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        roles: Vec<String>,
    ) -> Self {
        let email = email.into();
        let username = {
            let u = username.into();
            if u.trim().is_empty() { email.clone() } else { u }
        };
        let now = Utc::now();

        Self {
            id: 0,
            username,
            email,
            password: password_hash.into(),
            roles,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the account holds the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Replace the password hash and bump `updated_at`
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password = password_hash.into();
        self.updated_at = Utc::now();
    }

    /// Replace the username and bump `updated_at`
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.updated_at = Utc::now();
    }
}
