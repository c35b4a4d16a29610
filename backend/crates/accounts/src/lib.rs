//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Account service, token codec, configuration
//! - `infra/` - PostgreSQL and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Account registration and login with email + password
//! - Self-contained ES256-signed session tokens with embedded role claims
//! - Transactional account creation with idempotent role upsert
//! - Soft and strict auth middleware plus a role gate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; the plaintext is never persisted
//! - Tokens validated by signature and expiry alone (no server-side session)
//! - Logout clears the cookie only; there is no revocation list, so a
//!   captured token stays valid until its expiry

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use application::service::AccountService;
pub use application::token::{Identity, TokenCodec};
pub use error::{AccountError, AccountResult};
pub use infra::memory::MemoryAccountRepository;
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::account_router;

// Re-export kernel types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
pub use kernel::pagination::Pagination;

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
