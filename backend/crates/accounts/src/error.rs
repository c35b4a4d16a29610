//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Malformed request payload
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No such account - also returned for a wrong password during
    /// authentication, so callers cannot tell which check failed
    #[error("Account not found")]
    AccountNotFound,

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// Token signature, expiry, or claim failure
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Caller's roles do not include any required role
    #[error("Insufficient role")]
    InsufficientRole,

    /// Password hashing failure
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Signing key could not be loaded or parsed
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountError::AccountNotFound => StatusCode::NOT_FOUND,
            AccountError::EmailTaken => StatusCode::CONFLICT,
            AccountError::InvalidToken => StatusCode::UNAUTHORIZED,
            AccountError::InsufficientRole => StatusCode::FORBIDDEN,
            AccountError::Hashing(_)
            | AccountError::InvalidKey(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation(_) => ErrorKind::BadRequest,
            AccountError::AccountNotFound => ErrorKind::NotFound,
            AccountError::EmailTaken => ErrorKind::Conflict,
            AccountError::InvalidToken => ErrorKind::Unauthorized,
            AccountError::InsufficientRole => ErrorKind::Forbidden,
            AccountError::Hashing(_)
            | AccountError::InvalidKey(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Hashing(msg) | AccountError::InvalidKey(msg) => {
                tracing::error!(message = %msg, "Account crypto error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::AccountNotFound => {
                tracing::warn!("Account lookup or authentication failed");
            }
            AccountError::InvalidToken => {
                tracing::warn!("Rejected invalid session token");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AccountError::Validation(err.message().to_string()),
            _ => AccountError::Internal(err.to_string()),
        }
    }
}

impl From<platform::password::PasswordHashError> for AccountError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AccountError::Hashing(err.to_string())
    }
}

impl From<platform::keys::KeyError> for AccountError {
    fn from(err: platform::keys::KeyError) -> Self {
        AccountError::InvalidKey(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AccountError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AccountError::AccountNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AccountError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AccountError::InvalidToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AccountError::InsufficientRole.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AccountError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_mapping() {
        let err = AccountError::AccountNotFound.to_app_error();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: AccountError = AppError::bad_request("bad email").into();
        assert!(matches!(err, AccountError::Validation(_)));
    }
}
