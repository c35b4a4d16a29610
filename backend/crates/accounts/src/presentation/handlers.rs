//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::service::AccountService;
use crate::application::token::{Identity, TokenCodec};
use crate::domain::repository::AccountRepository;
use crate::error::AccountResult;
use crate::presentation::dto::{
    AccountResponse, ChangePasswordRequest, ListAccountsQuery, ListAccountsResponse, LoginRequest,
    RegisterRequest,
};
use kernel::pagination::Pagination;

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub service: Arc<AccountService<R>>,
    pub codec: Arc<TokenCodec>,
    pub config: Arc<AccountsConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /accounts/register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = state
        .service
        .register(req.username, &req.email, req.password, req.roles)
        .await?;

    let token = state
        .codec
        .generate_token(account.id, &account.email, &account.roles)?;
    let cookie = state.config.cookie_config().build_set_cookie(&token);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AccountResponse::from(account)),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /accounts/login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = state.service.authenticate(&req.email, req.password).await?;

    let token = state
        .codec
        .generate_token(account.id, &account.email, &account.roles)?;
    let cookie = state.config.cookie_config().build_set_cookie(&token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AccountResponse::from(account)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /accounts/logout
///
/// Clears the cookie only. The token itself stays valid until expiry.
pub async fn logout<R>(
    State(state): State<AccountAppState<R>>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.config.cookie_config().build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /accounts/me
///
/// Requires the strict gate; reads the identity it attached.
pub async fn profile<R>(
    State(state): State<AccountAppState<R>>,
    Extension(identity): Extension<Identity>,
) -> AccountResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = state.service.get_account_by_id(identity.account_id).await?;
    Ok(Json(AccountResponse::from(account)))
}

// ============================================================================
// Get by id
// ============================================================================

/// GET /accounts/{id}
pub async fn get_account<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<i64>,
) -> AccountResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = state.service.get_account_by_id(id).await?;
    Ok(Json(AccountResponse::from(account)))
}

// ============================================================================
// Change password
// ============================================================================

/// POST /accounts/me/password
pub async fn change_password<R>(
    State(state): State<AccountAppState<R>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<ChangePasswordRequest>,
) -> AccountResult<StatusCode>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    state
        .service
        .change_password(identity.account_id, req.current_password, req.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Delete
// ============================================================================

/// DELETE /accounts/me
pub async fn delete_account<R>(
    State(state): State<AccountAppState<R>>,
    Extension(identity): Extension<Identity>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    state.service.delete_account(identity.account_id).await?;

    let cookie = state.config.cookie_config().build_delete_cookie();
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// List
// ============================================================================

/// GET /accounts
///
/// Behind the admin role gate.
pub async fn list_accounts<R>(
    State(state): State<AccountAppState<R>>,
    Query(query): Query<ListAccountsQuery>,
) -> AccountResult<Json<ListAccountsResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let mut pagination = Pagination::new(
        query.page.unwrap_or(1),
        query.size.unwrap_or(kernel::pagination::DEFAULT_PAGE_SIZE),
    );

    let accounts = state.service.list_accounts(&mut pagination).await?;

    Ok(Json(ListAccountsResponse::new(accounts, &pagination)))
}

// ============================================================================
// Session status
// ============================================================================

/// GET /accounts/session
///
/// Behind the soft gate: reports whether the request carried a valid
/// token without failing when it did not.
pub async fn session_status<R>(
    State(_state): State<AccountAppState<R>>,
    identity: Option<Extension<Identity>>,
) -> Json<serde_json::Value>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    match identity {
        Some(Extension(identity)) => Json(serde_json::json!({
            "authenticated": true,
            "accountId": identity.account_id,
            "principal": identity.principal,
            "roles": identity.roles,
        })),
        None => Json(serde_json::json!({ "authenticated": false })),
    }
}
