//! Auth Gate Middleware
//!
//! Three gates built on the token codec:
//! - `attach_identity` (soft): decodes the token when present, proceeds
//!   anonymously otherwise
//! - `require_auth` (strict): 401 without a verifiable token
//! - `require_role`: 403 unless the identity holds one of the required
//!   roles
//!
//! The verified [`Identity`](crate::application::token::Identity) is
//! stored in request extensions for downstream handlers.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::token::TokenCodec;
use crate::error::AccountError;

/// State for the soft and strict gates
#[derive(Clone)]
pub struct AuthGateState {
    pub codec: Arc<TokenCodec>,
    pub cookie_name: String,
}

/// State for the role gate
#[derive(Clone)]
pub struct RoleGateState {
    pub codec: Arc<TokenCodec>,
    pub cookie_name: String,
    /// The identity must hold at least one of these
    pub required_roles: Arc<Vec<String>>,
}

/// Pull the token from the session cookie, falling back to a Bearer
/// Authorization header
fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = platform::cookie::extract_cookie(headers, cookie_name) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Soft gate: attach the identity when a valid token is present
///
/// An invalid or absent token is not an error here; the request simply
/// proceeds without an identity.
pub async fn attach_identity(
    State(state): State<AuthGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(req.headers(), &state.cookie_name) {
        if let Ok(identity) = state.codec.extract_identity(&token) {
            req.extensions_mut().insert(identity);
        }
    }

    next.run(req).await
}

/// Strict gate: reject the request unless the token verifies
pub async fn require_auth(
    State(state): State<AuthGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token(req.headers(), &state.cookie_name)
        .ok_or_else(|| AccountError::InvalidToken.into_response())?;

    let identity = state
        .codec
        .extract_identity(&token)
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Role gate: strict auth plus a role-intersection check
pub async fn require_role(
    State(state): State<RoleGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token(req.headers(), &state.cookie_name)
        .ok_or_else(|| AccountError::InvalidToken.into_response())?;

    let identity = state
        .codec
        .extract_identity(&token)
        .map_err(|e| e.into_response())?;

    if !identity.has_any_role(&state.required_roles) {
        return Err(AccountError::InsufficientRole.into_response());
    }

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token_prefers_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session=cookie-token"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );

        assert_eq!(
            extract_token(&headers, "session"),
            Some("cookie-token".to_string())
        );
    }

    #[test]
    fn test_extract_token_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );

        assert_eq!(
            extract_token(&headers, "session"),
            Some("header-token".to_string())
        );
    }

    #[test]
    fn test_extract_token_rejects_non_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );

        assert_eq!(extract_token(&headers, "session"), None);
        assert_eq!(extract_token(&HeaderMap::new(), "session"), None);
    }
}
