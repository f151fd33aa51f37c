// Axum authentication middleware

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::api::responses::ApiError;
use crate::auth::service::AuthService;
use crate::core::errors::EventsError;

/// Authentication state containing all dependencies
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService>,
}

/// Authentication middleware function
///
/// Extracts the bearer token from the `Authorization` header, resolves it to
/// a `User`, and inserts that user into request extensions for handlers.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())
        .ok_or_else(|| EventsError::Unauthenticated("Missing bearer token".to_string()))?;

    let user = auth_state.auth_service.resolve_current_user(&token)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extract a bearer token from request headers
///
/// The scheme is matched case-insensitively; an empty token counts as missing.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
