use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller context, inserted into request extensions by the gate.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Bearer-token gate layered over the protected routes. Runs before any
/// handler, so a rejected request never reaches storage.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;
    let user_id = state.tokens.verify(token)?;

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`. Every shape
/// problem (missing header, wrong scheme, empty token) is the same
/// `Malformed` rejection.
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers.get("authorization").ok_or(AuthError::Malformed)?;
    let auth_str = auth_header.to_str().map_err(|_| AuthError::Malformed)?;

    let token = auth_str.strip_prefix("Bearer ").ok_or(AuthError::Malformed)?;
    if token.trim().is_empty() {
        return Err(AuthError::Malformed);
    }

    Ok(token)
}
