//! Authentication Middleware
//!
//! JWT validation middleware for protected routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    RequestExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::application::services::AuthError;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authentication middleware that validates JWT tokens.
///
/// On success the caller's [`Principal`](crate::domain::Principal) is
/// inserted into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = request
        .extract_parts::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| AppError::Unauthorized("Missing or malformed authorization header".into()))?;

    let principal = state
        .auth_service
        .validate_token(bearer.token())
        .await
        .map_err(|e| match e {
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            AuthError::Internal(msg) => AppError::Internal(msg),
            _ => AppError::Unauthorized("Invalid token".into()),
        })?;

    tracing::debug!(user_id = principal.user_id, "Request authenticated");
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
