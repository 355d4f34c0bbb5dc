//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::{LoginRequest, TokenResponse, UserInfoDto, UserRegistrationDto};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<UserRegistrationDto>,
) -> Result<(StatusCode, Json<UserInfoDto>), AppError> {
    validate(&body)?;

    let user = state.user_service.create_user(body).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    validate(&body)?;

    let tokens = state
        .auth_service
        .login(&body.email, &body.password)
        .await?;

    Ok(Json(TokenResponse::from(tokens)))
}
