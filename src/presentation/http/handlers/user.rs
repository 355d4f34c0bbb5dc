//! User Handlers

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{PersonalCabinetDto, PetInfoDto, UserEditDto, UserInfoDto, UserQueryParams};
use crate::domain::Principal;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Full profile by email; only for the account itself and admins
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<UserQueryParams>,
) -> Result<Json<UserInfoDto>, AppError> {
    if !principal.can_view_profile(&params.email) {
        tracing::warn!(principal = principal.user_id, "Profile lookup for another user rejected");
        return Err(AppError::Forbidden("Cannot view another user's profile".into()));
    }

    let user = state.user_service.get_user_info_by_email(&params.email).await?;
    Ok(Json(user))
}

/// Personal cabinet of the authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<PersonalCabinetDto>, AppError> {
    let cabinet = state
        .user_service
        .get_personal_cabinet_by_email(&principal.email)
        .await?;

    Ok(Json(cabinet))
}

/// Update the authenticated user's profile
pub async fn update_current_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<UserEditDto>,
) -> Result<Json<UserInfoDto>, AppError> {
    validate(&body)?;

    let user = state.user_service.update_user_info(body, &principal).await?;
    Ok(Json(user))
}

/// Delete an account; allowed for its owner and for admins
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !principal.can_manage_user(user_id) {
        return Err(AppError::Forbidden("Cannot delete another user".into()));
    }

    state.user_service.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pets owned by a user
pub async fn get_user_pets(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<PetInfoDto>>, AppError> {
    let pets = state.user_service.pets_list_by_user_id(user_id).await?;
    Ok(Json(pets))
}
