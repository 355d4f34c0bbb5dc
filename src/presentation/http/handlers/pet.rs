//! Pet Handlers

use axum::{
    extract::{Extension, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::application::dto::{PetCreationDto, PetEditDto, PetInfoDto};
use crate::domain::{Page, PageRequest, Principal};
use crate::presentation::http::extractors::PetForm;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// List all pets, one page at a time
pub async fn list_pets(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<PetInfoDto>>, AppError> {
    let pets = state.pet_service.pets_list(page).await?;
    Ok(Json(pets))
}

/// Register a pet owned by the caller
pub async fn create_pet(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    form: PetForm<PetCreationDto>,
) -> Result<(StatusCode, Json<PetInfoDto>), AppError> {
    validate(&form.pet)?;

    let pet = state
        .user_service
        .create_pet(form.pet, form.image, &principal)
        .await?;

    Ok((StatusCode::CREATED, Json(pet)))
}

/// Find a pet by chip ID or stamp ID
pub async fn search_pet(
    State(state): State<AppState>,
    Path(parameter): Path<String>,
) -> Result<Json<PetInfoDto>, AppError> {
    let pet = state
        .pet_service
        .get_pet_info_by_search_parameter(&parameter)
        .await?;

    Ok(Json(pet))
}

/// Pre-filled edit form of a pet
pub async fn get_pet_edit_form(
    State(state): State<AppState>,
    Path(chip_id): Path<String>,
) -> Result<Json<PetEditDto>, AppError> {
    let form = state.pet_service.get_pet_edit_dto_by_chip_id(&chip_id).await?;
    Ok(Json(form))
}

/// Update a pet owned by the caller
pub async fn update_pet(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(pet_id): Path<i64>,
    form: PetForm<PetEditDto>,
) -> Result<Json<PetInfoDto>, AppError> {
    validate(&form.pet)?;

    let pet = state
        .pet_service
        .update_pet(pet_id, form.pet, form.image, &principal)
        .await?;

    Ok(Json(pet))
}

/// Detach the caller from a pet
pub async fn delete_pet(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(pet_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.pet_service.delete_pet(pet_id, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Raw image bytes of a pet
pub async fn get_pet_image(
    State(state): State<AppState>,
    Path(pet_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let image = state.pet_service.pet_image(pet_id).await?;

    // Anything not declared as an image is served as an opaque download.
    let (content_type, disposition) = match image.content_type.clone() {
        Some(content_type) if image.is_image() => (content_type, "inline"),
        _ => ("application/octet-stream".to_string(), "attachment"),
    };
    let disposition = format!(
        "{disposition}; filename=\"{}\"",
        image.image_name.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.data,
    ))
}
