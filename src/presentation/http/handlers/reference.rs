//! Reference Data Handlers

use axum::{extract::State, Json};

use crate::domain::{FeatureProperty, SocialNetwork};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_feature_properties(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeatureProperty>>, AppError> {
    Ok(Json(state.feature_property_service.properties().await?))
}

pub async fn list_social_networks(
    State(state): State<AppState>,
) -> Result<Json<Vec<SocialNetwork>>, AppError> {
    Ok(Json(state.feature_property_service.social_networks().await?))
}
