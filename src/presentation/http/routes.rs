//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use super::handlers;
use crate::presentation::middleware::auth_middleware;
use crate::startup::AppState;

/// Headroom above the largest image for the JSON part and multipart framing
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.settings.uploads.max_image_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state))
}

/// Routes anyone may call
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/users/{user_id}/pets", get(handlers::user::get_user_pets))
        .route("/pets", get(handlers::pet::list_pets))
        .route("/pets/search/{parameter}", get(handlers::pet::search_pet))
        .route("/pets/{pet_id}/image", get(handlers::pet::get_pet_image))
        .route("/feature-properties", get(handlers::reference::list_feature_properties))
        .route("/social-networks", get(handlers::reference::list_social_networks))
}

/// Routes that require a valid access token
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::get_user_by_email))
        .route("/users/me", get(handlers::user::get_current_user))
        .route("/users/me", patch(handlers::user::update_current_user))
        .route("/users/{user_id}", delete(handlers::user::delete_user))
        .route("/pets", post(handlers::pet::create_pet))
        .route("/pets/chip/{chip_id}/edit", get(handlers::pet::get_pet_edit_form))
        .route("/pets/{pet_id}", put(handlers::pet::update_pet))
        .route("/pets/{pet_id}", delete(handlers::pet::delete_pet))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
