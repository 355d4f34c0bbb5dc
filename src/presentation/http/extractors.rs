//! Custom Extractors
//!
//! Axum extractors for request parsing.

use std::path::Path;

use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::application::services::PetError;
use crate::domain::ImageUpload;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Multipart pet form: a JSON `pet` part plus an optional `image` file part.
#[derive(Debug)]
pub struct PetForm<T> {
    pub pet: T,
    pub image: Option<ImageUpload>,
}

impl<T> FromRequest<AppState> for PetForm<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let max_image_bytes = state.settings.uploads.max_image_bytes;

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let mut pet = None;
        let mut image = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            match field.name() {
                Some("pet") => {
                    let text = field.text().await.map_err(multipart_error)?;
                    let parsed = serde_json::from_str::<T>(&text)
                        .map_err(|e| AppError::BadRequest(format!("Invalid pet JSON: {}", e)))?;
                    pet = Some(parsed);
                }
                Some("image") => {
                    let file_name = sanitize_file_name(field.file_name());
                    let content_type = field.content_type().map(str::to_owned);
                    let data = field.bytes().await.map_err(multipart_error)?;

                    if data.len() > max_image_bytes {
                        return Err(PetError::ImageTooLarge(max_image_bytes).into());
                    }

                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
                _ => {}
            }
        }

        let pet = pet.ok_or_else(|| AppError::BadRequest("Missing 'pet' form part".into()))?;
        Ok(Self { pet, image })
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        PetError::ImageRead(e.body_text()).into()
    }
}

/// Keep only the final path component of a client-supplied filename.
fn sanitize_file_name(name: Option<&str>) -> String {
    name.and_then(|n| Path::new(n).file_name())
        .and_then(|n| n.to_str())
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "image".to_string())
}
