//! Pet image entity and repository trait.
//!
//! Maps to the `pet_images` table: one stored upload per pet.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// An uploaded picture of a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetImage {
    pub pet_id: i64,

    /// `<uuid>_<original filename>`
    pub image_name: String,

    /// MIME type reported by the client
    pub content_type: Option<String>,

    /// Payload size in bytes
    pub size: i64,

    #[serde(skip)]
    pub data: Vec<u8>,
}

impl PetImage {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false)
    }
}

/// A file received from a client, not yet attached to a pet.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Unique stored filename for this upload.
    pub fn generated_name(&self) -> String {
        format!("{}_{}", uuid::Uuid::new_v4(), self.file_name)
    }

    /// Turn the upload into a stored image for `pet_id`.
    pub fn into_pet_image(self, pet_id: i64, image_name: String) -> PetImage {
        PetImage {
            pet_id,
            image_name,
            content_type: self.content_type,
            size: self.data.len() as i64,
            data: self.data,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetImageRepository: Send + Sync {
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Option<PetImage>, AppError>;
}
