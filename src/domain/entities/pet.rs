//! Pet entity and repository trait.
//!
//! Maps to the `pets` table; ownership lives in `pet_owners`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Feature, PetImage, User};
use crate::shared::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// A registered animal.
///
/// Maps to the `pets` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - chip_id: VARCHAR(15) NOT NULL UNIQUE
/// - stamp_id: VARCHAR(32) NOT NULL UNIQUE
/// - pet_type, breed, name: VARCHAR NOT NULL
/// - sex: VARCHAR(8) NOT NULL
/// - image_name: VARCHAR(255) NOT NULL
/// - created_at / updated_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,

    /// Transponder code, unique among pets
    pub chip_id: String,

    /// Tattoo/stamp code, unique among pets
    pub stamp_id: String,

    /// Species, e.g. "Cat"
    pub pet_type: String,

    pub breed: String,

    pub sex: Sex,

    pub name: String,

    /// Generated image filename, or the configured default image
    pub image_name: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Pet {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        chip_id: impl Into<String>,
        stamp_id: impl Into<String>,
        pet_type: impl Into<String>,
        breed: impl Into<String>,
        sex: Sex,
        name: impl Into<String>,
        image_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            chip_id: chip_id.into(),
            stamp_id: stamp_id.into(),
            pet_type: pet_type.into(),
            breed: breed.into(),
            sex,
            name: name.into(),
            image_name: image_name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Rows written in the same transaction as a pet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetAttachments {
    /// Replaces any stored image of the pet
    pub image: Option<PetImage>,
    /// Appended to the pet's features
    pub features: Vec<Feature>,
}

/// Repository trait for Pet data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Pet>, AppError>;

    async fn find_by_chip_id(&self, chip_id: &str) -> Result<Option<Pet>, AppError>;

    async fn find_by_stamp_id(&self, stamp_id: &str) -> Result<Option<Pet>, AppError>;

    /// Pets owned by a user, oldest first.
    async fn find_by_owner(&self, user_id: i64) -> Result<Vec<Pet>, AppError>;

    /// One page of all pets ordered by creation time.
    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<Pet>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Insert a pet, its first owner link and its attachments atomically.
    async fn create(
        &self,
        pet: &Pet,
        owner_id: i64,
        attachments: &PetAttachments,
    ) -> Result<Pet, AppError>;

    /// Update the pet row and store its attachments atomically.
    async fn update(&self, pet: &Pet, attachments: &PetAttachments) -> Result<Pet, AppError>;

    /// Remove a pet; its features, image and owner links cascade.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Drop one owner link and delete the pet if no owner is left, in one
    /// transaction. Returns whether the pet was deleted.
    async fn detach_owner(&self, pet_id: i64, user_id: i64) -> Result<bool, AppError>;

    async fn find_owners(&self, pet_id: i64) -> Result<Vec<User>, AppError>;

    async fn is_owner(&self, pet_id: i64, user_id: i64) -> Result<bool, AppError>;
}
