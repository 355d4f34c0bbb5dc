//! Pet Service
//!
//! Lookup, editing, removal and listing of pet records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::{PetEditDto, PetInfoDto};
use crate::domain::{
    ImageUpload, Page, PageRequest, PetAttachments, PetImage, Principal, Repositories, User,
};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

use super::pet_support::{build_features, load_pet_info};

/// Pet service trait
#[async_trait]
pub trait PetService: Send + Sync {
    /// Find a pet by chip ID, falling back to stamp ID
    async fn get_pet_info_by_search_parameter(&self, parameter: &str) -> Result<PetInfoDto, PetError>;

    /// Pre-filled edit form for a pet
    async fn get_pet_edit_dto_by_chip_id(&self, chip_id: &str) -> Result<PetEditDto, PetError>;

    /// Update a pet owned by the principal
    async fn update_pet(
        &self,
        pet_id: i64,
        edit: PetEditDto,
        image: Option<ImageUpload>,
        principal: &Principal,
    ) -> Result<PetInfoDto, PetError>;

    /// Drop the principal's ownership; the pet goes once nobody owns it
    async fn delete_pet(&self, pet_id: i64, principal: &Principal) -> Result<(), PetError>;

    /// Page through all pets
    async fn pets_list(&self, request: PageRequest) -> Result<Page<PetInfoDto>, PetError>;

    /// Stored image of a pet
    async fn pet_image(&self, pet_id: i64) -> Result<PetImage, PetError>;
}

/// Pet service errors
#[derive(Debug, thiserror::Error)]
pub enum PetError {
    #[error("Pet not found")]
    NotFound,

    #[error("User not found")]
    OwnerNotFound,

    #[error("Pet with this chip ID or stamp ID already exists")]
    AlreadyExists,

    #[error("No access to this pet")]
    AccessDenied,

    #[error("Unknown feature property {0}")]
    UnknownFeatureProperty(i64),

    #[error("Failed to read pet image: {0}")]
    ImageRead(String),

    #[error("Pet image exceeds {0} bytes")]
    ImageTooLarge(usize),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for PetError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Conflict(_) => PetError::AlreadyExists,
            e => PetError::Internal(e.to_string()),
        }
    }
}

impl From<PetError> for AppError {
    fn from(e: PetError) -> Self {
        match e {
            PetError::NotFound | PetError::OwnerNotFound => AppError::NotFound(e.to_string()),
            PetError::AlreadyExists => AppError::Conflict(e.to_string()),
            PetError::AccessDenied => AppError::Forbidden(e.to_string()),
            PetError::UnknownFeatureProperty(_) => AppError::Validation(e.to_string()),
            PetError::ImageRead(_) => AppError::BadRequest(e.to_string()),
            PetError::ImageTooLarge(_) => AppError::PayloadTooLarge(e.to_string()),
            PetError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// PetService implementation
pub struct PetServiceImpl {
    repos: Repositories,
    id_generator: Arc<SnowflakeGenerator>,
}

impl PetServiceImpl {
    pub fn new(repos: Repositories, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self { repos, id_generator }
    }

    /// Resolve the principal to a stored account.
    async fn principal_user(&self, principal: &Principal) -> Result<User, PetError> {
        self.repos
            .users
            .find_by_email(&principal.email)
            .await?
            .ok_or(PetError::OwnerNotFound)
    }
}

#[async_trait]
impl PetService for PetServiceImpl {
    async fn get_pet_info_by_search_parameter(&self, parameter: &str) -> Result<PetInfoDto, PetError> {
        let pet = match self.repos.pets.find_by_chip_id(parameter).await? {
            Some(pet) => pet,
            None => self
                .repos
                .pets
                .find_by_stamp_id(parameter)
                .await?
                .ok_or(PetError::NotFound)?,
        };

        Ok(load_pet_info(&self.repos, pet).await?)
    }

    async fn get_pet_edit_dto_by_chip_id(&self, chip_id: &str) -> Result<PetEditDto, PetError> {
        let pet = self
            .repos
            .pets
            .find_by_chip_id(chip_id)
            .await?
            .ok_or(PetError::NotFound)?;

        Ok(PetEditDto::from(pet))
    }

    async fn update_pet(
        &self,
        pet_id: i64,
        edit: PetEditDto,
        image: Option<ImageUpload>,
        principal: &Principal,
    ) -> Result<PetInfoDto, PetError> {
        let mut pet = self
            .repos
            .pets
            .find_by_id(pet_id)
            .await?
            .ok_or(PetError::NotFound)?;

        let user = self.principal_user(principal).await?;
        if !user.is_admin() && !self.repos.pets.is_owner(pet.id, user.id).await? {
            tracing::warn!(pet_id, user_id = user.id, "Pet update denied");
            return Err(PetError::AccessDenied);
        }

        let features = build_features(
            &self.repos,
            &self.id_generator,
            pet.id,
            user.id,
            &edit.features,
        )
        .await?;

        pet.name = edit.name;
        pet.pet_type = edit.pet_type;
        pet.breed = edit.breed;
        pet.sex = edit.sex;
        pet.updated_at = Utc::now();

        let image = image.filter(|upload| !upload.is_empty()).map(|upload| {
            pet.image_name = upload.generated_name();
            upload.into_pet_image(pet.id, pet.image_name.clone())
        });
        let attachments = PetAttachments { image, features };

        let pet = self.repos.pets.update(&pet, &attachments).await?;

        tracing::info!(
            pet_id,
            added_features = attachments.features.len(),
            "Pet updated"
        );

        Ok(load_pet_info(&self.repos, pet).await?)
    }

    async fn delete_pet(&self, pet_id: i64, principal: &Principal) -> Result<(), PetError> {
        let pet = self
            .repos
            .pets
            .find_by_id(pet_id)
            .await?
            .ok_or(PetError::NotFound)?;

        let user = self.principal_user(principal).await?;

        if self.repos.pets.is_owner(pet.id, user.id).await? {
            self.repos.pets.detach_owner(pet.id, user.id).await?;
        } else if user.is_admin() {
            self.repos.pets.delete(pet.id).await?;
        } else {
            return Err(PetError::AccessDenied);
        }

        tracing::info!(pet_id, user_id = user.id, "Pet detached from owner");
        Ok(())
    }

    async fn pets_list(&self, request: PageRequest) -> Result<Page<PetInfoDto>, PetError> {
        let request = request.normalized();
        let total = self.repos.pets.count().await?;
        if total == 0 {
            return Ok(Page::empty(request));
        }

        let pets = self
            .repos
            .pets
            .find_page(request.limit(), request.offset())
            .await?;

        let mut content = Vec::with_capacity(pets.len());
        for pet in pets {
            content.push(load_pet_info(&self.repos, pet).await?);
        }

        Ok(Page::new(content, request, total))
    }

    async fn pet_image(&self, pet_id: i64) -> Result<PetImage, PetError> {
        self.repos
            .pets
            .find_by_id(pet_id)
            .await?
            .ok_or(PetError::NotFound)?;

        self.repos
            .pet_images
            .find_by_pet_id(pet_id)
            .await?
            .ok_or(PetError::NotFound)
    }
}
