//! User Service
//!
//! Handles registration, profile editing, account removal and the pets a
//! user owns.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::{
    PersonalCabinetDto, PetCreationDto, PetInfoDto, SocialNetworkPostDto, UserEditDto,
    UserInfoDto, UserRegistrationDto,
};
use crate::domain::services::PasswordEncoder;
use crate::domain::{
    DeletedUser, ImageUpload, NewSocialNetworkLink, Pet, PetAttachments, Principal, Repositories,
    User,
};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

use super::pet_service::PetError;
use super::pet_support::{build_features, load_pet_info};

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account, or revive a deactivated one with the same email
    async fn create_user(&self, registration: UserRegistrationDto) -> Result<UserInfoDto, UserError>;

    /// Apply a profile edit on behalf of its owner
    async fn update_user_info(
        &self,
        edit: UserEditDto,
        principal: &Principal,
    ) -> Result<UserInfoDto, UserError>;

    /// Remove an account, leaving a tombstone and dropping pets nobody else owns
    async fn delete_user(&self, user_id: i64) -> Result<(), UserError>;

    /// Register a pet owned by the principal
    async fn create_pet(
        &self,
        pet: PetCreationDto,
        image: Option<ImageUpload>,
        principal: &Principal,
    ) -> Result<PetInfoDto, PetError>;

    /// All pets of a user
    async fn pets_list_by_user_id(&self, user_id: i64) -> Result<Vec<PetInfoDto>, UserError>;

    /// Profile by email
    async fn get_user_info_by_email(&self, email: &str) -> Result<UserInfoDto, UserError>;

    /// Profile with social links and pet cards
    async fn get_personal_cabinet_by_email(&self, email: &str) -> Result<PersonalCabinetDto, UserError>;

    /// Account lookup by its login (the email)
    async fn load_user_by_username(&self, username: &str) -> Result<User, UserError>;
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("User with this email already exists")]
    AlreadyExists,

    #[error("No access to this user")]
    AccessDenied,

    #[error("Unknown social network {0}")]
    UnknownSocialNetwork(i64),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for UserError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Conflict(_) => UserError::AlreadyExists,
            e => UserError::Internal(e.to_string()),
        }
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound => AppError::NotFound(e.to_string()),
            UserError::AlreadyExists => AppError::Conflict(e.to_string()),
            UserError::AccessDenied => AppError::Forbidden(e.to_string()),
            UserError::UnknownSocialNetwork(_) => AppError::Validation(e.to_string()),
            UserError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// UserService implementation
pub struct UserServiceImpl {
    repos: Repositories,
    password_encoder: Arc<dyn PasswordEncoder>,
    id_generator: Arc<SnowflakeGenerator>,
    default_pet_image_name: String,
}

impl UserServiceImpl {
    pub fn new(
        repos: Repositories,
        password_encoder: Arc<dyn PasswordEncoder>,
        id_generator: Arc<SnowflakeGenerator>,
        default_pet_image_name: impl Into<String>,
    ) -> Self {
        Self {
            repos,
            password_encoder,
            id_generator,
            default_pet_image_name: default_pet_image_name.into(),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repos
            .users
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound)
    }

    /// Check every submitted network against the known list.
    async fn social_links(
        &self,
        dtos: &[SocialNetworkPostDto],
    ) -> Result<Vec<NewSocialNetworkLink>, UserError> {
        if dtos.is_empty() {
            return Ok(Vec::new());
        }

        let known: HashSet<i64> = self
            .repos
            .social_networks
            .find_all()
            .await?
            .into_iter()
            .map(|n| n.id)
            .collect();

        dtos.iter()
            .map(|dto| {
                if known.contains(&dto.social_network_id) {
                    Ok(NewSocialNetworkLink::from(dto))
                } else {
                    Err(UserError::UnknownSocialNetwork(dto.social_network_id))
                }
            })
            .collect()
    }

    async fn user_info(&self, user: User) -> Result<UserInfoDto, UserError> {
        let links = self.repos.social_networks.find_by_user_id(user.id).await?;
        Ok(UserInfoDto::from_user(user, links))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, registration: UserRegistrationDto) -> Result<UserInfoDto, UserError> {
        let links = self.social_links(&registration.social_networks).await?;
        let password_hash = self.password_encoder.encode(&registration.password)?;

        let user = match self.repos.users.find_by_email(&registration.email).await? {
            Some(existing) if existing.active => {
                tracing::debug!(email = %registration.email, "Registration for an active email");
                return Err(UserError::AlreadyExists);
            }
            Some(mut inactive) => {
                inactive.phone_number = registration.phone_number;
                inactive.first_name = registration.first_name;
                inactive.password_hash = password_hash;
                inactive.has_permit_to_show_phone_number = registration.has_permit_to_show_phone_number;
                inactive.has_permit_to_show_email = registration.has_permit_to_show_email;
                inactive.active = true;
                inactive.updated_at = Utc::now();

                tracing::info!(user_id = inactive.id, "Reactivating user");
                self.repos.users.update_with_links(&inactive, &links).await?
            }
            None => {
                let user = User::new(
                    self.id_generator.generate(),
                    registration.email,
                    registration.phone_number,
                    registration.first_name,
                    password_hash,
                    registration.has_permit_to_show_phone_number,
                    registration.has_permit_to_show_email,
                );

                tracing::info!(user_id = user.id, "Creating user");
                self.repos.users.create(&user, &links).await?
            }
        };

        self.user_info(user).await
    }

    async fn update_user_info(
        &self,
        edit: UserEditDto,
        principal: &Principal,
    ) -> Result<UserInfoDto, UserError> {
        let mut user = self.find_by_email(&edit.email).await?;

        if principal.email != edit.email {
            tracing::warn!(
                principal = principal.user_id,
                target_user = user.id,
                "Profile edit for another user rejected"
            );
            return Err(UserError::AccessDenied);
        }

        if let Some(first_name) = edit.first_name {
            user.first_name = first_name;
        }
        if let Some(phone_number) = edit.phone_number {
            user.phone_number = phone_number;
        }
        if let Some(password) = edit.password.filter(|p| !p.trim().is_empty()) {
            user.password_hash = self.password_encoder.encode(&password)?;
        }
        if let Some(show_email) = edit.has_permit_to_show_email {
            user.has_permit_to_show_email = show_email;
        }
        if let Some(show_phone) = edit.has_permit_to_show_phone_number {
            user.has_permit_to_show_phone_number = show_phone;
        }
        user.updated_at = Utc::now();

        let links = match &edit.social_networks {
            Some(dtos) => Some(self.social_links(dtos).await?),
            None => None,
        };

        let user = match links {
            Some(links) => self.repos.users.update_with_links(&user, &links).await?,
            None => self.repos.users.update(&user).await?,
        };

        self.user_info(user).await
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), UserError> {
        let user = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        let tombstone = DeletedUser::from_user(self.id_generator.generate(), &user);
        let removed = self.repos.users.delete(&tombstone).await?;

        tracing::info!(user_id, removed_pets = removed, "User deleted");
        Ok(())
    }

    async fn create_pet(
        &self,
        dto: PetCreationDto,
        image: Option<ImageUpload>,
        principal: &Principal,
    ) -> Result<PetInfoDto, PetError> {
        let owner = self
            .repos
            .users
            .find_by_id(principal.user_id)
            .await?
            .ok_or(PetError::OwnerNotFound)?;

        if self.repos.pets.find_by_chip_id(&dto.chip_id).await?.is_some()
            || self.repos.pets.find_by_stamp_id(&dto.stamp_id).await?.is_some()
        {
            return Err(PetError::AlreadyExists);
        }

        let pet_id = self.id_generator.generate();
        let features = build_features(
            &self.repos,
            &self.id_generator,
            pet_id,
            owner.id,
            &dto.features,
        )
        .await?;

        let image = image.filter(|upload| !upload.is_empty());
        let image_name = match &image {
            Some(upload) => upload.generated_name(),
            None => self.default_pet_image_name.clone(),
        };
        let attachments = PetAttachments {
            image: image.map(|upload| upload.into_pet_image(pet_id, image_name.clone())),
            features,
        };

        let pet = Pet::new(
            pet_id,
            dto.chip_id,
            dto.stamp_id,
            dto.pet_type,
            dto.breed,
            dto.sex,
            dto.name,
            image_name,
        );
        let pet = self.repos.pets.create(&pet, owner.id, &attachments).await?;

        tracing::info!(
            pet_id = pet.id,
            owner_id = owner.id,
            features = attachments.features.len(),
            "Pet created"
        );

        Ok(load_pet_info(&self.repos, pet).await?)
    }

    async fn pets_list_by_user_id(&self, user_id: i64) -> Result<Vec<PetInfoDto>, UserError> {
        self.repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        let pets = self.repos.pets.find_by_owner(user_id).await?;

        let mut infos = Vec::with_capacity(pets.len());
        for pet in pets {
            infos.push(load_pet_info(&self.repos, pet).await?);
        }
        Ok(infos)
    }

    async fn get_user_info_by_email(&self, email: &str) -> Result<UserInfoDto, UserError> {
        let user = self.find_by_email(email).await?;
        self.user_info(user).await
    }

    async fn get_personal_cabinet_by_email(&self, email: &str) -> Result<PersonalCabinetDto, UserError> {
        let user = self.find_by_email(email).await?;
        let links = self.repos.social_networks.find_by_user_id(user.id).await?;
        let pets = self.repos.pets.find_by_owner(user.id).await?;

        Ok(PersonalCabinetDto::from_parts(user, links, pets))
    }

    async fn load_user_by_username(&self, username: &str) -> Result<User, UserError> {
        self.find_by_email(username).await
    }
}
