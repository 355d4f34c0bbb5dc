//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{NewSocialNetworkLink, Sex};
use crate::shared::validation::validate_chip_id;

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Social network link as submitted by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SocialNetworkPostDto {
    pub social_network_id: i64,

    #[validate(length(min = 1, max = 255, message = "Link must be 1-255 characters"))]
    pub link: String,
}

impl From<&SocialNetworkPostDto> for NewSocialNetworkLink {
    fn from(dto: &SocialNetworkPostDto) -> Self {
        Self {
            social_network_id: dto.social_network_id,
            link: dto.link.clone(),
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserRegistrationDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 5, max = 20, message = "Phone number must be 5-20 characters"))]
    pub phone_number: String,

    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub has_permit_to_show_phone_number: bool,

    #[serde(default)]
    pub has_permit_to_show_email: bool,

    #[serde(default)]
    #[validate(nested)]
    pub social_networks: Vec<SocialNetworkPostDto>,
}

/// Profile edit request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserEditDto {
    /// Identifies the account being edited; must be the caller's own.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 5, max = 20, message = "Phone number must be 5-20 characters"))]
    pub phone_number: Option<String>,

    /// Blank means "keep the current password".
    pub password: Option<String>,

    pub has_permit_to_show_email: Option<bool>,

    pub has_permit_to_show_phone_number: Option<bool>,

    #[validate(nested)]
    pub social_networks: Option<Vec<SocialNetworkPostDto>>,
}

/// New feature for a pet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FeatureCreationDto {
    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,

    pub property_id: i64,
}

/// Pet registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PetCreationDto {
    #[validate(custom(function = "validate_chip_id"))]
    pub chip_id: String,

    #[validate(length(min = 1, max = 32, message = "Stamp ID must be 1-32 characters"))]
    pub stamp_id: String,

    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64, message = "Type must be 1-64 characters"))]
    pub pet_type: String,

    #[validate(length(min = 1, max = 64, message = "Breed must be 1-64 characters"))]
    pub breed: String,

    pub sex: Sex,

    #[serde(default)]
    #[validate(nested)]
    pub features: Vec<FeatureCreationDto>,
}

/// Pet edit form: served pre-filled, submitted back to update a pet.
///
/// `features` lists features to add; existing ones are never dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PetEditDto {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64, message = "Type must be 1-64 characters"))]
    pub pet_type: String,

    #[validate(length(min = 1, max = 64, message = "Breed must be 1-64 characters"))]
    pub breed: String,

    pub sex: Sex,

    #[serde(default)]
    #[validate(nested)]
    pub features: Vec<FeatureCreationDto>,

    #[serde(default, skip_deserializing)]
    pub image_name: Option<String>,
}

/// User lookup query parameters
#[derive(Debug, Deserialize)]
pub struct UserQueryParams {
    pub email: String,
}
