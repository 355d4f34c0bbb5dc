//! Response DTOs
//!
//! Data structures for API response bodies, and the one-way entity→DTO
//! mapping functions that build them.

use serde::{Deserialize, Serialize};

use crate::application::services::AuthTokens;
use crate::domain::{FeatureView, Pet, Sex, SocialNetworkLink, User};

use super::request::PetEditDto;

/// Authentication tokens response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl From<AuthTokens> for TokenResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// A user's link on a social network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialNetworkInfoDto {
    pub social_network_id: String,
    pub title: String,
    pub link: String,
}

impl From<SocialNetworkLink> for SocialNetworkInfoDto {
    fn from(link: SocialNetworkLink) -> Self {
        Self {
            social_network_id: link.social_network_id.to_string(),
            title: link.title,
            link: link.link,
        }
    }
}

fn social_dtos(links: Vec<SocialNetworkLink>) -> Vec<SocialNetworkInfoDto> {
    links.into_iter().map(SocialNetworkInfoDto::from).collect()
}

/// Full profile of a user, as seen by the user themselves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfoDto {
    pub user_id: String,
    pub first_name: String,
    pub email: String,
    pub phone_number: String,
    pub has_permit_to_show_email: bool,
    pub has_permit_to_show_phone_number: bool,
    pub social_networks: Vec<SocialNetworkInfoDto>,
}

impl UserInfoDto {
    pub fn from_user(user: User, links: Vec<SocialNetworkLink>) -> Self {
        Self {
            user_id: user.id.to_string(),
            first_name: user.first_name,
            email: user.email,
            phone_number: user.phone_number,
            has_permit_to_show_email: user.has_permit_to_show_email,
            has_permit_to_show_phone_number: user.has_permit_to_show_phone_number,
            social_networks: social_dtos(links),
        }
    }
}

/// Owner contact card shown on a pet page. Contact fields follow the
/// owner's visibility permits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCardDto {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub social_networks: Vec<SocialNetworkInfoDto>,
}

impl UserCardDto {
    pub fn from_user(user: &User, links: Vec<SocialNetworkLink>) -> Self {
        Self {
            first_name: user.first_name.clone(),
            email: user.visible_email().map(str::to_owned),
            phone_number: user.visible_phone_number().map(str::to_owned),
            social_networks: social_dtos(links),
        }
    }
}

/// Feature shown on a pet page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInfoDto {
    pub property_id: String,
    pub property: String,
    pub description: String,
}

impl From<FeatureView> for FeatureInfoDto {
    fn from(feature: FeatureView) -> Self {
        Self {
            property_id: feature.property_id.to_string(),
            property: feature.property_name,
            description: feature.description,
        }
    }
}

/// Public pet page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetInfoDto {
    pub pet_id: String,
    pub chip_id: String,
    pub stamp_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub breed: String,
    pub sex: Sex,
    pub owners: Vec<UserCardDto>,
    pub features: Vec<FeatureInfoDto>,
    pub image_name: String,
}

impl PetInfoDto {
    pub fn from_parts(pet: Pet, owners: Vec<UserCardDto>, features: Vec<FeatureView>) -> Self {
        Self {
            pet_id: pet.id.to_string(),
            chip_id: pet.chip_id,
            stamp_id: pet.stamp_id,
            name: pet.name,
            pet_type: pet.pet_type,
            breed: pet.breed,
            sex: pet.sex,
            owners,
            features: features.into_iter().map(FeatureInfoDto::from).collect(),
            image_name: pet.image_name,
        }
    }
}

/// Pet summary in the personal cabinet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetCardDto {
    pub pet_id: String,
    pub chip_id: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub name: String,
    pub image_name: String,
}

impl From<Pet> for PetCardDto {
    fn from(pet: Pet) -> Self {
        Self {
            pet_id: pet.id.to_string(),
            chip_id: pet.chip_id,
            pet_type: pet.pet_type,
            name: pet.name,
            image_name: pet.image_name,
        }
    }
}

/// The caller's own profile with their pets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalCabinetDto {
    pub first_name: String,
    pub email: String,
    pub phone_number: String,
    pub social_networks: Vec<SocialNetworkInfoDto>,
    pub pets: Vec<PetCardDto>,
}

impl PersonalCabinetDto {
    pub fn from_parts(user: User, links: Vec<SocialNetworkLink>, pets: Vec<Pet>) -> Self {
        Self {
            first_name: user.first_name,
            email: user.email,
            phone_number: user.phone_number,
            social_networks: social_dtos(links),
            pets: pets.into_iter().map(PetCardDto::from).collect(),
        }
    }
}

impl From<Pet> for PetEditDto {
    /// Pre-filled edit form; the list of features to add starts empty.
    fn from(pet: Pet) -> Self {
        Self {
            name: pet.name,
            pet_type: pet.pet_type,
            breed: pet.breed,
            sex: pet.sex,
            features: Vec::new(),
            image_name: Some(pet.image_name),
        }
    }
}
