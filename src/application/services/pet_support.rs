//! Pet helpers shared by the user and pet services.

use std::collections::HashSet;

use chrono::Utc;

use crate::application::dto::{FeatureCreationDto, PetInfoDto, UserCardDto};
use crate::domain::{Feature, Pet, Repositories};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

use super::pet_service::PetError;

/// Load owners and features of a pet and map it to its public page.
pub(crate) async fn load_pet_info(repos: &Repositories, pet: Pet) -> Result<PetInfoDto, AppError> {
    let owners = repos.pets.find_owners(pet.id).await?;

    let mut cards = Vec::with_capacity(owners.len());
    for owner in &owners {
        let links = repos.social_networks.find_by_user_id(owner.id).await?;
        cards.push(UserCardDto::from_user(owner, links));
    }

    let features = repos.features.find_by_pet_id(pet.id).await?;

    Ok(PetInfoDto::from_parts(pet, cards, features))
}

/// Map submitted features onto `pet_id`, authored by `author_id`.
///
/// Every property must exist; the property list is only fetched when there
/// is something to check.
pub(crate) async fn build_features(
    repos: &Repositories,
    id_generator: &SnowflakeGenerator,
    pet_id: i64,
    author_id: i64,
    dtos: &[FeatureCreationDto],
) -> Result<Vec<Feature>, PetError> {
    if dtos.is_empty() {
        return Ok(Vec::new());
    }

    let known: HashSet<i64> = repos
        .feature_properties
        .find_all()
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();

    let now = Utc::now();
    dtos.iter()
        .map(|dto| {
            if !known.contains(&dto.property_id) {
                return Err(PetError::UnknownFeatureProperty(dto.property_id));
            }
            Ok(Feature {
                id: id_generator.generate(),
                pet_id,
                property_id: dto.property_id,
                user_id: author_id,
                description: dto.description.clone(),
                created_at: now,
            })
        })
        .collect()
}
