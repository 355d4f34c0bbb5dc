//! Repository bundle handed to application services.

use std::sync::Arc;

use super::entities::{
    FeaturePropertyRepository, FeatureRepository, PetImageRepository, PetRepository,
    SocialNetworkRepository, UserRepository,
};

/// Every data access port the services need, behind trait objects so the
/// same services run against PostgreSQL or test doubles.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub pets: Arc<dyn PetRepository>,
    pub pet_images: Arc<dyn PetImageRepository>,
    pub features: Arc<dyn FeatureRepository>,
    pub feature_properties: Arc<dyn FeaturePropertyRepository>,
    pub social_networks: Arc<dyn SocialNetworkRepository>,
}
