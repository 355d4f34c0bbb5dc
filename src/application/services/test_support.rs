//! Mock repositories and fixtures for service unit tests.

use std::sync::Arc;

use crate::domain::{
    MockFeaturePropertyRepository, MockFeatureRepository, MockPetImageRepository,
    MockPetRepository, MockSocialNetworkRepository, MockUserRepository, Pet, Principal,
    Repositories, Role, Sex, User,
};

pub const EMAIL: &str = "test@test";
pub const PHONE: &str = "+70001110000";
pub const FIRST_NAME: &str = "John";
pub const CHIP_ID: &str = "999999999999999";
pub const STAMP_ID: &str = "TTT 1111";
pub const DEFAULT_IMAGE: &str = "default_pet.png";

/// One mock per repository; set expectations, then call `into_repositories`.
#[derive(Default)]
pub struct Mocks {
    pub users: MockUserRepository,
    pub pets: MockPetRepository,
    pub pet_images: MockPetImageRepository,
    pub features: MockFeatureRepository,
    pub feature_properties: MockFeaturePropertyRepository,
    pub social_networks: MockSocialNetworkRepository,
}

impl Mocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_repositories(self) -> Repositories {
        Repositories {
            users: Arc::new(self.users),
            pets: Arc::new(self.pets),
            pet_images: Arc::new(self.pet_images),
            features: Arc::new(self.features),
            feature_properties: Arc::new(self.feature_properties),
            social_networks: Arc::new(self.social_networks),
        }
    }

    /// Let `load_pet_info` run for any pet: no owners, features or links.
    pub fn allow_pet_info(&mut self) {
        self.pets.expect_find_owners().returning(|_| Ok(vec![]));
        self.features.expect_find_by_pet_id().returning(|_| Ok(vec![]));
    }
}

pub fn user(id: i64) -> User {
    User::new(id, EMAIL, PHONE, FIRST_NAME, "ENCODED_PASSWORD", true, true)
}

pub fn pet(id: i64) -> Pet {
    Pet::new(id, CHIP_ID, STAMP_ID, "Cat", "Unknown", Sex::Female, "Pancake", DEFAULT_IMAGE)
}

pub fn principal(user: &User) -> Principal {
    Principal {
        user_id: user.id,
        email: user.email.clone(),
        role: Role::User,
    }
}
