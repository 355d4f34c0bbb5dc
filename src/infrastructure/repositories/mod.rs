//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgUserRepository** - User accounts and deleted-user tombstones
//! - **PgPetRepository** - Pets and the `pet_owners` link table
//! - **PgPetImageRepository** - Uploaded pet images
//! - **PgFeatureRepository** / **PgFeaturePropertyRepository** - Pet features and their properties
//! - **PgSocialNetworkRepository** - Social networks and users' links
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use pet_registry::infrastructure::repositories::postgres_repositories;
//!
//! let repos = postgres_repositories(pool.clone());
//! let pet = repos.pets.find_by_chip_id("999999999999999").await?;
//! ```

pub mod feature_repository;
pub mod pet_image_repository;
pub mod pet_repository;
pub mod social_network_repository;
pub mod user_repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::Repositories;

pub use feature_repository::{PgFeaturePropertyRepository, PgFeatureRepository};
pub use pet_image_repository::PgPetImageRepository;
pub use pet_repository::PgPetRepository;
pub use social_network_repository::PgSocialNetworkRepository;
pub use user_repository::PgUserRepository;

/// Wire every repository port to PostgreSQL.
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        pets: Arc::new(PgPetRepository::new(pool.clone())),
        pet_images: Arc::new(PgPetImageRepository::new(pool.clone())),
        features: Arc::new(PgFeatureRepository::new(pool.clone())),
        feature_properties: Arc::new(PgFeaturePropertyRepository::new(pool.clone())),
        social_networks: Arc::new(PgSocialNetworkRepository::new(pool)),
    }
}
