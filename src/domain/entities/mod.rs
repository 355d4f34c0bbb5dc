//! # Domain Entities
//!
//! Core domain entities of the pet registry. All entities map directly to
//! their corresponding database tables.
//!
//! ## Core Entities
//!
//! - **User**: owner account with credentials, contact details and visibility permits
//! - **Pet**: animal record identified by chip ID and stamp ID
//!
//! ## Supporting Entities
//!
//! - **DeletedUser**: tombstone kept after an account is removed
//! - **PetImage**: uploaded picture of a pet
//! - **Feature / FeatureProperty**: notes about a pet against a controlled property list
//! - **SocialNetwork**: networks a user can link a profile on
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod user;
mod deleted_user;
mod pet;
mod pet_image;
mod feature;
mod social_network;

pub use user::{Role, User, UserRepository};

pub use deleted_user::DeletedUser;

pub use pet::{Pet, PetAttachments, PetRepository, Sex};

pub use pet_image::{ImageUpload, PetImage, PetImageRepository};

pub use feature::{
    Feature, FeatureProperty, FeaturePropertyRepository, FeatureRepository, FeatureView,
};

pub use social_network::{
    NewSocialNetworkLink, SocialNetwork, SocialNetworkLink, SocialNetworkRepository,
};

#[cfg(test)]
pub use feature::{MockFeaturePropertyRepository, MockFeatureRepository};
#[cfg(test)]
pub use pet::MockPetRepository;
#[cfg(test)]
pub use pet_image::MockPetImageRepository;
#[cfg(test)]
pub use social_network::MockSocialNetworkRepository;
#[cfg(test)]
pub use user::MockUserRepository;
