//! # Domain Layer
//!
//! The domain layer contains the core business types of the pet registry.
//! It is independent of any web framework or database driver.
//!
//! ## Structure
//!
//! - **entities**: Users, pets, images, features and social links
//! - **value_objects**: Principal and pagination types
//! - **services**: Password hashing seam
//! - **repositories**: The bundle of repository ports services depend on
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use repositories::Repositories;
pub use value_objects::*;
