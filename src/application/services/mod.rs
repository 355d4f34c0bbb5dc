//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Login and JWT validation
//! - **UserService**: Registration, profiles, account removal, pet registration
//! - **PetService**: Pet lookup, editing, removal, listing and images
//! - **FeaturePropertyService**: Reference lists for forms

pub mod auth_service;
pub mod feature_property_service;
pub mod pet_service;
pub mod user_service;

mod pet_support;

#[cfg(test)]
mod test_support;

// Re-export auth service types
pub use auth_service::{AuthError, AuthService, AuthServiceImpl, AuthTokens, Claims};

// Re-export user service types
pub use user_service::{UserError, UserService, UserServiceImpl};

// Re-export pet service types
pub use pet_service::{PetError, PetService, PetServiceImpl};

pub use feature_property_service::{FeaturePropertyService, FeaturePropertyServiceImpl};
