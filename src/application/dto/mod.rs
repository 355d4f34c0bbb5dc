//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    FeatureCreationDto, LoginRequest, PetCreationDto, PetEditDto, SocialNetworkPostDto,
    UserEditDto, UserQueryParams, UserRegistrationDto,
};
pub use response::{
    FeatureInfoDto, PersonalCabinetDto, PetCardDto, PetInfoDto, SocialNetworkInfoDto,
    TokenResponse, UserCardDto, UserInfoDto,
};
