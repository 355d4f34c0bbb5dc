//! Social networks and users' profile links.
//!
//! Maps to the `social_networks` and `user_social_networks` tables.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A supported network (Telegram, VK, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialNetwork {
    pub id: i64,
    pub title: String,
}

/// A user's profile link on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialNetworkLink {
    pub social_network_id: i64,
    pub title: String,
    pub link: String,
}

/// Link to be stored for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSocialNetworkLink {
    pub social_network_id: i64,
    pub link: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialNetworkRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<SocialNetwork>, AppError>;

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<SocialNetworkLink>, AppError>;
}
