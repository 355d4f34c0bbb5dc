//! Reference data used by the pet and profile forms.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    FeatureProperty, FeaturePropertyRepository, SocialNetwork, SocialNetworkRepository,
};
use crate::shared::error::AppError;

#[async_trait]
pub trait FeaturePropertyService: Send + Sync {
    /// Every feature property a pet feature can refer to
    async fn properties(&self) -> Result<Vec<FeatureProperty>, AppError>;

    /// Every social network a profile can link to
    async fn social_networks(&self) -> Result<Vec<SocialNetwork>, AppError>;
}

pub struct FeaturePropertyServiceImpl {
    properties: Arc<dyn FeaturePropertyRepository>,
    social_networks: Arc<dyn SocialNetworkRepository>,
}

impl FeaturePropertyServiceImpl {
    pub fn new(
        properties: Arc<dyn FeaturePropertyRepository>,
        social_networks: Arc<dyn SocialNetworkRepository>,
    ) -> Self {
        Self {
            properties,
            social_networks,
        }
    }
}

#[async_trait]
impl FeaturePropertyService for FeaturePropertyServiceImpl {
    async fn properties(&self) -> Result<Vec<FeatureProperty>, AppError> {
        self.properties.find_all().await
    }

    async fn social_networks(&self) -> Result<Vec<SocialNetwork>, AppError> {
        self.social_networks.find_all().await
    }
}
