//! Pet features and the controlled property list.
//!
//! Maps to the `features` and `feature_properties` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Controlled vocabulary entry a feature is recorded against
/// (e.g. "Allergy", "Special marks").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureProperty {
    pub id: i64,
    pub name: String,
}

/// A free-text note about a pet, recorded by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: i64,
    pub pet_id: i64,
    pub property_id: i64,
    /// Author
    pub user_id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A feature joined with its property name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureView {
    pub id: i64,
    pub property_id: i64,
    pub property_name: String,
    pub user_id: i64,
    pub description: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureRepository: Send + Sync {
    /// Features of a pet, oldest first.
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Vec<FeatureView>, AppError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeaturePropertyRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<FeatureProperty>, AppError>;
}
