//! Feature and Feature Property Repository Implementations

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use crate::domain::{
    Feature, FeatureProperty, FeaturePropertyRepository, FeatureRepository, FeatureView,
};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct FeatureViewRow {
    id: i64,
    property_id: i64,
    property_name: String,
    user_id: i64,
    description: String,
}

impl From<FeatureViewRow> for FeatureView {
    fn from(row: FeatureViewRow) -> Self {
        Self {
            id: row.id,
            property_id: row.property_id,
            property_name: row.property_name,
            user_id: row.user_id,
            description: row.description,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FeaturePropertyRow {
    id: i64,
    name: String,
}

impl From<FeaturePropertyRow> for FeatureProperty {
    fn from(row: FeaturePropertyRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Insert features on an open connection, usually a pet write transaction.
pub(crate) async fn insert_features(
    conn: &mut PgConnection,
    features: &[Feature],
) -> Result<(), AppError> {
    for feature in features {
        sqlx::query(
            r#"
            INSERT INTO features (id, pet_id, property_id, user_id, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(feature.id)
        .bind(feature.pet_id)
        .bind(feature.property_id)
        .bind(feature.user_id)
        .bind(&feature.description)
        .bind(feature.created_at)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// PostgreSQL feature repository implementation.
#[derive(Clone)]
pub struct PgFeatureRepository {
    pool: PgPool,
}

impl PgFeatureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeatureRepository for PgFeatureRepository {
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Vec<FeatureView>, AppError> {
        let rows = sqlx::query_as::<_, FeatureViewRow>(
            r#"
            SELECT f.id, f.property_id, fp.name AS property_name, f.user_id, f.description
            FROM features f
            INNER JOIN feature_properties fp ON fp.id = f.property_id
            WHERE f.pet_id = $1
            ORDER BY f.created_at, f.id
            "#,
        )
        .bind(pet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FeatureView::from).collect())
    }
}

/// PostgreSQL feature property repository implementation.
#[derive(Clone)]
pub struct PgFeaturePropertyRepository {
    pool: PgPool,
}

impl PgFeaturePropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeaturePropertyRepository for PgFeaturePropertyRepository {
    async fn find_all(&self) -> Result<Vec<FeatureProperty>, AppError> {
        let rows = sqlx::query_as::<_, FeaturePropertyRow>(
            "SELECT id, name FROM feature_properties ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FeatureProperty::from).collect())
    }
}
