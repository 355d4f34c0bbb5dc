//! Pet Image Repository Implementation
//!
//! Image bytes are stored in PostgreSQL, one row per pet.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use crate::domain::{PetImage, PetImageRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct PetImageRow {
    pet_id: i64,
    image_name: String,
    content_type: Option<String>,
    size: i64,
    data: Vec<u8>,
}

impl From<PetImageRow> for PetImage {
    fn from(row: PetImageRow) -> Self {
        Self {
            pet_id: row.pet_id,
            image_name: row.image_name,
            content_type: row.content_type,
            size: row.size,
            data: row.data,
        }
    }
}

/// Insert or replace the image of a pet.
pub(crate) async fn upsert_image(conn: &mut PgConnection, image: &PetImage) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO pet_images (pet_id, image_name, content_type, size, data)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (pet_id) DO UPDATE
        SET image_name = EXCLUDED.image_name,
            content_type = EXCLUDED.content_type,
            size = EXCLUDED.size,
            data = EXCLUDED.data,
            created_at = NOW()
        "#,
    )
    .bind(image.pet_id)
    .bind(&image.image_name)
    .bind(&image.content_type)
    .bind(image.size)
    .bind(&image.data)
    .execute(conn)
    .await?;

    Ok(())
}

/// PostgreSQL pet image repository implementation.
#[derive(Clone)]
pub struct PgPetImageRepository {
    pool: PgPool,
}

impl PgPetImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetImageRepository for PgPetImageRepository {
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Option<PetImage>, AppError> {
        let row = sqlx::query_as::<_, PetImageRow>(
            r#"
            SELECT pet_id, image_name, content_type, size, data
            FROM pet_images
            WHERE pet_id = $1
            "#,
        )
        .bind(pet_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PetImage::from))
    }
}
