//! Pet Repository Implementation
//!
//! PostgreSQL implementation of the PetRepository trait, including the
//! `pet_owners` link table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use super::feature_repository::insert_features;
use super::pet_image_repository::upsert_image;
use super::user_repository::{UserRow, USER_COLUMNS};
use crate::domain::{Pet, PetAttachments, PetRepository, Sex, User};
use crate::infrastructure::database::{with_transaction, TransactionContext};
use crate::shared::error::AppError;

/// Database row representation matching the pets table schema.
#[derive(Debug, sqlx::FromRow)]
struct PetRow {
    id: i64,
    chip_id: String,
    stamp_id: String,
    pet_type: String,
    breed: String,
    sex: String,
    name: String,
    image_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PetRow {
    fn into_pet(self) -> Result<Pet, AppError> {
        let sex = Sex::from_str(&self.sex).ok_or_else(|| {
            AppError::Internal(format!("Pet {} has unknown sex '{}'", self.id, self.sex))
        })?;

        Ok(Pet {
            id: self.id,
            chip_id: self.chip_id,
            stamp_id: self.stamp_id,
            pet_type: self.pet_type,
            breed: self.breed,
            sex,
            name: self.name,
            image_name: self.image_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PET_COLUMNS: &str =
    "p.id, p.chip_id, p.stamp_id, p.pet_type, p.breed, p.sex, p.name, p.image_name, \
     p.created_at, p.updated_at";

fn into_pets(rows: Vec<PetRow>) -> Result<Vec<Pet>, AppError> {
    rows.into_iter().map(PetRow::into_pet).collect()
}

async fn write_attachments(
    conn: &mut PgConnection,
    attachments: &PetAttachments,
) -> Result<(), AppError> {
    if let Some(image) = &attachments.image {
        upsert_image(&mut *conn, image).await?;
    }
    insert_features(conn, &attachments.features).await
}

/// PostgreSQL pet repository implementation.
#[derive(Clone)]
pub struct PgPetRepository {
    pool: PgPool,
}

impl PgPetRepository {
    /// Create a new PgPetRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Pet>, AppError> {
        let row = sqlx::query_as::<_, PetRow>(&format!(
            "SELECT {PET_COLUMNS} FROM pets p WHERE p.{column} = $1"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PetRow::into_pet).transpose()
    }
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Pet>, AppError> {
        let row = sqlx::query_as::<_, PetRow>(&format!(
            "SELECT {PET_COLUMNS} FROM pets p WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PetRow::into_pet).transpose()
    }

    async fn find_by_chip_id(&self, chip_id: &str) -> Result<Option<Pet>, AppError> {
        self.find_one("chip_id", chip_id).await
    }

    async fn find_by_stamp_id(&self, stamp_id: &str) -> Result<Option<Pet>, AppError> {
        self.find_one("stamp_id", stamp_id).await
    }

    async fn find_by_owner(&self, user_id: i64) -> Result<Vec<Pet>, AppError> {
        let rows = sqlx::query_as::<_, PetRow>(&format!(
            r#"
            SELECT {PET_COLUMNS}
            FROM pets p
            INNER JOIN pet_owners o ON o.pet_id = p.id
            WHERE o.user_id = $1
            ORDER BY p.created_at, p.id
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        into_pets(rows)
    }

    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<Pet>, AppError> {
        let rows = sqlx::query_as::<_, PetRow>(&format!(
            r#"
            SELECT {PET_COLUMNS}
            FROM pets p
            ORDER BY p.created_at, p.id
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        into_pets(rows)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pets")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(
        &self,
        pet: &Pet,
        owner_id: i64,
        attachments: &PetAttachments,
    ) -> Result<Pet, AppError> {
        with_transaction(&self.pool, |mut ctx| async move {
            let row = sqlx::query_as::<_, PetRow>(&format!(
                r#"
                INSERT INTO pets AS p (id, chip_id, stamp_id, pet_type, breed, sex, name,
                                       image_name, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING {PET_COLUMNS}
                "#
            ))
            .bind(pet.id)
            .bind(&pet.chip_id)
            .bind(&pet.stamp_id)
            .bind(&pet.pet_type)
            .bind(&pet.breed)
            .bind(pet.sex.as_str())
            .bind(&pet.name)
            .bind(&pet.image_name)
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .fetch_one(ctx.conn())
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::Conflict("Pet with this chip ID or stamp ID already exists".to_string())
                }
                _ => AppError::Database(e),
            })?;

            sqlx::query("INSERT INTO pet_owners (pet_id, user_id) VALUES ($1, $2)")
                .bind(pet.id)
                .bind(owner_id)
                .execute(ctx.conn())
                .await?;

            write_attachments(ctx.conn(), attachments).await?;

            Ok((row, ctx))
        })
        .await?
        .into_pet()
    }

    async fn update(&self, pet: &Pet, attachments: &PetAttachments) -> Result<Pet, AppError> {
        with_transaction(&self.pool, |mut ctx| async move {
            let row = sqlx::query_as::<_, PetRow>(&format!(
                r#"
                UPDATE pets AS p
                SET pet_type = $2,
                    breed = $3,
                    sex = $4,
                    name = $5,
                    image_name = $6,
                    updated_at = NOW()
                WHERE p.id = $1
                RETURNING {PET_COLUMNS}
                "#
            ))
            .bind(pet.id)
            .bind(&pet.pet_type)
            .bind(&pet.breed)
            .bind(pet.sex.as_str())
            .bind(&pet.name)
            .bind(&pet.image_name)
            .fetch_optional(ctx.conn())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pet with id {} not found", pet.id)))?;

            write_attachments(ctx.conn(), attachments).await?;

            Ok((row, ctx))
        })
        .await?
        .into_pet()
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Pet with id {} not found", id)));
        }

        Ok(())
    }

    async fn detach_owner(&self, pet_id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut ctx = TransactionContext::begin(&self.pool).await?;

        sqlx::query("DELETE FROM pet_owners WHERE pet_id = $1 AND user_id = $2")
            .bind(pet_id)
            .bind(user_id)
            .execute(ctx.conn())
            .await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM pets p
            WHERE p.id = $1
              AND NOT EXISTS (SELECT 1 FROM pet_owners o WHERE o.pet_id = p.id)
            "#,
        )
        .bind(pet_id)
        .execute(ctx.conn())
        .await?;
        let orphaned = deleted.rows_affected() > 0;

        ctx.commit().await?;

        if orphaned {
            tracing::info!(pet_id, "Removed pet without owners");
        }
        Ok(orphaned)
    }

    async fn find_owners(&self, pet_id: i64) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u
            INNER JOIN pet_owners o ON o.user_id = u.id
            WHERE o.pet_id = $1
            ORDER BY o.created_at
            "#
        ))
        .bind(pet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn is_owner(&self, pet_id: i64, user_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM pet_owners WHERE pet_id = $1 AND user_id = $2)",
        )
        .bind(pet_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
