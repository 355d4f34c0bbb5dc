//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the database schema and domain User entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use super::social_network_repository::replace_links;
use crate::domain::{DeletedUser, NewSocialNetworkLink, Role, User, UserRepository};
use crate::infrastructure::database::TransactionContext;
use crate::shared::error::AppError;

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    id: i64,
    email: String,
    phone_number: String,
    first_name: String,
    password_hash: String,
    has_permit_to_show_phone_number: bool,
    has_permit_to_show_email: bool,
    active: bool,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    pub(crate) fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            phone_number: self.phone_number,
            first_name: self.first_name,
            password_hash: self.password_hash,
            has_permit_to_show_phone_number: self.has_permit_to_show_phone_number,
            has_permit_to_show_email: self.has_permit_to_show_email,
            active: self.active,
            role: Role::from_str(&self.role),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Column list shared by every user query; `u` aliases the users table.
pub(crate) const USER_COLUMNS: &str = "u.id, u.email, u.phone_number, u.first_name, u.password_hash, \
     u.has_permit_to_show_phone_number, u.has_permit_to_show_email, u.active, u.role, \
     u.created_at, u.updated_at";

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn email_conflict(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("User with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

async fn insert_user(conn: &mut PgConnection, user: &User) -> Result<User, AppError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users AS u (id, email, phone_number, first_name, password_hash,
                           has_permit_to_show_phone_number, has_permit_to_show_email,
                           active, role, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.phone_number)
    .bind(&user.first_name)
    .bind(&user.password_hash)
    .bind(user.has_permit_to_show_phone_number)
    .bind(user.has_permit_to_show_email)
    .bind(user.active)
    .bind(user.role.as_str())
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(conn)
    .await
    .map_err(email_conflict)?;

    Ok(row.into_user())
}

async fn update_user(conn: &mut PgConnection, user: &User) -> Result<User, AppError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        UPDATE users AS u
        SET phone_number = $2,
            first_name = $3,
            password_hash = $4,
            has_permit_to_show_phone_number = $5,
            has_permit_to_show_email = $6,
            active = $7,
            role = $8,
            updated_at = NOW()
        WHERE u.id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user.id)
    .bind(&user.phone_number)
    .bind(&user.first_name)
    .bind(&user.password_hash)
    .bind(user.has_permit_to_show_phone_number)
    .bind(user.has_permit_to_show_email)
    .bind(user.active)
    .bind(user.role.as_str())
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user.id)))?;

    Ok(row.into_user())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn create(&self, user: &User, links: &[NewSocialNetworkLink]) -> Result<User, AppError> {
        let mut ctx = TransactionContext::begin(&self.pool).await?;

        let user = insert_user(ctx.conn(), user).await?;
        replace_links(ctx.conn(), user.id, links).await?;

        ctx.commit().await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut conn = self.pool.acquire().await?;
        update_user(&mut conn, user).await
    }

    async fn update_with_links(
        &self,
        user: &User,
        links: &[NewSocialNetworkLink],
    ) -> Result<User, AppError> {
        let mut ctx = TransactionContext::begin(&self.pool).await?;

        let user = update_user(ctx.conn(), user).await?;
        replace_links(ctx.conn(), user.id, links).await?;

        ctx.commit().await?;
        Ok(user)
    }

    /// Record the tombstone, drop pets nobody else owns and hard-delete the
    /// user in one transaction. Owner links, social links and authored
    /// features cascade.
    async fn delete(&self, tombstone: &DeletedUser) -> Result<u64, AppError> {
        let mut ctx = TransactionContext::begin(&self.pool).await?;

        sqlx::query(
            r#"
            INSERT INTO deleted_users (id, user_id, email, phone_number, first_name,
                                       user_created_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(tombstone.id)
        .bind(tombstone.user_id)
        .bind(&tombstone.email)
        .bind(&tombstone.phone_number)
        .bind(&tombstone.first_name)
        .bind(tombstone.user_created_at)
        .bind(tombstone.deleted_at)
        .execute(ctx.conn())
        .await?;

        let orphans = sqlx::query(
            r#"
            DELETE FROM pets p
            WHERE EXISTS (SELECT 1 FROM pet_owners o WHERE o.pet_id = p.id AND o.user_id = $1)
              AND NOT EXISTS (SELECT 1 FROM pet_owners o WHERE o.pet_id = p.id AND o.user_id <> $1)
            "#,
        )
        .bind(tombstone.user_id)
        .execute(ctx.conn())
        .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(tombstone.user_id)
            .execute(ctx.conn())
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the context rolls back the tombstone and the pets.
            return Err(AppError::NotFound(format!(
                "User with id {} not found",
                tombstone.user_id
            )));
        }

        ctx.commit().await?;
        Ok(orphans.rows_affected())
    }
}
