//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DeletedUser, NewSocialNetworkLink};
use crate::shared::error::AppError;

/// Account role matching the database VARCHAR constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered pet owner.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - phone_number: VARCHAR(20) NOT NULL
/// - first_name: VARCHAR(64) NOT NULL
/// - password_hash: VARCHAR(255) NOT NULL
/// - has_permit_to_show_phone_number: BOOLEAN NOT NULL
/// - has_permit_to_show_email: BOOLEAN NOT NULL
/// - active: BOOLEAN NOT NULL
/// - role: VARCHAR(16) NOT NULL DEFAULT 'user'
/// - created_at / updated_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Email address, the external identity key
    pub email: String,

    pub phone_number: String,

    pub first_name: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub has_permit_to_show_phone_number: bool,

    pub has_permit_to_show_email: bool,

    /// False once an account has been deactivated
    pub active: bool,

    #[serde(default)]
    pub role: Role,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh, active account with the `user` role.
    pub fn new(
        id: i64,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        first_name: impl Into<String>,
        password_hash: impl Into<String>,
        has_permit_to_show_phone_number: bool,
        has_permit_to_show_email: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.into(),
            phone_number: phone_number.into(),
            first_name: first_name.into(),
            password_hash: password_hash.into(),
            has_permit_to_show_phone_number,
            has_permit_to_show_email,
            active: true,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Email as shown to other users, if the owner allows it.
    pub fn visible_email(&self) -> Option<&str> {
        self.has_permit_to_show_email.then_some(self.email.as_str())
    }

    /// Phone number as shown to other users, if the owner allows it.
    pub fn visible_phone_number(&self) -> Option<&str> {
        self.has_permit_to_show_phone_number
            .then_some(self.phone_number.as_str())
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Insert a new user together with their social links.
    async fn create(&self, user: &User, links: &[NewSocialNetworkLink]) -> Result<User, AppError>;

    /// Persist every mutable column of an existing user.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Persist the user and replace all of their social links atomically.
    async fn update_with_links(
        &self,
        user: &User,
        links: &[NewSocialNetworkLink],
    ) -> Result<User, AppError>;

    /// Atomically write the tombstone, delete pets only this user owns and
    /// remove the live user. Social links, remaining ownership links and
    /// authored features go with it. Returns the number of pets deleted.
    async fn delete(&self, tombstone: &DeletedUser) -> Result<u64, AppError>;
}
