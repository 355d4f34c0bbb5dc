//! Deleted-user tombstone.
//!
//! Maps to the `deleted_users` table. Tombstones are written by
//! [`UserRepository::delete`](super::UserRepository::delete) in the same
//! transaction that removes the live record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// Audit copy of the identifying fields of a removed account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedUser {
    pub id: i64,
    /// ID the live record had
    pub user_id: i64,
    pub email: String,
    pub phone_number: String,
    pub first_name: String,
    /// When the original account was created
    pub user_created_at: DateTime<Utc>,
    pub deleted_at: DateTime<Utc>,
}

impl DeletedUser {
    pub fn from_user(id: i64, user: &User) -> Self {
        Self {
            id,
            user_id: user.id,
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            first_name: user.first_name.clone(),
            user_created_at: user.created_at,
            deleted_at: Utc::now(),
        }
    }
}
