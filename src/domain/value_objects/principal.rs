//! Authenticated caller identity.

use serde::{Deserialize, Serialize};

use crate::domain::{Role, User};

/// The caller a request is executed on behalf of, as carried by the access
/// token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this caller may modify or remove the given account.
    pub fn can_manage_user(&self, user_id: i64) -> bool {
        self.user_id == user_id || self.is_admin()
    }

    /// Whether this caller may read the full profile, contacts included,
    /// of the account registered under `email`.
    pub fn can_view_profile(&self, email: &str) -> bool {
        self.email == email || self.is_admin()
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}
