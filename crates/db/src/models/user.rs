//! User entity model and DTOs.

use sqlx::FromRow;
use timetrack_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash. Never log or serialize it; use
/// [`UserSummary`] for output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub vacation_days: i32,
    pub is_active: bool,
    pub requires_password_change: bool,
    /// Legacy single-group assignment.
    pub user_group_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Password-free projection used by listings and log output.
#[derive(Debug, Clone, FromRow)]
pub struct UserSummary {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A user still carrying a legacy `user_group_id`.
#[derive(Debug, Clone, FromRow)]
pub struct LegacyGroupAssignment {
    pub id: DbId,
    pub user_group_id: DbId,
    pub first_name: String,
    pub last_name: String,
}

impl LegacyGroupAssignment {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub vacation_days: i32,
    pub is_active: bool,
    pub requires_password_change: bool,
    pub user_group_id: Option<DbId>,
}
