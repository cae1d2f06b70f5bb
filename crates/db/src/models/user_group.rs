//! User group entity model.

use sqlx::FromRow;
use timetrack_core::types::{DbId, Timestamp};

/// A row from the `user_groups` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserGroup {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user group.
#[derive(Debug, Clone, Default)]
pub struct CreateUserGroup {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}
