//! Many-to-many membership between users and user groups.

use sqlx::FromRow;
use timetrack_core::types::{DbId, Timestamp};

/// A row from the `user_group_memberships` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserGroupMembership {
    pub id: DbId,
    pub user_id: DbId,
    pub user_group_id: DbId,
    pub created_at: Timestamp,
}
