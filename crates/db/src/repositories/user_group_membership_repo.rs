//! Repository for the `user_group_memberships` join table.

use sqlx::PgPool;
use timetrack_core::types::DbId;

use crate::models::user_group_membership::UserGroupMembership;

const COLUMNS: &str = "id, user_id, user_group_id, created_at";

pub struct UserGroupMembershipRepo;

impl UserGroupMembershipRepo {
    /// Add `user_id` to `user_group_id` unless the membership exists.
    ///
    /// Returns the new row, or `None` if the user was already a member.
    pub async fn insert_if_missing(
        pool: &PgPool,
        user_id: DbId,
        user_group_id: DbId,
    ) -> Result<Option<UserGroupMembership>, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_group_memberships (user_id, user_group_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, user_group_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserGroupMembership>(&query)
            .bind(user_id)
            .bind(user_group_id)
            .fetch_optional(pool)
            .await
    }

    /// All memberships of a user, ordered by group ID.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserGroupMembership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_group_memberships WHERE user_id = $1 \
             ORDER BY user_group_id ASC"
        );
        sqlx::query_as::<_, UserGroupMembership>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_group_memberships")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
