//! Repository for the `user_groups` table.

use sqlx::PgPool;
use timetrack_core::types::DbId;

use crate::models::user_group::{CreateUserGroup, UserGroup};

const COLUMNS: &str = "id, name, description, color, is_active, created_at, updated_at";

/// Provides CRUD operations for user groups.
pub struct UserGroupRepo;

impl UserGroupRepo {
    /// Insert a new group, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUserGroup) -> Result<UserGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_groups (name, description, color)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserGroup>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a group by exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<UserGroup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_groups WHERE name = $1");
        sqlx::query_as::<_, UserGroup>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// All groups, active or not, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserGroup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_groups ORDER BY name ASC");
        sqlx::query_as::<_, UserGroup>(&query).fetch_all(pool).await
    }

    /// Active groups only, ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<UserGroup>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM user_groups WHERE is_active = true ORDER BY name ASC");
        sqlx::query_as::<_, UserGroup>(&query).fetch_all(pool).await
    }

    /// Toggle `is_active`. Returns `true` if the row was updated.
    pub async fn set_active(pool: &PgPool, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE user_groups SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
