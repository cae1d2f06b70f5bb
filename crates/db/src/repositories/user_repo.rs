//! Repository for the `users` table.

use sqlx::PgPool;
use timetrack_core::roles::ROLE_ADMIN;
use timetrack_core::types::DbId;

use crate::models::user::{CreateUser, LegacyGroupAssignment, User, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, first_name, last_name, role, vacation_days, \
                       is_active, requires_password_change, user_group_id, created_at, updated_at";

/// Provides the user queries the setup scripts need.
pub struct UserRepo;

impl UserRepo {
    /// Total number of users, active or not.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, first_name, last_name, role, \
                                vacation_days, is_active, requires_password_change, user_group_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.role)
            .bind(input.vacation_days)
            .bind(input.is_active)
            .bind(input.requires_password_change)
            .bind(input.user_group_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// The oldest administrator, if any exists.
    pub async fn find_first_admin(pool: &PgPool) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE role = $1 ORDER BY id ASC LIMIT 1");
        sqlx::query_as::<_, User>(&query)
            .bind(ROLE_ADMIN)
            .fetch_optional(pool)
            .await
    }

    /// Every administrator, oldest first.
    pub async fn list_admins(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, email, first_name, last_name FROM users WHERE role = $1 ORDER BY id ASC",
        )
        .bind(ROLE_ADMIN)
        .fetch_all(pool)
        .await
    }

    /// Replace a user's password hash, re-activate the account and set the
    /// forced-change flag. Returns `true` if the row was updated.
    pub async fn reset_credentials(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
        requires_password_change: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                password_hash = $2,
                requires_password_change = $3,
                is_active = true
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .bind(requires_password_change)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Users whose legacy `user_group_id` is set, ordered by ID.
    pub async fn list_with_legacy_group(
        pool: &PgPool,
    ) -> Result<Vec<LegacyGroupAssignment>, sqlx::Error> {
        sqlx::query_as::<_, LegacyGroupAssignment>(
            "SELECT id, user_group_id, first_name, last_name
             FROM users
             WHERE user_group_id IS NOT NULL
             ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
