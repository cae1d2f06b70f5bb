//! Repository for the `module_access` table.
//!
//! A group holds at most one grant per module
//! (`uq_module_access_module_id_user_group_id`), so every write here is
//! keyed on the `(module_id, user_group_id)` pair.

use sqlx::PgPool;
use timetrack_core::permissions::{evaluate_access, ModulePermissions, Permission};
use timetrack_core::roles;
use timetrack_core::types::DbId;

use crate::models::module_access::{ModuleAccess, UserModuleGrant};
use crate::repositories::UserRepo;

const COLUMNS: &str = "id, module_id, user_group_id, can_view, can_create, can_edit, can_delete, \
                       created_at, updated_at";

/// Provides grant lookups and writes.
pub struct ModuleAccessRepo;

impl ModuleAccessRepo {
    /// The grant of `user_group_id` on `module_id`, if any.
    pub async fn find(
        pool: &PgPool,
        module_id: DbId,
        user_group_id: DbId,
    ) -> Result<Option<ModuleAccess>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM module_access WHERE module_id = $1 AND user_group_id = $2"
        );
        sqlx::query_as::<_, ModuleAccess>(&query)
            .bind(module_id)
            .bind(user_group_id)
            .fetch_optional(pool)
            .await
    }

    /// Create the grant, or overwrite the flags of the existing one.
    pub async fn upsert(
        pool: &PgPool,
        module_id: DbId,
        user_group_id: DbId,
        permissions: ModulePermissions,
    ) -> Result<ModuleAccess, sqlx::Error> {
        let query = format!(
            "INSERT INTO module_access
                (module_id, user_group_id, can_view, can_create, can_edit, can_delete)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (module_id, user_group_id) DO UPDATE SET
                can_view = EXCLUDED.can_view,
                can_create = EXCLUDED.can_create,
                can_edit = EXCLUDED.can_edit,
                can_delete = EXCLUDED.can_delete
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ModuleAccess>(&query)
            .bind(module_id)
            .bind(user_group_id)
            .bind(permissions.can_view)
            .bind(permissions.can_create)
            .bind(permissions.can_edit)
            .bind(permissions.can_delete)
            .fetch_one(pool)
            .await
    }

    /// Create the grant unless one already exists.
    ///
    /// Returns the new row, or `None` if the pair was already granted (its
    /// flags are left untouched).
    pub async fn insert_if_missing(
        pool: &PgPool,
        module_id: DbId,
        user_group_id: DbId,
        permissions: ModulePermissions,
    ) -> Result<Option<ModuleAccess>, sqlx::Error> {
        let query = format!(
            "INSERT INTO module_access
                (module_id, user_group_id, can_view, can_create, can_edit, can_delete)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (module_id, user_group_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ModuleAccess>(&query)
            .bind(module_id)
            .bind(user_group_id)
            .bind(permissions.can_view)
            .bind(permissions.can_create)
            .bind(permissions.can_edit)
            .bind(permissions.can_delete)
            .fetch_optional(pool)
            .await
    }

    /// All grants on a module, ordered by group ID.
    pub async fn list_for_module(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Vec<ModuleAccess>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM module_access WHERE module_id = $1 ORDER BY user_group_id ASC"
        );
        sqlx::query_as::<_, ModuleAccess>(&query)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// Number of grants on a module.
    pub async fn count_for_module(pool: &PgPool, module_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM module_access WHERE module_id = $1")
                .bind(module_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Grants the user holds on an active module, through either a
    /// membership or the legacy `users.user_group_id`.
    pub async fn find_for_user_and_module(
        pool: &PgPool,
        user_id: DbId,
        module_key: &str,
    ) -> Result<Vec<UserModuleGrant>, sqlx::Error> {
        sqlx::query_as::<_, UserModuleGrant>(
            "SELECT ma.user_group_id, g.is_active AS group_is_active,
                    ma.can_view, ma.can_create, ma.can_edit, ma.can_delete
             FROM module_access ma
             JOIN modules m ON m.id = ma.module_id
             JOIN user_groups g ON g.id = ma.user_group_id
             WHERE m.key = $2
               AND m.is_active = true
               AND (
                    g.id IN (SELECT user_group_id FROM user_group_memberships WHERE user_id = $1)
                    OR g.id = (SELECT user_group_id FROM users WHERE id = $1)
               )
             ORDER BY ma.user_group_id ASC",
        )
        .bind(user_id)
        .bind(module_key)
        .fetch_all(pool)
        .await
    }

    /// Whether the user may exercise `permission` on the module `module_key`.
    ///
    /// Unknown users are denied. Administrators are always allowed. Anyone
    /// else needs at least one active group whose grant carries the flag.
    pub async fn check_user_access(
        pool: &PgPool,
        user_id: DbId,
        module_key: &str,
        permission: Permission,
    ) -> Result<bool, sqlx::Error> {
        let Some(user) = UserRepo::find_by_id(pool, user_id).await? else {
            return Ok(false);
        };
        if roles::is_admin(&user.role) {
            return Ok(true);
        }
        let grants = Self::find_for_user_and_module(pool, user_id, module_key).await?;
        Ok(grants.iter().any(|g| {
            evaluate_access(
                &user.role,
                g.group_is_active,
                Some(&g.permissions()),
                permission,
            )
        }))
    }
}
