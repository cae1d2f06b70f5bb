//! Repository for the `modules` table.

use sqlx::PgPool;

use crate::models::module::{Module, UpsertModule};

const COLUMNS: &str =
    "id, key, name, description, icon, route, is_active, sort_order, created_at, updated_at";

/// Provides lookups and writes for feature modules, keyed by `modules.key`.
pub struct ModuleRepo;

impl ModuleRepo {
    /// Find a module by its natural key.
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE key = $1");
        sqlx::query_as::<_, Module>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new module. Fails with a unique violation if the key exists.
    pub async fn create(pool: &PgPool, input: &UpsertModule) -> Result<Module, sqlx::Error> {
        let query = format!(
            "INSERT INTO modules (key, name, description, icon, route, is_active, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(&input.key)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(&input.route)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Insert the module, or overwrite every descriptive field of the
    /// existing row with the same key.
    pub async fn upsert(pool: &PgPool, input: &UpsertModule) -> Result<Module, sqlx::Error> {
        let query = format!(
            "INSERT INTO modules (key, name, description, icon, route, is_active, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (key) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                icon = EXCLUDED.icon,
                route = EXCLUDED.route,
                is_active = EXCLUDED.is_active,
                sort_order = EXCLUDED.sort_order
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(&input.key)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(&input.route)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// All modules ordered by `sort_order`, then name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules ORDER BY sort_order ASC, name ASC");
        sqlx::query_as::<_, Module>(&query).fetch_all(pool).await
    }
}
