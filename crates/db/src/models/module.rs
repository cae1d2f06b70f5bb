//! Feature-module entity model and DTOs.

use sqlx::FromRow;
use timetrack_core::modules::ModuleDefinition;
use timetrack_core::types::{DbId, Timestamp};

/// A row from the `modules` table.
#[derive(Debug, Clone, FromRow)]
pub struct Module {
    pub id: DbId,
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub route: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting or upserting a module by key.
#[derive(Debug, Clone)]
pub struct UpsertModule {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub route: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl From<&ModuleDefinition> for UpsertModule {
    fn from(def: &ModuleDefinition) -> Self {
        Self {
            key: def.key.to_string(),
            name: def.name.to_string(),
            description: Some(def.description.to_string()),
            icon: Some(def.icon.to_string()),
            route: Some(def.route.to_string()),
            is_active: true,
            sort_order: def.sort_order,
        }
    }
}
