//! Module access (per-group permission) entity model.

use sqlx::FromRow;
use timetrack_core::permissions::ModulePermissions;
use timetrack_core::types::{DbId, Timestamp};

/// A row from the `module_access` table.
#[derive(Debug, Clone, FromRow)]
pub struct ModuleAccess {
    pub id: DbId,
    pub module_id: DbId,
    pub user_group_id: DbId,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ModuleAccess {
    pub fn permissions(&self) -> ModulePermissions {
        ModulePermissions {
            can_view: self.can_view,
            can_create: self.can_create,
            can_edit: self.can_edit,
            can_delete: self.can_delete,
        }
    }
}

/// A user's grant on one module, joined with the state of the granting group.
#[derive(Debug, Clone, FromRow)]
pub struct UserModuleGrant {
    pub user_group_id: DbId,
    pub group_is_active: bool,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl UserModuleGrant {
    pub fn permissions(&self) -> ModulePermissions {
        ModulePermissions {
            can_view: self.can_view,
            can_create: self.can_create,
            can_edit: self.can_edit,
            can_delete: self.can_delete,
        }
    }
}
