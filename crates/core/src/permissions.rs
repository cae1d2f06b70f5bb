//! Module permission flags and the default-grant policies used by seed scripts.
//!
//! A [`GrantPolicy`] decides which flags a user group receives when a module
//! is registered. Every grant it produces includes `can_view`.

use crate::roles;

/// View/create/edit/delete flags of a single `module_access` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModulePermissions {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl ModulePermissions {
    pub const VIEW_ONLY: Self = Self {
        can_view: true,
        can_create: false,
        can_edit: false,
        can_delete: false,
    };

    pub const FULL: Self = Self {
        can_view: true,
        can_create: true,
        can_edit: true,
        can_delete: true,
    };

    /// Whether these flags carry `permission`.
    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::View => self.can_view,
            Permission::Create => self.can_create,
            Permission::Edit => self.can_edit,
            Permission::Delete => self.can_delete,
        }
    }
}

/// A single permission checked against a module grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    View,
    Create,
    Edit,
    Delete,
}

/// Hardcoded default-permission policy applied by a module seed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantPolicy {
    /// Every group may view; nothing else.
    ViewOnly,
    /// Every group may view. Groups named in `creators` may also create and
    /// edit, groups named in `deleters` may also delete.
    ByGroupName {
        creators: &'static [&'static str],
        deleters: &'static [&'static str],
    },
}

impl GrantPolicy {
    /// Flags granted to the group called `group_name`.
    pub fn permissions_for(&self, group_name: &str) -> ModulePermissions {
        match self {
            Self::ViewOnly => ModulePermissions::VIEW_ONLY,
            Self::ByGroupName { creators, deleters } => {
                let creates = creators.contains(&group_name);
                ModulePermissions {
                    can_view: true,
                    can_create: creates,
                    can_edit: creates,
                    can_delete: deleters.contains(&group_name),
                }
            }
        }
    }
}

/// Decide whether a user may exercise `permission` on a module.
///
/// Administrators pass unconditionally. Everyone else needs an active group
/// holding a grant that carries the permission.
pub fn evaluate_access(
    role: &str,
    group_is_active: bool,
    access: Option<&ModulePermissions>,
    permission: Permission,
) -> bool {
    if roles::is_admin(role) {
        return true;
    }
    if !group_is_active {
        return false;
    }
    access.is_some_and(|a| a.allows(permission))
}
