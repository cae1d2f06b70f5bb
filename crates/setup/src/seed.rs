//! Module seed scripts.
//!
//! [`seed_modules`] installs the catalog. [`register_module`] creates one
//! module and grants it to user groups according to a [`ModuleRegistration`];
//! the intranet and media scripts are presets of it. [`grant_project_reports`]
//! grants a single group on an already seeded module.

use sqlx::PgPool;
use timetrack_core::modules::{
    validate_module_key, ModuleDefinition, INTRANET_MODULE, MEDIA_MODULE, PROJECT_REPORTS_MODULE,
};
use timetrack_core::permissions::{GrantPolicy, ModulePermissions};
use timetrack_db::models::module::{Module, UpsertModule};
use timetrack_db::repositories::{ModuleAccessRepo, ModuleRepo, UserGroupRepo};

use crate::error::SetupResult;

/// Name of the administrators' group that receives project-report access.
pub const ADMINISTRATORS_GROUP: &str = "Administratoren";

/// Flags granted to [`ADMINISTRATORS_GROUP`] on `project_reports`.
pub const PROJECT_REPORTS_GRANT: ModulePermissions = ModulePermissions::FULL;

// ---------------------------------------------------------------------------
// Catalog seed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub existing: usize,
}

/// Create every module of `catalog` that does not exist yet.
///
/// Existing rows are left untouched, so the seed can be re-run safely.
pub async fn seed_modules(pool: &PgPool, catalog: &[ModuleDefinition]) -> SetupResult<SeedReport> {
    tracing::info!(count = catalog.len(), "Seeding module catalog");
    let mut report = SeedReport::default();

    for def in catalog {
        validate_module_key(def.key)?;
        if let Some(existing) = ModuleRepo::find_by_key(pool, def.key).await? {
            tracing::info!(key = def.key, module_id = existing.id, "Module already exists");
            report.existing += 1;
            continue;
        }
        let module = ModuleRepo::create(pool, &UpsertModule::from(def)).await?;
        tracing::info!(key = def.key, module_id = module.id, "Created module");
        report.created += 1;
    }

    tracing::info!(
        created = report.created,
        existing = report.existing,
        "Module catalog seeded"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// How the module row itself is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleWriteMode {
    /// Insert, or overwrite the descriptive fields of the existing row.
    Upsert,
    /// Insert only when no row with the key exists.
    CreateIfMissing,
}

/// Which user groups receive grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupScope {
    Active,
    All,
}

/// What happens to a group that already holds a grant on the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantMode {
    /// Replace the existing flags with the policy's.
    Overwrite,
    /// Leave existing grants alone and only fill in missing ones.
    KeepExisting,
}

#[derive(Debug, Clone)]
pub struct ModuleRegistration {
    pub definition: ModuleDefinition,
    pub write_mode: ModuleWriteMode,
    pub scope: GroupScope,
    pub grant_mode: GrantMode,
    pub policy: GrantPolicy,
}

impl ModuleRegistration {
    /// Intranet: upserted and viewable by every active group.
    pub fn intranet() -> Self {
        Self {
            definition: INTRANET_MODULE,
            write_mode: ModuleWriteMode::Upsert,
            scope: GroupScope::Active,
            grant_mode: GrantMode::Overwrite,
            policy: GrantPolicy::ViewOnly,
        }
    }

    /// Media library: everyone views, admins and managers edit, admins delete.
    pub fn media() -> Self {
        Self {
            definition: MEDIA_MODULE,
            write_mode: ModuleWriteMode::CreateIfMissing,
            scope: GroupScope::All,
            grant_mode: GrantMode::KeepExisting,
            policy: GrantPolicy::ByGroupName {
                creators: &["Admin", "Managers"],
                deleters: &["Admin"],
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationReport {
    pub module: Module,
    /// Whether this run inserted the module row.
    pub module_created: bool,
    /// Groups whose grant was written by this run.
    pub granted: usize,
    /// Groups that already held a grant which was kept.
    pub unchanged: usize,
}

/// Write the module row and its per-group grants.
pub async fn register_module(
    pool: &PgPool,
    registration: &ModuleRegistration,
) -> SetupResult<RegistrationReport> {
    let def = &registration.definition;
    validate_module_key(def.key)?;

    let (module, module_created) = write_module(pool, def, registration.write_mode).await?;
    tracing::info!(
        key = %module.key,
        module_id = module.id,
        created = module_created,
        "Module ready"
    );

    let groups = match registration.scope {
        GroupScope::Active => UserGroupRepo::list_active(pool).await?,
        GroupScope::All => UserGroupRepo::list(pool).await?,
    };
    if groups.is_empty() {
        tracing::warn!(key = %module.key, "No user groups found, nothing to grant");
    }

    let mut report = RegistrationReport {
        module,
        module_created,
        granted: 0,
        unchanged: 0,
    };

    for group in &groups {
        let permissions = registration.policy.permissions_for(&group.name);

        let written = match registration.grant_mode {
            GrantMode::Overwrite => {
                ModuleAccessRepo::upsert(pool, report.module.id, group.id, permissions).await?;
                true
            }
            GrantMode::KeepExisting => {
                ModuleAccessRepo::insert_if_missing(pool, report.module.id, group.id, permissions)
                    .await?
                    .is_some()
            }
        };

        if written {
            tracing::info!(
                group = %group.name,
                can_view = permissions.can_view,
                can_create = permissions.can_create,
                can_edit = permissions.can_edit,
                can_delete = permissions.can_delete,
                "Granted module access"
            );
            report.granted += 1;
        } else {
            tracing::info!(group = %group.name, "Group already has access");
            report.unchanged += 1;
        }
    }

    tracing::info!(
        key = %report.module.key,
        granted = report.granted,
        unchanged = report.unchanged,
        "Module registration complete"
    );
    Ok(report)
}

async fn write_module(
    pool: &PgPool,
    def: &ModuleDefinition,
    mode: ModuleWriteMode,
) -> SetupResult<(Module, bool)> {
    let existing = ModuleRepo::find_by_key(pool, def.key).await?;
    match (mode, existing) {
        (ModuleWriteMode::Upsert, existing) => {
            let module = ModuleRepo::upsert(pool, &UpsertModule::from(def)).await?;
            Ok((module, existing.is_none()))
        }
        (ModuleWriteMode::CreateIfMissing, Some(module)) => Ok((module, false)),
        (ModuleWriteMode::CreateIfMissing, None) => {
            let module = ModuleRepo::create(pool, &UpsertModule::from(def)).await?;
            Ok((module, true))
        }
    }
}

// ---------------------------------------------------------------------------
// Project reports grant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantOutcome {
    Granted,
    AlreadyGranted,
    GroupNotFound,
    ModuleNotFound,
}

/// Give the administrators' group full access to `project_reports`.
///
/// A missing group or module is logged and reported, not treated as a failure.
pub async fn grant_project_reports(pool: &PgPool) -> SetupResult<GrantOutcome> {
    let Some(group) = UserGroupRepo::find_by_name(pool, ADMINISTRATORS_GROUP).await? else {
        tracing::error!(group = ADMINISTRATORS_GROUP, "User group not found");
        return Ok(GrantOutcome::GroupNotFound);
    };

    let Some(module) = ModuleRepo::find_by_key(pool, PROJECT_REPORTS_MODULE.key).await? else {
        tracing::error!(key = PROJECT_REPORTS_MODULE.key, "Module not found");
        return Ok(GrantOutcome::ModuleNotFound);
    };

    let inserted =
        ModuleAccessRepo::insert_if_missing(pool, module.id, group.id, PROJECT_REPORTS_GRANT)
            .await?;
    match inserted {
        Some(access) => {
            tracing::info!(
                group = %group.name,
                key = %module.key,
                access_id = access.id,
                "Granted full access"
            );
            Ok(GrantOutcome::Granted)
        }
        None => {
            tracing::info!(group = %group.name, key = %module.key, "Access already granted");
            Ok(GrantOutcome::AlreadyGranted)
        }
    }
}
