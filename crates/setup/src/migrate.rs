//! Copy the legacy `users.user_group_id` into `user_group_memberships`.
//!
//! The legacy column is left in place, so the migration can be re-run at any
//! time and only fills in memberships that are still missing.

use sqlx::PgPool;
use timetrack_db::models::user::LegacyGroupAssignment;
use timetrack_db::repositories::{UserGroupMembershipRepo, UserRepo};

use crate::error::SetupResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Users carrying a legacy group.
    pub found: usize,
    pub migrated: usize,
    /// Users that already had the membership.
    pub skipped: usize,
    pub failed: usize,
}

enum ItemResult {
    Migrated,
    Skipped,
}

/// Create a membership for every user with a legacy group assignment.
///
/// A failure on one user is logged and counted and the loop moves on.
/// Only the initial listing can fail the whole run.
pub async fn migrate_user_groups(pool: &PgPool) -> SetupResult<MigrationReport> {
    let assignments = UserRepo::list_with_legacy_group(pool).await?;
    let mut report = MigrationReport {
        found: assignments.len(),
        ..MigrationReport::default()
    };
    tracing::info!(found = report.found, "Users with a legacy group assignment");

    for assignment in &assignments {
        match migrate_one(pool, assignment).await {
            Ok(ItemResult::Migrated) => {
                tracing::info!(
                    user_id = assignment.id,
                    user = %assignment.full_name(),
                    user_group_id = assignment.user_group_id,
                    "Migrated group membership"
                );
                report.migrated += 1;
            }
            Ok(ItemResult::Skipped) => {
                tracing::debug!(user_id = assignment.id, "Membership already exists");
                report.skipped += 1;
            }
            Err(e) => {
                tracing::error!(
                    user_id = assignment.id,
                    user = %assignment.full_name(),
                    error = %e,
                    "Failed to migrate group membership"
                );
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        migrated = report.migrated,
        skipped = report.skipped,
        failed = report.failed,
        "User group migration complete"
    );
    Ok(report)
}

async fn migrate_one(
    pool: &PgPool,
    assignment: &LegacyGroupAssignment,
) -> Result<ItemResult, sqlx::Error> {
    let inserted = UserGroupMembershipRepo::insert_if_missing(
        pool,
        assignment.id,
        assignment.user_group_id,
    )
    .await?;
    Ok(match inserted {
        Some(_) => ItemResult::Migrated,
        None => ItemResult::Skipped,
    })
}
