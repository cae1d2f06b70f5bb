//! Integration tests for the repository layer.
//!
//! Exercises the queries the setup scripts rely on against a real database:
//! - module upsert keyed on `modules.key`
//! - grant upsert vs. insert-if-missing on `(module_id, user_group_id)`
//! - legacy group listing and membership uniqueness
//! - effective module access for admins and group members

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;
use timetrack_core::modules::{INTRANET_MODULE, MEDIA_MODULE};
use timetrack_core::permissions::{ModulePermissions, Permission};
use timetrack_db::models::module::UpsertModule;
use timetrack_db::repositories::{
    ModuleAccessRepo, ModuleRepo, UserGroupMembershipRepo, UserGroupRepo, UserRepo,
};

use common::{create_admin, create_group, create_user};

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check_and_empty_schema(pool: PgPool) {
    timetrack_db::health_check(&pool).await.unwrap();
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
    assert!(ModuleRepo::list(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_module_upsert_updates_in_place(pool: PgPool) {
    let first = ModuleRepo::upsert(&pool, &UpsertModule::from(&INTRANET_MODULE))
        .await
        .unwrap();

    let mut changed = UpsertModule::from(&INTRANET_MODULE);
    changed.name = "Wissensdatenbank".to_string();
    changed.sort_order = 100;
    let second = ModuleRepo::upsert(&pool, &changed).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Wissensdatenbank");
    assert_eq!(second.sort_order, 100);
    assert_eq!(ModuleRepo::list(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_module_create_rejects_duplicate_key(pool: PgPool) {
    let input = UpsertModule::from(&MEDIA_MODULE);
    ModuleRepo::create(&pool, &input).await.unwrap();

    let err = ModuleRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.constraint() == Some("uq_modules_key"));
}

// ---------------------------------------------------------------------------
// Grants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_grant_upsert_overwrites_flags(pool: PgPool) {
    let module = ModuleRepo::create(&pool, &UpsertModule::from(&MEDIA_MODULE))
        .await
        .unwrap();
    let group = create_group(&pool, "Managers").await;

    ModuleAccessRepo::upsert(&pool, module.id, group.id, ModulePermissions::FULL)
        .await
        .unwrap();
    let updated =
        ModuleAccessRepo::upsert(&pool, module.id, group.id, ModulePermissions::VIEW_ONLY)
            .await
            .unwrap();

    assert_eq!(updated.permissions(), ModulePermissions::VIEW_ONLY);
    assert_eq!(
        ModuleAccessRepo::count_for_module(&pool, module.id).await.unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_grant_insert_if_missing_keeps_existing(pool: PgPool) {
    let module = ModuleRepo::create(&pool, &UpsertModule::from(&MEDIA_MODULE))
        .await
        .unwrap();
    let group = create_group(&pool, "Admin").await;

    let created =
        ModuleAccessRepo::insert_if_missing(&pool, module.id, group.id, ModulePermissions::FULL)
            .await
            .unwrap();
    assert!(created.is_some());

    let again = ModuleAccessRepo::insert_if_missing(
        &pool,
        module.id,
        group.id,
        ModulePermissions::VIEW_ONLY,
    )
    .await
    .unwrap();
    assert!(again.is_none());

    let stored = ModuleAccessRepo::find(&pool, module.id, group.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.permissions(), ModulePermissions::FULL);
}

// ---------------------------------------------------------------------------
// Users and memberships
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_legacy_group(pool: PgPool) {
    let group = create_group(&pool, "Mitarbeiter").await;
    let with_group = create_user(&pool, "anna@example.com", Some(group.id)).await;
    create_user(&pool, "ben@example.com", None).await;

    let legacy = UserRepo::list_with_legacy_group(&pool).await.unwrap();
    assert_eq!(legacy.len(), 1);
    assert_eq!(legacy[0].id, with_group.id);
    assert_eq!(legacy[0].user_group_id, group.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_membership_is_unique(pool: PgPool) {
    let group = create_group(&pool, "Mitarbeiter").await;
    let user = create_user(&pool, "anna@example.com", None).await;

    let first = UserGroupMembershipRepo::insert_if_missing(&pool, user.id, group.id)
        .await
        .unwrap();
    assert!(first.is_some());
    let again = UserGroupMembershipRepo::insert_if_missing(&pool, user.id, group.id)
        .await
        .unwrap();
    assert!(again.is_none());
    assert_eq!(UserGroupMembershipRepo::count(&pool).await.unwrap(), 1);

    let err = sqlx::query(
        "INSERT INTO user_group_memberships (user_id, user_group_id) VALUES ($1, $2)",
    )
    .bind(user.id)
    .bind(group.id)
    .execute(&pool)
    .await
    .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db)
            if db.constraint() == Some("uq_user_group_memberships_user_id_user_group_id")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_credentials_reactivates(pool: PgPool) {
    let admin = create_admin(&pool, "root@example.com").await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(UserRepo::reset_credentials(&pool, admin.id, "new-hash", true)
        .await
        .unwrap());

    let reloaded = UserRepo::find_by_id(&pool, admin.id).await.unwrap().unwrap();
    assert!(reloaded.is_active);
    assert!(reloaded.requires_password_change);
    assert_eq!(reloaded.password_hash, "new-hash");
}

// ---------------------------------------------------------------------------
// Effective access
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_user_access(pool: PgPool) {
    let module = ModuleRepo::create(&pool, &UpsertModule::from(&INTRANET_MODULE))
        .await
        .unwrap();
    let readers = create_group(&pool, "Leser").await;
    let editors = create_group(&pool, "Redaktion").await;
    ModuleAccessRepo::upsert(&pool, module.id, readers.id, ModulePermissions::VIEW_ONLY)
        .await
        .unwrap();
    ModuleAccessRepo::upsert(&pool, module.id, editors.id, ModulePermissions::FULL)
        .await
        .unwrap();

    // Legacy assignment alone grants access.
    let reader = create_user(&pool, "reader@example.com", Some(readers.id)).await;
    assert!(
        ModuleAccessRepo::check_user_access(&pool, reader.id, "intranet", Permission::View)
            .await
            .unwrap()
    );
    assert!(
        !ModuleAccessRepo::check_user_access(&pool, reader.id, "intranet", Permission::Edit)
            .await
            .unwrap()
    );

    // A membership in a second group adds its flags.
    UserGroupMembershipRepo::insert_if_missing(&pool, reader.id, editors.id)
        .await
        .unwrap();
    assert!(
        ModuleAccessRepo::check_user_access(&pool, reader.id, "intranet", Permission::Edit)
            .await
            .unwrap()
    );

    // Deactivating the group withdraws what it granted.
    UserGroupRepo::set_active(&pool, editors.id, false)
        .await
        .unwrap();
    assert!(
        !ModuleAccessRepo::check_user_access(&pool, reader.id, "intranet", Permission::Edit)
            .await
            .unwrap()
    );

    // Admins pass without any grant; unknown users never do.
    let admin = create_admin(&pool, "root@example.com").await;
    assert!(
        ModuleAccessRepo::check_user_access(&pool, admin.id, "intranet", Permission::Delete)
            .await
            .unwrap()
    );
    assert!(
        !ModuleAccessRepo::check_user_access(&pool, 9_999, "intranet", Permission::View)
            .await
            .unwrap()
    );
}
