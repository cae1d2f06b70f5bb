//! Fixture builders shared by the repository integration tests.
//!
//! Every `#[sqlx::test]` gets its own freshly migrated database, so these
//! helpers never need to clean up after themselves.

#![allow(dead_code)]

use sqlx::PgPool;
use timetrack_core::roles::{ROLE_ADMIN, ROLE_USER};
use timetrack_core::types::DbId;
use timetrack_db::models::user::{CreateUser, User};
use timetrack_db::models::user_group::{CreateUserGroup, UserGroup};
use timetrack_db::repositories::{UserGroupRepo, UserRepo};

/// Placeholder hash; these tests never verify passwords.
pub const TEST_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA";

pub async fn create_group(pool: &PgPool, name: &str) -> UserGroup {
    UserGroupRepo::create(
        pool,
        &CreateUserGroup {
            name: name.to_string(),
            ..CreateUserGroup::default()
        },
    )
    .await
    .unwrap()
}

pub fn new_user(email: &str, role: &str, user_group_id: Option<DbId>) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: TEST_PASSWORD_HASH.to_string(),
        first_name: "Test".to_string(),
        last_name: email.split('@').next().unwrap_or("User").to_string(),
        role: role.to_string(),
        vacation_days: 25,
        is_active: true,
        requires_password_change: false,
        user_group_id,
    }
}

pub async fn create_user(pool: &PgPool, email: &str, user_group_id: Option<DbId>) -> User {
    UserRepo::create(pool, &new_user(email, ROLE_USER, user_group_id))
        .await
        .unwrap()
}

pub async fn create_admin(pool: &PgPool, email: &str) -> User {
    UserRepo::create(pool, &new_user(email, ROLE_ADMIN, None))
        .await
        .unwrap()
}
