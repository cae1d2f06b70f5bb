//! Fixtures shared by the setup script integration tests.

#![allow(dead_code)]

use std::path::Path;

use sqlx::PgPool;
use timetrack_core::roles::{ROLE_ADMIN, ROLE_USER};
use timetrack_core::types::DbId;
use timetrack_db::models::user::{CreateUser, User};
use timetrack_db::models::user_group::{CreateUserGroup, UserGroup};
use timetrack_db::repositories::{UserGroupRepo, UserRepo};
use timetrack_setup::config::AdminConfig;

const PLACEHOLDER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA";

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

async fn insert_user(pool: &PgPool, email: &str, role: &str, group: Option<DbId>) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: PLACEHOLDER_HASH.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: role.to_string(),
            vacation_days: 25,
            is_active: true,
            requires_password_change: false,
            user_group_id: group,
        },
    )
    .await
    .unwrap()
}

pub async fn create_user(pool: &PgPool, email: &str, group: Option<DbId>) -> User {
    insert_user(pool, email, ROLE_USER, group).await
}

pub async fn create_admin(pool: &PgPool, email: &str) -> User {
    insert_user(pool, email, ROLE_ADMIN, None).await
}

/// Admin settings writing credentials into `dir` instead of `/tmp`.
pub fn test_admin_config(dir: &Path) -> AdminConfig {
    AdminConfig {
        email: "admin@example.test".to_string(),
        password: None,
        credentials_file: Some(dir.join("admin-credentials.txt")),
        app_url: "http://localhost:3002".to_string(),
    }
}
