//! Well-known user role constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260101000002_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_USER: &str = "USER";

/// Returns `true` when `role` names the administrator role.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_ADMIN
}
