//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the table and,
//! where the scripts insert rows, a create DTO.

pub mod module;
pub mod module_access;
pub mod user;
pub mod user_group;
pub mod user_group_membership;
