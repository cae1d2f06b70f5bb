//! Domain logic shared by the timetrack setup tooling.
//!
//! Nothing in this crate touches the database. Repositories live in
//! `timetrack-db`, the scripts themselves in `timetrack-setup`.

pub mod admin;
pub mod error;
pub mod modules;
pub mod password;
pub mod permissions;
pub mod process;
pub mod roles;
pub mod types;
