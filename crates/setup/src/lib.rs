//! Operational scripts for the timetrack database.
//!
//! Every script is a library function taking `&PgPool`, so tests can drive
//! it directly. The binaries under `src/bin` are thin wrappers around
//! [`runner::run_script`].

pub mod admin;
pub mod config;
pub mod error;
pub mod install;
pub mod logging;
pub mod migrate;
pub mod runner;
pub mod seed;
