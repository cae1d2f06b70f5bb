//! Script configuration loaded from environment variables.
//!
//! | Env Var                  | Default                        |
//! |--------------------------|--------------------------------|
//! | `DATABASE_URL`           | required                       |
//! | `DB_MAX_CONNECTIONS`     | `5`                            |
//! | `RUN_MIGRATIONS`         | `true`                         |
//! | `ADMIN_EMAIL`            | `admin@timetracking.local`     |
//! | `ADMIN_PASSWORD`         | generated per run              |
//! | `ADMIN_CREDENTIALS_FILE` | `/tmp/admin-credentials.txt`   |
//! | `APP_URL`                | `http://localhost:3002`        |
//!
//! Setting `ADMIN_CREDENTIALS_FILE` to an empty string disables the file.

use std::path::PathBuf;
use std::str::FromStr;

use timetrack_core::admin::{DEFAULT_ADMIN_EMAIL, DEFAULT_CREDENTIALS_FILE};

use crate::error::{SetupError, SetupResult};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_APP_URL: &str = "http://localhost:3002";

/// Settings shared by every script binary.
#[derive(Debug, Clone)]
pub struct SetupConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Apply pending migrations before the script body runs.
    pub run_migrations: bool,
    pub admin: AdminConfig,
}

/// Settings of the admin bootstrap and reset scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub email: String,
    /// Operator-chosen password; a random one is generated when `None`.
    pub password: Option<String>,
    pub credentials_file: Option<PathBuf>,
    /// Login URL printed after bootstrap.
    pub app_url: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: None,
            credentials_file: Some(PathBuf::from(DEFAULT_CREDENTIALS_FILE)),
            app_url: DEFAULT_APP_URL.to_string(),
        }
    }
}

impl SetupConfig {
    pub fn from_env() -> SetupResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SetupResult<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SetupError::Config("DATABASE_URL must be set".into()))?;

        let max_connections =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(SetupError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }

        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", true)?;

        Ok(Self {
            database_url,
            max_connections,
            run_migrations,
            admin: AdminConfig::from_lookup(&lookup),
        })
    }
}

impl AdminConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let email = lookup("ADMIN_EMAIL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.email);

        let password = lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty());

        let credentials_file = match lookup("ADMIN_CREDENTIALS_FILE") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(PathBuf::from(v)),
            None => defaults.credentials_file,
        };

        let app_url = lookup("APP_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.app_url);

        Self {
            email,
            password,
            credentials_file,
            app_url,
        }
    }
}

/// Parse `key` when present, falling back to `default` when unset.
pub(crate) fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> SetupResult<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SetupError::Config(format!("{key} has an invalid value '{raw}'"))),
        None => Ok(default),
    }
}
