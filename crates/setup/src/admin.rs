//! Administrator bootstrap and password reset.

use std::path::Path;

use sqlx::PgPool;
use timetrack_core::admin::{
    generate_password, AdminCredentials, DEFAULT_ADMIN_FIRST_NAME, DEFAULT_ADMIN_LAST_NAME,
    DEFAULT_VACATION_DAYS, GENERATED_PASSWORD_LENGTH,
};
use timetrack_core::error::CoreError;
use timetrack_core::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use timetrack_core::roles::ROLE_ADMIN;
use timetrack_db::models::user::{CreateUser, UserSummary};
use timetrack_db::repositories::UserRepo;
use tokio::io::AsyncWriteExt;

use crate::config::AdminConfig;
use crate::error::{is_unique_violation, SetupError, SetupResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminOutcome {
    /// An administrator already existed; nothing was written.
    AlreadyExists { email: String },
    Created(AdminCredentials),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// No administrator existed, so a fresh one was created.
    Created(AdminCredentials),
    /// Every administrator received the new password.
    Reset { emails: Vec<String>, password: String },
}

/// Create the first administrator unless one exists.
pub async fn setup_admin(pool: &PgPool, config: &AdminConfig) -> SetupResult<AdminOutcome> {
    if let Some(existing) = UserRepo::find_first_admin(pool).await? {
        tracing::info!(
            user_id = existing.id,
            email = %existing.email,
            "Administrator already exists, skipping bootstrap"
        );
        return Ok(AdminOutcome::AlreadyExists {
            email: existing.email,
        });
    }

    let credentials = create_admin(pool, config).await?;
    Ok(AdminOutcome::Created(credentials))
}

/// Give every administrator a new password, or create one if none exists.
///
/// Reset accounts are re-activated and must change the password on next login.
pub async fn reset_admin_password(
    pool: &PgPool,
    config: &AdminConfig,
) -> SetupResult<ResetOutcome> {
    let admins: Vec<UserSummary> = UserRepo::list_admins(pool).await?;
    if admins.is_empty() {
        tracing::warn!("No administrator found, creating one");
        let credentials = create_admin(pool, config).await?;
        return Ok(ResetOutcome::Created(credentials));
    }

    let password = resolve_password(config)?;
    let password_hash = hash_password(&password)?;

    let mut emails = Vec::with_capacity(admins.len());
    for admin in admins {
        UserRepo::reset_credentials(pool, admin.id, &password_hash, true).await?;
        tracing::info!(user_id = admin.id, email = %admin.email, "Reset administrator password");
        emails.push(admin.email);
    }

    if let Some(first) = emails.first() {
        let credentials = AdminCredentials {
            email: first.clone(),
            password: password.clone(),
        };
        write_credentials(config, &credentials).await?;
        log_banner(config, &credentials);
    }

    Ok(ResetOutcome::Reset { emails, password })
}

async fn create_admin(pool: &PgPool, config: &AdminConfig) -> SetupResult<AdminCredentials> {
    let password = resolve_password(config)?;
    let input = CreateUser {
        email: config.email.clone(),
        password_hash: hash_password(&password)?,
        first_name: DEFAULT_ADMIN_FIRST_NAME.to_string(),
        last_name: DEFAULT_ADMIN_LAST_NAME.to_string(),
        role: ROLE_ADMIN.to_string(),
        vacation_days: DEFAULT_VACATION_DAYS,
        is_active: true,
        requires_password_change: true,
        user_group_id: None,
    };

    let user = UserRepo::create(pool, &input).await.map_err(|e| {
        if is_unique_violation(&e) {
            SetupError::Core(CoreError::Conflict(format!(
                "A user with email '{}' already exists",
                config.email
            )))
        } else {
            SetupError::Database(e)
        }
    })?;
    tracing::info!(user_id = user.id, email = %user.email, "Created administrator");

    let credentials = AdminCredentials {
        email: user.email,
        password,
    };
    write_credentials(config, &credentials).await?;
    log_banner(config, &credentials);
    Ok(credentials)
}

/// The configured password, validated, or a freshly generated one.
fn resolve_password(config: &AdminConfig) -> Result<String, CoreError> {
    match &config.password {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)?;
            Ok(password.clone())
        }
        None => Ok(generate_password(GENERATED_PASSWORD_LENGTH)),
    }
}

async fn write_credentials(config: &AdminConfig, credentials: &AdminCredentials) -> SetupResult<()> {
    let Some(path) = &config.credentials_file else {
        return Ok(());
    };
    write_private_file(path, &credentials.file_contents(&config.app_url)).await?;
    tracing::info!(path = %path.display(), "Wrote administrator credentials");
    Ok(())
}

/// Create or truncate `path`, readable by the owner only on Unix.
async fn write_private_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents.as_bytes()).await?;
    file.flush().await?;

    // `mode` only applies on creation; tighten a pre-existing file as well.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    }
    Ok(())
}

fn log_banner(config: &AdminConfig, credentials: &AdminCredentials) {
    tracing::info!("==================================================");
    tracing::info!("Administrator login");
    tracing::info!("  Email:    {}", credentials.email);
    if config.password.is_none() {
        tracing::info!("  Password: {}", credentials.password);
    } else {
        tracing::info!("  Password: (from ADMIN_PASSWORD)");
    }
    tracing::info!("  Login:    {}", config.app_url);
    tracing::info!("Change the password after the first login.");
    tracing::info!("==================================================");
}
