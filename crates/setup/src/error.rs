use timetrack_core::error::CoreError;

/// Error type shared by every setup script.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// A domain-level error from `timetrack_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A missing or unparsable environment variable.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Install(#[from] InstallError),
}

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("Installation step '{step}' failed: {reason}")]
    StepFailed { step: String, reason: String },
}

/// Convenience alias for script return values.
pub type SetupResult<T> = Result<T, SetupError>;

/// Whether `err` is a PostgreSQL unique violation (SQLSTATE 23505).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
