//! Shared entry point for the script binaries.

use std::future::Future;
use std::process::ExitCode;

use timetrack_db::DbPool;

use crate::config::SetupConfig;
use crate::error::SetupResult;
use crate::logging;

/// Run a script body against a fresh connection pool.
///
/// Loads `.env`, installs tracing, reads [`SetupConfig`], connects, applies
/// migrations when enabled, then awaits `body`. The pool is closed whether
/// the body succeeds or not. Any error is logged and turned into a failing
/// exit code.
pub async fn run_script<F, Fut, T>(name: &str, body: F) -> ExitCode
where
    F: FnOnce(DbPool, SetupConfig) -> Fut,
    Fut: Future<Output = SetupResult<T>>,
{
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let config = match SetupConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(script = name, error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let pool = match connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(script = name, error = %e, "Database setup failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(script = name, "Starting");
    let result = body(pool.clone(), config).await;
    pool.close().await;

    match result {
        Ok(_) => {
            tracing::info!(script = name, "Finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(script = name, error = %e, "Script failed");
            ExitCode::FAILURE
        }
    }
}

async fn connect(config: &SetupConfig) -> SetupResult<DbPool> {
    let pool = timetrack_db::create_pool(&config.database_url, config.max_connections).await?;
    if let Err(e) = prepare(&pool, config).await {
        pool.close().await;
        return Err(e);
    }
    Ok(pool)
}

async fn prepare(pool: &DbPool, config: &SetupConfig) -> SetupResult<()> {
    timetrack_db::health_check(pool).await?;
    tracing::info!("Database connection established");

    if config.run_migrations {
        timetrack_db::run_migrations(pool).await?;
        tracing::info!("Database migrations applied");
    }
    Ok(())
}
