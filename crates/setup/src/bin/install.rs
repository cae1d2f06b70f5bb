//! First-run installer: seeds the module catalog and bootstraps the admin.

use std::process::ExitCode;

use timetrack_setup::install::{install, InstallPlan};
use timetrack_setup::runner::run_script;

#[tokio::main]
async fn main() -> ExitCode {
    run_script("install", |pool, _config| async move {
        let plan = InstallPlan::from_env()?;
        install(&pool, &plan).await
    })
    .await
}
