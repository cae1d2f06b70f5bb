//! Create every catalog module that does not exist yet.

use std::process::ExitCode;

use timetrack_core::modules::DEFAULT_MODULES;
use timetrack_setup::runner::run_script;
use timetrack_setup::seed::seed_modules;

#[tokio::main]
async fn main() -> ExitCode {
    run_script("seed-modules", |pool, _config| async move {
        seed_modules(&pool, DEFAULT_MODULES).await
    })
    .await
}
