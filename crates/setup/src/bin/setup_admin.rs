//! Create the first administrator account.

use std::process::ExitCode;

use timetrack_setup::admin::setup_admin;
use timetrack_setup::runner::run_script;

#[tokio::main]
async fn main() -> ExitCode {
    run_script("setup-admin", |pool, config| async move {
        setup_admin(&pool, &config.admin).await
    })
    .await
}
