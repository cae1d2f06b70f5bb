use std::process::ExitCode;

use timetrack_setup::admin::reset_admin_password;
use timetrack_setup::runner::run_script;

#[tokio::main]
async fn main() -> ExitCode {
    run_script("reset-admin-password", |pool, config| async move {
        reset_admin_password(&pool, &config.admin).await
    })
    .await
}
