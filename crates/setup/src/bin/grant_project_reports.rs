//! Give the administrators' group full access to project reports.

use std::process::ExitCode;

use timetrack_setup::runner::run_script;
use timetrack_setup::seed::grant_project_reports;

#[tokio::main]
async fn main() -> ExitCode {
    run_script("grant-project-reports", |pool, _config| async move {
        grant_project_reports(&pool).await
    })
    .await
}
