//! Copy legacy single-group assignments into the membership table.

use std::process::ExitCode;

use timetrack_setup::migrate::migrate_user_groups;
use timetrack_setup::runner::run_script;

#[tokio::main]
async fn main() -> ExitCode {
    run_script("migrate-user-groups", |pool, _config| async move {
        migrate_user_groups(&pool).await
    })
    .await
}
