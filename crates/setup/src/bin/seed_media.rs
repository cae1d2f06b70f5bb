//! Create the media module and grant it to every user group.

use std::process::ExitCode;

use timetrack_setup::runner::run_script;
use timetrack_setup::seed::{register_module, ModuleRegistration};

#[tokio::main]
async fn main() -> ExitCode {
    run_script("seed-media", |pool, _config| async move {
        register_module(&pool, &ModuleRegistration::media()).await
    })
    .await
}
