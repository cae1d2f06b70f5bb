//! Upsert the intranet module and give every active group view access.

use std::process::ExitCode;

use timetrack_setup::runner::run_script;
use timetrack_setup::seed::{register_module, ModuleRegistration};

#[tokio::main]
async fn main() -> ExitCode {
    run_script("register-intranet", |pool, _config| async move {
        register_module(&pool, &ModuleRegistration::intranet()).await
    })
    .await
}
